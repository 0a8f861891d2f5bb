//! Sequential downloader for one presentation.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use slides_core::{DownloadConfig, Result};

use crate::http::Fetch;
use crate::throttle::Throttle;

/// Downloads the manifest and slide images of a presentation, one request
/// at a time, pausing after each download.
pub struct Downloader<F, T> {
    pub(crate) fetcher: F,
    pub(crate) throttle: T,
    pub(crate) config: DownloadConfig,
}

impl<F: Fetch, T: Throttle> Downloader<F, T> {
    pub fn new(fetcher: F, throttle: T, config: DownloadConfig) -> Self {
        Self {
            fetcher,
            throttle,
            config,
        }
    }

    /// Fetch `url` into `path`, then pause.
    pub(crate) fn download_to(&mut self, url: &str, path: &Path) -> Result<()> {
        log::info!("downloading {}", path.display());
        let body = self.fetcher.fetch(url)?;
        write_file(path, &body)?;
        self.throttle.pause();
        Ok(())
    }
}

/// Write `bytes` to a sibling `.part` file and move it into place, so
/// `path` only ever holds complete content. The `.part` file is removed
/// if any step fails.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = write_partial(&partial, bytes).and_then(|()| fs::rename(&partial, path));
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&partial) {
            if cleanup.kind() != ErrorKind::NotFound {
                log::warn!("could not remove {}: {}", partial.display(), cleanup);
            }
        }
        return Err(e.into());
    }
    Ok(())
}

fn write_partial(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
