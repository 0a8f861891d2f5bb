//! Presentation folder setup and manifest caching.

use std::fs::{self, File};
use std::path::Path;

use slides_core::{Error, Manifest, PresentationLayout, Result};

use crate::downloader::{write_file, Downloader};
use crate::http::Fetch;
use crate::throttle::Throttle;

/// Create `path` as a directory unless it already is one.
fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(Error::OutputPathConflict(path.to_path_buf()));
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// Create the presentation folder and its `images/` subfolder.
pub fn prepare_folders(layout: &PresentationLayout) -> Result<()> {
    ensure_dir(layout.folder())?;
    ensure_dir(&layout.images_dir())?;
    Ok(())
}

impl<F: Fetch, T: Throttle> Downloader<F, T> {
    /// Make sure the manifest is cached locally and open it for reading.
    ///
    /// The manifest is only requested when `{folder}/{id}.json` does not
    /// exist yet. A downloaded body is checked to be a manifest before it
    /// is cached.
    pub fn fetch_manifest(&mut self, layout: &PresentationLayout) -> Result<File> {
        prepare_folders(layout)?;

        let path = layout.manifest_path();
        if path.exists() {
            log::debug!("using cached manifest {}", path.display());
        } else {
            let url = self.config.manifest_url(&layout.presentation().id);
            log::info!("downloading {}", path.display());

            let body = self.fetcher.fetch(&url)?;
            let manifest = Manifest::from_reader(body.as_slice())?;
            log::debug!("manifest lists {} slides", manifest.len());

            write_file(&path, &body)?;
            self.throttle.pause();
        }

        Ok(File::open(&path)?)
    }

    /// Fetch (or reuse) and parse the manifest.
    pub fn load_manifest(&mut self, layout: &PresentationLayout) -> Result<Manifest> {
        let file = self.fetch_manifest(layout)?;
        Manifest::from_reader(std::io::BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeFetcher, MANIFEST_JSON};
    use crate::NoDelay;
    use slides_core::{DownloadConfig, PresentationId};
    use std::io::Read;

    fn setup(root: &Path) -> PresentationLayout {
        PresentationLayout::new(root, PresentationId::new("38943570", "talk"))
    }

    #[test]
    fn test_fetch_manifest_downloads_once() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path());
        let config = DownloadConfig::new().with_base_data_url("http://data.test/");
        let fetcher = FakeFetcher::new()
            .with_response("http://data.test/38943570/v3/slides.json", MANIFEST_JSON);

        let mut downloader = Downloader::new(&fetcher, NoDelay, config);
        let mut content = String::new();
        downloader
            .fetch_manifest(&layout)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        assert_eq!(content, MANIFEST_JSON);
        assert!(layout.images_dir().is_dir());
        assert_eq!(fetcher.requests().len(), 1);

        // Second run reuses the cached copy.
        let manifest = downloader.load_manifest(&layout).unwrap();
        assert_eq!(manifest.len(), 3);
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[test]
    fn test_cached_manifest_is_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path());
        fs::create_dir_all(layout.folder()).unwrap();
        fs::write(layout.manifest_path(), MANIFEST_JSON).unwrap();

        let fetcher = FakeFetcher::new();
        let mut downloader = Downloader::new(&fetcher, NoDelay, DownloadConfig::new());
        let manifest = downloader.load_manifest(&layout).unwrap();

        assert!(fetcher.requests().is_empty());
        assert_eq!(manifest.slides[1].image_name(), "b");
        assert_eq!(fs::read_to_string(layout.manifest_path()).unwrap(), MANIFEST_JSON);
    }

    #[test]
    fn test_folder_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path());
        fs::write(layout.folder(), "not a folder").unwrap();

        let fetcher = FakeFetcher::new();
        let mut downloader = Downloader::new(&fetcher, NoDelay, DownloadConfig::new());
        let err = downloader.fetch_manifest(&layout).unwrap_err();

        assert!(matches!(err, Error::OutputPathConflict(ref p) if p == layout.folder()));
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn test_failed_fetch_caches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path());

        let fetcher = FakeFetcher::new();
        let mut downloader = Downloader::new(&fetcher, NoDelay, DownloadConfig::new());
        let err = downloader.fetch_manifest(&layout).unwrap_err();

        assert!(matches!(err, Error::RemoteStatus { status: 404, .. }));
        assert!(!layout.manifest_path().exists());
    }

    #[test]
    fn test_invalid_manifest_body_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let layout = setup(dir.path());
        let config = DownloadConfig::new().with_base_data_url("http://data.test");
        let fetcher = FakeFetcher::new()
            .with_response("http://data.test/38943570/v3/slides.json", "<html>oops</html>");

        let mut downloader = Downloader::new(&fetcher, NoDelay, config);
        let err = downloader.fetch_manifest(&layout).unwrap_err();

        assert!(matches!(err, Error::ManifestParse(_)));
        assert!(!layout.manifest_path().exists());
    }
}
