//! Slide image downloads.

use slides_core::{Manifest, PresentationLayout, RefreshPolicy, Result};

use crate::downloader::Downloader;
use crate::http::Fetch;
use crate::throttle::Throttle;

/// Outcome of an image download run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
}

impl<F: Fetch, T: Throttle> Downloader<F, T> {
    /// Download every slide image in manifest order.
    ///
    /// With [`RefreshPolicy::Always`] existing images are overwritten; with
    /// [`RefreshPolicy::SkipExisting`] they are left alone and no request is made.
    /// The first failed download aborts the run.
    pub fn download_images(
        &mut self,
        layout: &PresentationLayout,
        manifest: &Manifest,
    ) -> Result<DownloadSummary> {
        let mut summary = DownloadSummary::default();
        let presentation_id = layout.presentation().id.clone();

        for slide in manifest {
            let path = layout.image_path(slide, &self.config.size);

            if self.config.refresh == RefreshPolicy::SkipExisting && path.is_file() {
                log::debug!("skipping existing {}", path.display());
                summary.skipped += 1;
                continue;
            }

            let url = self.config.image_url(&presentation_id, slide.image_name());
            self.download_to(&url, &path)?;
            summary.downloaded += 1;
        }

        log::info!(
            "{} slide images downloaded, {} skipped",
            summary.downloaded,
            summary.skipped
        );
        Ok(summary)
    }
}
