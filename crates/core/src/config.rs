//! Download configuration shared by every pipeline stage.

use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, ImageSize, Result};

/// Default User-Agent header sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Ubuntu Chromium/76.0.3809.100 Chrome/76.0.3809.100 Safari/537.36";

/// Default origin of manifests and slide images.
pub const DEFAULT_BASE_DATA_URL: &str = "https://d2ygwrecguqg66.cloudfront.net/data/presentations/";

/// Default pause after each download, in seconds.
pub const DEFAULT_WAIT_TIME_SECS: f64 = 0.2;

/// Default HTTP request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Whether already downloaded slide images are fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Always download and overwrite.
    #[default]
    Always,
    /// Keep images that already exist on disk.
    SkipExisting,
}

/// Immutable settings for one download run.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub size: ImageSize,
    pub user_agent: String,
    /// Base URL of the data service, without trailing slash.
    pub base_data_url: String,
    /// Pause after each download.
    pub wait_time: Duration,
    pub refresh: RefreshPolicy,
    /// Directory the presentation folder is created in.
    pub output_root: PathBuf,
    pub timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            size: ImageSize::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_data_url: DEFAULT_BASE_DATA_URL.trim_end_matches('/').to_string(),
            wait_time: Duration::from_secs_f64(DEFAULT_WAIT_TIME_SECS),
            refresh: RefreshPolicy::default(),
            output_root: PathBuf::from("."),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DownloadConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the data service base URL. A trailing slash is optional.
    pub fn with_base_data_url(mut self, url: impl Into<String>) -> Self {
        self.base_data_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the pause after each download, in seconds.
    pub fn with_wait_time_secs(mut self, secs: f64) -> Result<Self> {
        self.wait_time = Duration::try_from_secs_f64(secs).map_err(|_| {
            Error::InvalidOption(format!("wait time must be a non-negative number, got {}", secs))
        })?;
        Ok(self)
    }

    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the slide manifest: `{base}/{id}/v3/slides.json`.
    pub fn manifest_url(&self, presentation_id: &str) -> String {
        format!("{}/{}/v3/slides.json", self.base_data_url, presentation_id)
    }

    /// URL of a slide image: `{base}/{id}/slides/{size}/{image}.jpg`.
    pub fn image_url(&self, presentation_id: &str, image_name: &str) -> String {
        format!(
            "{}/{}/slides/{}/{}.jpg",
            self.base_data_url, presentation_id, self.size, image_name
        )
    }
}
