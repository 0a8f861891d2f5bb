//! Core domain types, URL parsing, on-disk layout and ffmpeg timeline
//! output for downloading hosted slide decks.

pub mod config;
pub mod error;
pub mod layout;
pub mod timeline;
pub mod types;
pub mod url;

pub use config::{DownloadConfig, RefreshPolicy};
pub use error::{Error, Result};
pub use layout::{image_file_name, PresentationLayout};
pub use timeline::TimelineFormatter;
pub use types::{ImageSize, Manifest, PresentationId, SlideImage, SlideRecord};
pub use url::parse_presentation_url;
