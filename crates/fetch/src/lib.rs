//! Manifest and slide image downloads for hosted slide decks.
//!
//! All requests go through the [`Fetch`] trait and are paced by a
//! [`Throttle`], one at a time.

pub mod downloader;
pub mod http;
pub mod images;
pub mod manifest;
pub mod throttle;

#[cfg(test)]
pub(crate) mod test_utils;

pub use downloader::Downloader;
pub use http::{Fetch, HttpClient};
pub use images::DownloadSummary;
pub use manifest::prepare_folders;
pub use throttle::{FixedDelay, NoDelay, Throttle};
