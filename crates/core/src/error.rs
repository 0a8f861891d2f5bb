//! Error types for slide deck downloading and assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while downloading and assembling a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a local file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The presentation URL does not match the expected pattern.
    #[error("{0} is not a correct url")]
    InvalidUrl(String),

    /// A path that must be a directory already exists as a plain file.
    #[error("{} is a file, can't create a folder with that name", .0.display())]
    OutputPathConflict(PathBuf),

    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("Remote fetch of {url} failed with status {status}")]
    RemoteStatus { url: String, status: u16 },

    /// The manifest JSON is malformed or lacks a consumed field.
    #[error("Manifest parsing error: {0}")]
    ManifestParse(String),

    /// The manifest contains no slides.
    #[error("Manifest has no slides")]
    EmptyManifest,

    /// A slide image could not be decoded.
    #[error("Failed to decode image {}: {message}", .path.display())]
    ImageDecode { path: PathBuf, message: String },

    /// PDF assembly was requested without any images.
    #[error("There are no images.")]
    NoImages,

    /// Failed to build or save the PDF document.
    #[error("PDF error: {0}")]
    PdfError(String),

    /// Invalid value for an option.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
