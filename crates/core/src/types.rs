//! Domain types for a hosted presentation and its slide manifest.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Identity of a hosted presentation, derived from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationId {
    /// Numeric presentation id, kept as text.
    pub id: String,

    /// Human-readable slug.
    pub name: String,
}

impl PresentationId {
    /// Create a new identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Name of the local output folder, `{id}-{name}`.
    pub fn folder_name(&self) -> String {
        format!("{}-{}", self.id, self.name)
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.folder_name())
    }
}

/// Image size variant requested from the hosting service.
///
/// The service defines the available sizes; `medium` and `big` are the
/// known ones, anything else is passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSize {
    Medium,
    #[default]
    Big,
    Other(String),
}

impl ImageSize {
    /// The path segment used by the service for this size.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Medium => "medium",
            Self::Big => "big",
            Self::Other(size) => size,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = Error;

    /// Sizes end up in URLs and file names, so they must be a single
    /// non-empty path segment.
    fn from_str(s: &str) -> Result<Self> {
        let size = s.trim();
        if size.is_empty()
            || size.contains(['/', '\\', '?', '#'])
            || size == "."
            || size == ".."
        {
            return Err(Error::InvalidOption(format!(
                "invalid image size '{}', expected e.g. medium or big",
                s
            )));
        }

        Ok(match size.to_lowercase().as_str() {
            "medium" => Self::Medium,
            "big" => Self::Big,
            _ => Self::Other(size.to_string()),
        })
    }
}

/// Image reference of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideImage {
    /// Opaque image identifier.
    pub name: String,
}

/// One slide of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Slide start offset in milliseconds.
    #[serde(deserialize_with = "deserialize_millis")]
    pub time: u64,

    pub image: SlideImage,
}

impl SlideRecord {
    /// Create a slide record.
    pub fn new(time: u64, image_name: impl Into<String>) -> Self {
        Self {
            time,
            image: SlideImage {
                name: image_name.into(),
            },
        }
    }

    /// The image identifier of this slide.
    pub fn image_name(&self) -> &str {
        &self.image.name
    }
}

/// Ordered slide table of a presentation, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub slides: Vec<SlideRecord>,
}

impl Manifest {
    /// Parse the manifest JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| Error::ManifestParse(e.to_string()))
    }

    /// Parse the manifest JSON from a string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ManifestParse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideRecord> {
        self.slides.iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a SlideRecord;
    type IntoIter = std::slice::Iter<'a, SlideRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

/// Accept integer or floating point millisecond offsets, truncating floats.
fn deserialize_millis<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(ms) = number.as_u64() {
        return Ok(ms);
    }
    match number.as_f64() {
        Some(ms) if ms >= 0.0 && ms.is_finite() => Ok(ms.trunc() as u64),
        _ => Err(serde::de::Error::custom(format!(
            "invalid slide time: {}",
            number
        ))),
    }
}
