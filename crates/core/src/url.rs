//! Presentation URL parsing.

use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, PresentationId, Result};

/// Matches `https://slideslive.(com|de)/<id>/<name>` and ignores whatever follows.
static PRESENTATION_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://slideslive\.(?:com|de)/([0-9]+)/([^/?#]+)").unwrap()
});

/// Extract the presentation identity from a presentation URL.
///
/// Trailing path segments, query strings and fragments are ignored.
///
/// # Example
/// ```
/// use slides_core::parse_presentation_url;
///
/// let id = parse_presentation_url("https://slideslive.com/38943570/some-talk?ref=home")?;
/// assert_eq!(id.id, "38943570");
/// assert_eq!(id.name, "some-talk");
/// # Ok::<(), slides_core::Error>(())
/// ```
pub fn parse_presentation_url(url: &str) -> Result<PresentationId> {
    let captures = PRESENTATION_URL_REGEX
        .captures(url.trim())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

    Ok(PresentationId::new(&captures[1], &captures[2]))
}
