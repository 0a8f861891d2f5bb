//! ffmpeg concat demuxer timeline output.
//!
//! Generates the `file`/`duration` script that ffmpeg's concat demuxer turns
//! into a slideshow video, one entry per slide in manifest order.

use std::fs;
use std::io::Write;

use crate::{Error, ImageSize, Manifest, PresentationLayout, Result};

/// Display time of the last slide, in seconds. The manifest has no end timestamp.
pub const DEFAULT_FINAL_DURATION_SECS: u32 = 30;

/// Formatter for the ffmpeg concat timeline.
#[derive(Debug, Clone)]
pub struct TimelineFormatter {
    /// Duration directive written after the last slide.
    final_duration_secs: u32,
}

impl Default for TimelineFormatter {
    fn default() -> Self {
        Self {
            final_duration_secs: DEFAULT_FINAL_DURATION_SECS,
        }
    }
}

impl TimelineFormatter {
    /// Create a new formatter with the default 30 second final duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration shown for the last slide.
    pub fn with_final_duration(mut self, secs: u32) -> Self {
        self.final_duration_secs = secs;
        self
    }

    /// Format `(start time in ms, file path)` entries into a concat script.
    ///
    /// # Example output
    /// ```text
    /// file 'a'
    /// duration 5.000
    /// file 'b'
    /// duration 7.000
    /// file 'c'
    /// duration 30
    /// file 'c'
    /// ```
    ///
    /// The last file is listed twice because the concat demuxer ignores the
    /// duration of the final entry.
    pub fn format<S: AsRef<str>>(&self, entries: &[(u64, S)]) -> Result<String> {
        let Some((_, last_path)) = entries.last() else {
            return Err(Error::EmptyManifest);
        };

        let mut output = String::new();
        let mut previous_time: Option<u64> = None;

        for (time, path) in entries {
            if let Some(previous) = previous_time {
                if *time < previous {
                    log::warn!(
                        "slide at {} ms starts before the previous one at {} ms",
                        time,
                        previous
                    );
                }
                let millis = time.saturating_sub(previous);
                output.push_str(&format!("duration {:.3}\n", millis as f64 / 1000.0));
            }
            output.push_str(&file_directive(path.as_ref()));
            previous_time = Some(*time);
        }

        output.push_str(&format!("duration {}\n", self.final_duration_secs));
        output.push_str(&file_directive(last_path.as_ref()));

        Ok(output)
    }

    /// Render the timeline for a manifest, with image paths relative to the
    /// presentation folder.
    pub fn render(
        &self,
        layout: &PresentationLayout,
        manifest: &Manifest,
        size: &ImageSize,
    ) -> Result<String> {
        let entries: Vec<(u64, String)> = manifest
            .iter()
            .map(|slide| (slide.time, layout.relative_image_path(slide, size)))
            .collect();

        self.format(&entries)
    }

    /// Write the timeline file unless it already exists.
    ///
    /// Returns `true` if the file was written.
    pub fn write(
        &self,
        layout: &PresentationLayout,
        manifest: &Manifest,
        size: &ImageSize,
    ) -> Result<bool> {
        let path = layout.timeline_path();
        if path.exists() {
            log::debug!("{} already exists, leaving it untouched", path.display());
            return Ok(false);
        }

        let content = self.render(layout, manifest, size)?;
        let mut file = fs::File::create(&path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        log::info!("wrote {}", path.display());
        Ok(true)
    }
}

/// A `file` line, with single quotes escaped the way the concat demuxer expects.
fn file_directive(path: &str) -> String {
    format!("file '{}'\n", path.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PresentationId, SlideRecord};

    #[test]
    fn test_format_three_slides() {
        let formatter = TimelineFormatter::new();
        let entries = [(0, "a"), (5000, "b"), (12000, "c")];

        let expected = "file 'a'\n\
                        duration 5.000\n\
                        file 'b'\n\
                        duration 7.000\n\
                        file 'c'\n\
                        duration 30\n\
                        file 'c'\n";
        assert_eq!(formatter.format(&entries).unwrap(), expected);
    }

    #[test]
    fn test_format_single_slide() {
        let formatter = TimelineFormatter::new();
        let result = formatter.format(&[(2500, "only")]).unwrap();
        assert_eq!(result, "file 'only'\nduration 30\nfile 'only'\n");
    }

    #[test]
    fn test_format_fractional_seconds() {
        let formatter = TimelineFormatter::new();
        let result = formatter.format(&[(1000, "a"), (2234, "b")]).unwrap();
        assert!(result.contains("duration 1.234\n"));
    }

    #[test]
    fn test_format_custom_final_duration() {
        let formatter = TimelineFormatter::new().with_final_duration(5);
        let result = formatter.format(&[(0, "a")]).unwrap();
        assert_eq!(result, "file 'a'\nduration 5\nfile 'a'\n");
    }

    #[test]
    fn test_format_empty() {
        let formatter = TimelineFormatter::new();
        let entries: [(u64, &str); 0] = [];
        assert!(matches!(
            formatter.format(&entries),
            Err(Error::EmptyManifest)
        ));
    }

    #[test]
    fn test_format_escapes_quotes() {
        let formatter = TimelineFormatter::new();
        let result = formatter.format(&[(0, "it's")]).unwrap();
        assert!(result.starts_with("file 'it'\\''s'\n"));
    }

    #[test]
    fn test_render_uses_relative_image_paths() {
        let layout = PresentationLayout::new("/tmp/out", PresentationId::new("1", "talk"));
        let manifest = Manifest {
            slides: vec![SlideRecord::new(0, "a"), SlideRecord::new(5000, "b")],
        };

        let result = TimelineFormatter::new()
            .render(&layout, &manifest, &ImageSize::Big)
            .unwrap();
        assert_eq!(
            result,
            "file 'images/00000000-a-big.jpg'\n\
             duration 5.000\n\
             file 'images/00005000-b-big.jpg'\n\
             duration 30\n\
             file 'images/00005000-b-big.jpg'\n"
        );
    }

    #[test]
    fn test_write_skips_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PresentationLayout::new(dir.path(), PresentationId::new("1", "talk"));
        fs::create_dir_all(layout.folder()).unwrap();
        fs::write(layout.timeline_path(), "keep me").unwrap();

        let manifest = Manifest {
            slides: vec![SlideRecord::new(0, "a")],
        };
        let written = TimelineFormatter::new()
            .write(&layout, &manifest, &ImageSize::Big)
            .unwrap();

        assert!(!written);
        assert_eq!(
            fs::read_to_string(layout.timeline_path()).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PresentationLayout::new(dir.path(), PresentationId::new("1", "talk"));
        fs::create_dir_all(layout.folder()).unwrap();

        let manifest = Manifest {
            slides: vec![SlideRecord::new(0, "a"), SlideRecord::new(1500, "b")],
        };
        let formatter = TimelineFormatter::new();
        assert!(formatter.write(&layout, &manifest, &ImageSize::Medium).unwrap());

        let content = fs::read_to_string(layout.timeline_path()).unwrap();
        assert_eq!(
            content,
            formatter.render(&layout, &manifest, &ImageSize::Medium).unwrap()
        );
    }

    #[test]
    fn test_write_empty_manifest_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PresentationLayout::new(dir.path(), PresentationId::new("1", "talk"));
        fs::create_dir_all(layout.folder()).unwrap();

        let result = TimelineFormatter::new().write(&layout, &Manifest::default(), &ImageSize::Big);
        assert!(matches!(result, Err(Error::EmptyManifest)));
        assert!(!layout.timeline_path().exists());
    }
}
