//! On-disk layout of a downloaded presentation.
//!
//! ```text
//! {id}-{name}/
//!   {id}.json
//!   ffmpeg_concat.txt
//!   {id}-{name}.pdf
//!   images/
//!     {time:08}-{imageName}-{size}.jpg
//! ```

use std::path::{Path, PathBuf};

use crate::{ImageSize, Manifest, PresentationId, SlideRecord};

/// Name of the images subfolder.
pub const IMAGES_DIR: &str = "images";

/// File name of the ffmpeg concat timeline.
pub const TIMELINE_FILE: &str = "ffmpeg_concat.txt";

/// File name of a slide image, derived from `(time, image name, size)`.
pub fn image_file_name(time: u64, image_name: &str, size: &ImageSize) -> String {
    format!("{:08}-{}-{}.jpg", time, image_name, size)
}

/// Paths of every artifact belonging to one presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationLayout {
    presentation: PresentationId,
    folder: PathBuf,
}

impl PresentationLayout {
    /// Layout rooted at `{root}/{id}-{name}`.
    pub fn new(root: impl AsRef<Path>, presentation: PresentationId) -> Self {
        let folder = root.as_ref().join(presentation.folder_name());
        Self {
            presentation,
            folder,
        }
    }

    pub fn presentation(&self) -> &PresentationId {
        &self.presentation
    }

    /// The presentation folder.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn images_dir(&self) -> PathBuf {
        self.folder.join(IMAGES_DIR)
    }

    /// Cached manifest, `{folder}/{id}.json`.
    pub fn manifest_path(&self) -> PathBuf {
        self.folder.join(format!("{}.json", self.presentation.id))
    }

    pub fn timeline_path(&self) -> PathBuf {
        self.folder.join(TIMELINE_FILE)
    }

    /// Assembled PDF, `{folder}/{id}-{name}.pdf`.
    pub fn pdf_path(&self) -> PathBuf {
        self.folder
            .join(format!("{}.pdf", self.presentation.folder_name()))
    }

    /// Path of a slide image relative to the presentation folder.
    pub fn relative_image_path(&self, slide: &SlideRecord, size: &ImageSize) -> String {
        format!(
            "{}/{}",
            IMAGES_DIR,
            image_file_name(slide.time, slide.image_name(), size)
        )
    }

    /// Full path of a slide image.
    pub fn image_path(&self, slide: &SlideRecord, size: &ImageSize) -> PathBuf {
        self.images_dir()
            .join(image_file_name(slide.time, slide.image_name(), size))
    }

    /// Full paths of all slide images, in manifest order.
    pub fn image_paths(&self, manifest: &Manifest, size: &ImageSize) -> Vec<PathBuf> {
        manifest
            .iter()
            .map(|slide| self.image_path(slide, size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PresentationLayout {
        PresentationLayout::new("out", PresentationId::new("38943570", "talk"))
    }

    #[test]
    fn test_image_file_name() {
        assert_eq!(
            image_file_name(5000, "abc123", &ImageSize::Big),
            "00005000-abc123-big.jpg"
        );
        assert_eq!(
            image_file_name(0, "x", &ImageSize::Medium),
            "00000000-x-medium.jpg"
        );
        assert_eq!(
            image_file_name(123_456_789, "y", &ImageSize::Big),
            "123456789-y-big.jpg"
        );
    }

    #[test]
    fn test_image_path_is_deterministic() {
        let layout = layout();
        let a = SlideRecord::new(12000, "c");
        let b = SlideRecord::new(0, "a");

        let first = layout.image_path(&a, &ImageSize::Big);
        let _ = layout.image_path(&b, &ImageSize::Big);
        let second = layout.image_path(&a, &ImageSize::Big);

        assert_eq!(first, second);
        assert_eq!(
            first,
            Path::new("out/38943570-talk/images/00012000-c-big.jpg")
        );
        assert_ne!(first, layout.image_path(&a, &ImageSize::Medium));
    }

    #[test]
    fn test_artifact_paths() {
        let layout = layout();
        assert_eq!(layout.folder(), Path::new("out/38943570-talk"));
        assert_eq!(layout.images_dir(), Path::new("out/38943570-talk/images"));
        assert_eq!(
            layout.manifest_path(),
            Path::new("out/38943570-talk/38943570.json")
        );
        assert_eq!(
            layout.timeline_path(),
            Path::new("out/38943570-talk/ffmpeg_concat.txt")
        );
        assert_eq!(
            layout.pdf_path(),
            Path::new("out/38943570-talk/38943570-talk.pdf")
        );
    }

    #[test]
    fn test_image_paths_follow_manifest_order() {
        let layout = layout();
        let manifest = Manifest {
            slides: vec![SlideRecord::new(9, "z"), SlideRecord::new(1, "a")],
        };

        let paths = layout.image_paths(&manifest, &ImageSize::Big);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("00000009-z-big.jpg"));
        assert!(paths[1].ends_with("00000001-a-big.jpg"));
    }
}
