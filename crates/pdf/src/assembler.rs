//! Multi-page PDF assembly from slide images.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use slides_core::{Error, ImageSize, Manifest, PresentationLayout, Result};

/// Pixels per inch used to derive the page size from the image size.
pub const DEFAULT_RESOLUTION: f32 = 100.0;

/// Name of the image XObject on every page.
const IMAGE_RESOURCE: &str = "Im0";

/// A decoded slide image ready to be embedded as a DCT-encoded XObject.
struct PageImage {
    width: u32,
    height: u32,
    color_space: &'static str,
    jpeg: Vec<u8>,
}

/// Builds one PDF page per slide image.
#[derive(Debug, Clone)]
pub struct PdfAssembler {
    resolution: f32,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl PdfAssembler {
    /// Create an assembler rendering pages at 100 DPI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution in pixels per inch.
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        if resolution > 0.0 {
            self.resolution = resolution;
        }
        self
    }

    /// Assemble the slide images of a presentation into `{folder}/{folder}.pdf`.
    pub fn assemble_presentation(
        &self,
        layout: &PresentationLayout,
        manifest: &Manifest,
        size: &ImageSize,
    ) -> Result<PathBuf> {
        let images = layout.image_paths(manifest, size);
        let output = layout.pdf_path();
        self.assemble(&images, &output)?;
        Ok(output)
    }

    /// Write `images`, in order, as the pages of a PDF at `output`.
    ///
    /// Every image is decoded before anything is written, so an unreadable
    /// image leaves no PDF behind. Returns the number of pages.
    pub fn assemble<P: AsRef<Path>>(&self, images: &[P], output: &Path) -> Result<usize> {
        if images.is_empty() {
            return Err(Error::NoImages);
        }

        let pages = images
            .iter()
            .map(|path| load_page_image(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut document = self.build_document(pages)?;
        let mut buffer = Vec::new();
        document
            .save_to(&mut buffer)
            .map_err(|e| Error::PdfError(e.to_string()))?;

        fs::write(output, &buffer)?;
        log::info!("wrote {} ({} pages)", output.display(), images.len());

        Ok(images.len())
    }

    fn build_document(&self, pages: Vec<PageImage>) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

        for page in pages {
            let width = page.width as f32 * 72.0 / self.resolution;
            let height = page.height as f32 * 72.0 / self.resolution;

            let image = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => page.width as i64,
                    "Height" => page.height as i64,
                    "ColorSpace" => page.color_space,
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                page.jpeg,
            )
            .with_compression(false);
            let image_id = doc.add_object(image);

            let content = Content {
                operations: vec![
                    Operation::new("q", vec![]),
                    Operation::new(
                        "cm",
                        vec![
                            width.into(),
                            0.into(),
                            0.into(),
                            height.into(),
                            0.into(),
                            0.into(),
                        ],
                    ),
                    Operation::new("Do", vec![Object::Name(IMAGE_RESOURCE.as_bytes().to_vec())]),
                    Operation::new("Q", vec![]),
                ],
            };
            let encoded = content
                .encode()
                .map_err(|e| Error::PdfError(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! {
                        IMAGE_RESOURCE => image_id,
                    },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }
}

fn decode_error(path: &Path, err: image::ImageError) -> Error {
    Error::ImageDecode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Number of colour components declared in a JPEG frame header, if any.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 1 < bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        match marker {
            // fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            // end of image or start of scan before any frame header
            0xD9 | 0xDA => return None,
            _ => {}
        }

        let length = u16::from_be_bytes([*bytes.get(pos + 2)?, *bytes.get(pos + 3)?]) as usize;
        // SOF0..SOF15, minus DHT, JPG and DAC
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            return bytes.get(pos + 9).copied();
        }
        pos += 2 + length;
    }

    None
}

/// Read and decode a slide image.
///
/// Gray and RGB JPEGs are embedded as-is when the frame header agrees with
/// the decoded colour type; anything else that decodes (CMYK/YCCK JPEGs,
/// other formats) is re-encoded as an RGB JPEG.
fn load_page_image(path: &Path) -> Result<PageImage> {
    let bytes = fs::read(path)?;
    let format = image::guess_format(&bytes).map_err(|e| decode_error(path, e))?;
    let decoded =
        image::load_from_memory_with_format(&bytes, format).map_err(|e| decode_error(path, e))?;
    let (width, height) = (decoded.width(), decoded.height());

    let passthrough = match (format, decoded.color(), jpeg_components(&bytes)) {
        (ImageFormat::Jpeg, ColorType::L8, Some(1)) => Some("DeviceGray"),
        (ImageFormat::Jpeg, ColorType::Rgb8, Some(3)) => Some("DeviceRGB"),
        _ => None,
    };

    let (color_space, jpeg) = match passthrough {
        Some(color_space) => (color_space, bytes),
        None => {
            log::debug!(
                "re-encoding {} ({:?}, {:?}) as JPEG",
                path.display(),
                format,
                decoded.color()
            );
            let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
            let mut jpeg = Vec::new();
            rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
                .map_err(|e| decode_error(path, e))?;
            ("DeviceRGB", jpeg)
        }
    };

    Ok(PageImage {
        width,
        height,
        color_space,
        jpeg,
    })
}
