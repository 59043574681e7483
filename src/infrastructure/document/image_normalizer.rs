use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::application::ports::{ImageNormalizer, NormalizedImage};
use crate::domain::MediaType;

/// Longest accepted dimension before downscaling. Keeps payloads inside the
/// vision model's size envelope while preserving text legibility.
const MAX_DIMENSION: u32 = 2048;

/// Canonicalizes uploads for vision OCR: transparency flattened onto white,
/// dimensions bounded, PNG re-encoded. Best-effort only; any decode or
/// transform error falls back to the original bytes.
#[derive(Default)]
pub struct VisionImageNormalizer;

impl VisionImageNormalizer {
    pub fn new() -> Self {
        Self
    }

    fn canonicalize(data: &[u8]) -> Option<Vec<u8>> {
        let decoded = image::load_from_memory(data).ok()?;
        let flattened = DynamicImage::ImageRgb8(flatten_onto_white(&decoded));

        let longest = flattened.width().max(flattened.height());
        let bounded = if longest > MAX_DIMENSION {
            flattened.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
        } else {
            flattened
        };

        let mut png: Vec<u8> = Vec::new();
        bounded
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .ok()?;

        Some(png)
    }
}

/// Alpha-blend every pixel onto an opaque white background.
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    out
}

impl ImageNormalizer for VisionImageNormalizer {
    fn normalize(&self, data: &[u8], declared: MediaType) -> NormalizedImage {
        match Self::canonicalize(data) {
            Some(png) => NormalizedImage {
                data: png,
                media_type: MediaType::Png,
            },
            None => {
                tracing::warn!("image normalization failed, submitting original bytes");
                NormalizedImage::passthrough(data, declared)
            }
        }
    }
}
