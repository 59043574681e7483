use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::{PdfRasterizeError, PdfRasterizer};

const RASTERIZE_TIMEOUT: Duration = Duration::from_secs(300);
const RENDER_DPI: f32 = 200.0;

/// Renders leading PDF pages to PNG via the system pdfium library for the
/// scanned-document OCR path.
#[derive(Default)]
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Probe the system library so a missing capability surfaces at startup
    /// rather than on the first scanned document.
    pub fn available() -> bool {
        Pdfium::bind_to_system_library().is_ok()
    }

    fn render_pages(data: &[u8], max_pages: usize) -> Result<Vec<Vec<u8>>, PdfRasterizeError> {
        let pdfium = Pdfium::new(Pdfium::bind_to_system_library().map_err(|e| {
            PdfRasterizeError::Unavailable(format!("pdfium bind failed: {e}"))
        })?);

        let doc = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| PdfRasterizeError::Failed(format!("pdfium open failed: {e}")))?;

        let page_count = doc.pages().len() as usize;
        let pages_to_render = page_count.min(max_pages);

        let mut png_buffers: Vec<Vec<u8>> = Vec::with_capacity(pages_to_render);

        for index in 0..pages_to_render {
            let page = doc.pages().get(index as u16).map_err(|e| {
                PdfRasterizeError::Failed(format!("page {index} access failed: {e}"))
            })?;

            let width = (page.width().value * RENDER_DPI / 72.0) as i32;
            let height = (page.height().value * RENDER_DPI / 72.0) as i32;

            let bitmap = page
                .render_with_config(
                    &PdfRenderConfig::new()
                        .set_target_width(width)
                        .set_target_height(height),
                )
                .map_err(|e| {
                    PdfRasterizeError::Failed(format!("render page {index} failed: {e}"))
                })?;

            let mut png_bytes: Vec<u8> = Vec::new();
            bitmap
                .as_image()
                .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
                .map_err(|e| {
                    PdfRasterizeError::Failed(format!("PNG encode page {index} failed: {e}"))
                })?;

            png_buffers.push(png_bytes);
        }

        Ok(png_buffers)
    }
}

#[async_trait]
impl PdfRasterizer for PdfiumRasterizer {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn rasterize(
        &self,
        data: &[u8],
        max_pages: usize,
    ) -> Result<Vec<Vec<u8>>, PdfRasterizeError> {
        let data_owned = data.to_vec();

        tokio::time::timeout(
            RASTERIZE_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                std::panic::catch_unwind(|| Self::render_pages(&data_owned, max_pages))
                    .unwrap_or_else(|_| {
                        Err(PdfRasterizeError::Failed(
                            "OOM or panic during PDF rasterization".to_string(),
                        ))
                    })
            }),
        )
        .await
        .map_err(|_| PdfRasterizeError::Failed("PDF rasterization timed out".to_string()))?
        .map_err(|e| PdfRasterizeError::Failed(format!("task join error: {e}")))?
    }
}
