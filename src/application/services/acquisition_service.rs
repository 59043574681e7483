use std::sync::Arc;

use crate::application::ports::{
    ImageNormalizer, ModelClient, ModelClientError, ModelRequest, PdfRasterizeError, PdfRasterizer,
    PdfTextError, PdfTextExtractor, UserContent,
};
use crate::domain::{AcquiredText, MediaType};

use super::ocr_text::normalize_ocr_text;

/// Trimmed native text shorter than this marks a PDF as scanned.
const SCANNED_TEXT_THRESHOLD: usize = 50;

/// Upper bound on rasterized pages submitted for OCR. Cost control, not
/// configurable per call.
const OCR_PAGE_CAP: usize = 10;

const OCR_MAX_TOKENS: u32 = 2048;

pub const OCR_INSTRUCTION: &str = "Extract ALL text from this warranty document image.\n\
\n\
Include:\n\
- All headings and titles\n\
- All body text and paragraphs\n\
- Tables and lists\n\
- Fine print and footnotes\n\
- Contact information\n\
- Dates and numbers\n\
\n\
Preserve the structure and formatting as much as possible.\n\
Output ONLY the extracted text, nothing else.";

/// Text-acquisition stage of the pipeline. Picks one of three strategies by
/// media type: native PDF text extraction, per-page vision OCR of a
/// rasterized scanned PDF, or a single vision OCR call for an image upload.
pub struct AcquisitionService<M: ModelClient> {
    pdf_text: Arc<dyn PdfTextExtractor>,
    rasterizer: Option<Arc<dyn PdfRasterizer>>,
    normalizer: Arc<dyn ImageNormalizer>,
    model_client: Arc<M>,
}

impl<M: ModelClient> AcquisitionService<M> {
    pub fn new(
        pdf_text: Arc<dyn PdfTextExtractor>,
        rasterizer: Option<Arc<dyn PdfRasterizer>>,
        normalizer: Arc<dyn ImageNormalizer>,
        model_client: Arc<M>,
    ) -> Self {
        Self {
            pdf_text,
            rasterizer,
            normalizer,
            model_client,
        }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(
        &self,
        data: &[u8],
        declared_mime: &str,
    ) -> Result<AcquiredText, AcquisitionError> {
        let media_type = MediaType::from_mime(declared_mime)
            .ok_or_else(|| AcquisitionError::UnsupportedMediaType(declared_mime.to_string()))?;

        match media_type {
            MediaType::Pdf => self.extract_pdf(data).await,
            MediaType::Png | MediaType::Jpeg => self.extract_image(data, media_type).await,
        }
    }

    async fn extract_pdf(&self, data: &[u8]) -> Result<AcquiredText, AcquisitionError> {
        let extracted = self.pdf_text.extract_pages(data).await?;
        let page_count = extracted.page_count();

        let parts: Vec<String> = extracted
            .pages
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(index, text)| format!("--- Page {} ---\n{}", index + 1, text))
            .collect();
        let text = parts.join("\n\n");

        if text.trim().len() < SCANNED_TEXT_THRESHOLD {
            tracing::warn!(
                chars = text.trim().len(),
                "PDF appears scanned or image-based, falling back to vision OCR"
            );
            return self.extract_scanned_pdf(data).await;
        }

        let confidence = if text.len() > 100 { 0.95 } else { 0.7 };

        tracing::info!(page_count, chars = text.len(), "native PDF text extraction complete");

        Ok(AcquiredText::new(
            text.trim().to_string(),
            confidence,
            page_count,
        ))
    }

    async fn extract_scanned_pdf(&self, data: &[u8]) -> Result<AcquiredText, AcquisitionError> {
        let rasterizer = self
            .rasterizer
            .as_ref()
            .ok_or_else(|| AcquisitionError::MissingCapability("pdf rasterization".to_string()))?;

        let pages = rasterizer
            .rasterize(data, OCR_PAGE_CAP)
            .await
            .map_err(|e| match e {
                PdfRasterizeError::Unavailable(msg) => AcquisitionError::MissingCapability(msg),
                PdfRasterizeError::Failed(msg) => AcquisitionError::ExtractionFailed(msg),
            })?;

        if pages.is_empty() {
            return Err(AcquisitionError::ExtractionFailed(
                "PDF rasterized to no pages".to_string(),
            ));
        }

        tracing::info!(page_count = pages.len(), "rasterization complete, starting vision OCR");

        let mut parts: Vec<String> = Vec::with_capacity(pages.len());
        for (index, png) in pages.iter().enumerate() {
            let page_text = self.ocr_image(png.clone(), MediaType::Png).await?;
            parts.push(format!("--- Page {} ---\n{}", index + 1, page_text));
        }

        let text = parts.join("\n\n");
        let confidence = if text.len() > 100 { 0.85 } else { 0.6 };
        let page_count = pages.len();

        Ok(AcquiredText::new(
            text.trim().to_string(),
            confidence,
            page_count,
        ))
    }

    async fn extract_image(
        &self,
        data: &[u8],
        declared: MediaType,
    ) -> Result<AcquiredText, AcquisitionError> {
        let normalized = self.normalizer.normalize(data, declared);
        let text = self
            .ocr_image(normalized.data, normalized.media_type)
            .await?;

        let confidence = if text.len() > 50 { 0.88 } else { 0.65 };

        tracing::info!(chars = text.len(), "image OCR complete");

        Ok(AcquiredText::new(text, confidence, 1))
    }

    async fn ocr_image(
        &self,
        data: Vec<u8>,
        media_type: MediaType,
    ) -> Result<String, AcquisitionError> {
        let reply = self
            .model_client
            .complete(ModelRequest {
                max_tokens: OCR_MAX_TOKENS,
                temperature: None,
                content: UserContent::Image {
                    media_type,
                    data,
                    instruction: OCR_INSTRUCTION.to_string(),
                },
            })
            .await?;

        Ok(normalize_ocr_text(&reply.text()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("missing capability: {0}")]
    MissingCapability(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("model call: {0}")]
    ModelCall(#[from] ModelClientError),
}

impl From<PdfTextError> for AcquisitionError {
    fn from(e: PdfTextError) -> Self {
        match e {
            PdfTextError::ExtractionFailed(msg) => Self::ExtractionFailed(msg),
        }
    }
}
