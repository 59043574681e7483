use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{ExtractedPages, PdfTextError, PdfTextExtractor};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Native PDF text extraction. Runs the parse on a blocking thread with a
/// timeout; pages without extractable text come back as empty strings so the
/// caller sees the true page count.
#[derive(Default)]
pub struct PdfTextAdapter;

impl PdfTextAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_pages(path: &std::path::Path) -> Result<Vec<String>, PdfTextError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| PdfTextError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            PdfTextError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            pages.push(doc.extract_text(page_index).unwrap_or_default());
        }

        Ok(pages)
    }
}

#[async_trait]
impl PdfTextExtractor for PdfTextAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_pages(&self, data: &[u8]) -> Result<ExtractedPages, PdfTextError> {
        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            PdfTextError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            PdfTextError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pages(&temp_path)),
        )
        .await
        .map_err(|_| PdfTextError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| PdfTextError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::debug!(page_count = pages.len(), "native PDF text read");

        Ok(ExtractedPages { pages })
    }
}
