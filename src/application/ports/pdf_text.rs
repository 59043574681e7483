use async_trait::async_trait;

/// Native PDF text extraction. Returns one entry per page, in page order;
/// pages without extractable text yield an empty string so that page numbers
/// stay meaningful to the caller.
#[async_trait]
pub trait PdfTextExtractor: Send + Sync {
    async fn extract_pages(&self, data: &[u8]) -> Result<ExtractedPages, PdfTextError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPages {
    pub pages: Vec<String>,
}

impl ExtractedPages {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PdfTextError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
