use async_trait::async_trait;

/// Rasterization capability for scanned PDFs: render up to `max_pages`
/// leading pages as PNG buffers for vision OCR.
#[async_trait]
pub trait PdfRasterizer: Send + Sync {
    async fn rasterize(
        &self,
        data: &[u8],
        max_pages: usize,
    ) -> Result<Vec<Vec<u8>>, PdfRasterizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfRasterizeError {
    /// The rendering backend could not be loaded at all. Distinguished from
    /// a per-document failure so callers can surface a capability error
    /// instead of blaming the document.
    #[error("rasterizer unavailable: {0}")]
    Unavailable(String),
    #[error("rasterization failed: {0}")]
    Failed(String),
}
