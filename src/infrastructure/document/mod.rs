mod image_normalizer;
mod pdf_text_adapter;
mod pdfium_rasterizer;

pub use image_normalizer::VisionImageNormalizer;
pub use pdf_text_adapter::PdfTextAdapter;
pub use pdfium_rasterizer::PdfiumRasterizer;
