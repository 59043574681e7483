mod contract_repository;
mod image_normalizer;
mod model_client;
mod pdf_rasterizer;
mod pdf_text;

pub use contract_repository::{ContractRepository, RepositoryError};
pub use image_normalizer::{ImageNormalizer, NormalizedImage};
pub use model_client::{
    ModelClient, ModelClientError, ModelReply, ModelRequest, ReplyBlock, UserContent,
};
pub use pdf_rasterizer::{PdfRasterizeError, PdfRasterizer};
pub use pdf_text::{ExtractedPages, PdfTextError, PdfTextExtractor};
