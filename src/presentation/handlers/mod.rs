mod analyze;
mod health;
mod responses;
mod warranty;

pub use analyze::analyze_handler;
pub use health::{health_handler, root_handler};
pub use responses::{ErrorResponse, WarrantyAnalysisResponse};
pub use warranty::{ReanalyzeRequest, get_warranty_handler, reanalyze_handler};
