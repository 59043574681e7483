mod acquisition_service;
mod analysis_prompt;
mod analysis_service;
mod ocr_text;
mod response_parser;

pub use acquisition_service::{AcquisitionError, AcquisitionService, OCR_INSTRUCTION};
pub use analysis_prompt::build_analysis_prompt;
pub use analysis_service::{AnalysisError, AnalysisService};
pub use ocr_text::normalize_ocr_text;
pub use response_parser::{ANALYSIS_FAILURE_SUMMARY, parse_analysis_reply};
