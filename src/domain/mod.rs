mod acquired_text;
mod contract_record;
mod media_type;
mod warranty;

pub use acquired_text::AcquiredText;
pub use contract_record::{ContractId, ContractRecord};
pub use media_type::MediaType;
pub use warranty::{
    AnalysisStatus, ClaimContacts, CriticalDate, Highlight, WarrantyAnalysis, warranty_window,
};
