use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::warranty::{AnalysisStatus, WarrantyAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractId(Uuid);

impl ContractId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

/// A completed analysis as held by the contract store. The store itself is a
/// stub behind the `ContractRepository` port; durable backends are out of
/// scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRecord {
    pub id: ContractId,
    pub user_id: String,
    pub product_id: Option<String>,
    pub file_name: String,
    pub document_type: String,
    pub file_size: u64,
    pub contract_text: String,
    pub ocr_confidence: f32,
    pub page_count: usize,
    pub analysis: WarrantyAnalysis,
    pub start_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub model: String,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
