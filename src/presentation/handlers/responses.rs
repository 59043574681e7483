use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    AnalysisStatus, ClaimContacts, ContractRecord, CriticalDate, Highlight,
};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Full analysis payload returned to the caller, flattening the stored
/// record the way downstream consumers expect it.
#[derive(Serialize)]
pub struct WarrantyAnalysisResponse {
    pub id: String,
    pub status: AnalysisStatus,
    pub confidence_score: f32,

    pub document_type: String,
    pub file_name: String,
    pub file_size: u64,

    pub contract_text: String,
    pub ocr_confidence: f32,
    pub page_count: usize,

    pub ai_summary: String,

    pub duration: Option<String>,
    pub duration_months: Option<u32>,
    pub start_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,

    pub coverage_items: Vec<String>,
    pub exclusions: Vec<String>,
    pub limitations: Vec<String>,

    pub claim_procedure: Option<String>,
    pub claim_contacts: ClaimContacts,
    pub required_docs: Vec<String>,

    pub critical_dates: Vec<CriticalDate>,

    pub transferable: Option<bool>,
    pub extended_options: Option<String>,

    pub critical_highlights: Vec<Highlight>,
    pub warning_highlights: Vec<Highlight>,
    pub info_highlights: Vec<Highlight>,

    pub ai_model: String,
    pub analysis_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ContractRecord> for WarrantyAnalysisResponse {
    fn from(record: &ContractRecord) -> Self {
        let analysis = &record.analysis;
        Self {
            id: record.id.as_uuid().to_string(),
            status: record.status,
            confidence_score: analysis.confidence_score,
            document_type: record.document_type.clone(),
            file_name: record.file_name.clone(),
            file_size: record.file_size,
            contract_text: record.contract_text.clone(),
            ocr_confidence: record.ocr_confidence,
            page_count: record.page_count,
            ai_summary: analysis.summary.clone(),
            duration: analysis.duration.clone(),
            duration_months: analysis.duration_months,
            start_date: record.start_date,
            expiry_date: record.expiry_date,
            coverage_items: analysis.coverage_items.clone(),
            exclusions: analysis.exclusions.clone(),
            limitations: analysis.limitations.clone(),
            claim_procedure: analysis.claim_procedure.clone(),
            claim_contacts: analysis.claim_contacts.clone(),
            required_docs: analysis.required_docs.clone(),
            critical_dates: analysis.critical_dates.clone(),
            transferable: analysis.transferable,
            extended_options: analysis.extended_options.clone(),
            critical_highlights: analysis.critical_highlights.clone(),
            warning_highlights: analysis.warning_highlights.clone(),
            info_highlights: analysis.info_highlights.clone(),
            ai_model: record.model.clone(),
            analysis_date: record.updated_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
