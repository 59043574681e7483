use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Structured warranty terms extracted from one model call.
///
/// The invariant maintained by the response parser is that `confidence_score`
/// always lands in [0, 1]: 0.5 replaces a decoded-but-invalid score, 0.1
/// marks a reply that could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarrantyAnalysis {
    pub summary: String,
    pub duration: Option<String>,
    pub duration_months: Option<u32>,
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
    pub confidence_score: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimContacts {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

/// A deadline or other date the contract attaches consequences to.
/// `kind` carries the model's classification, e.g. "registration_deadline",
/// "expiry", "inspection_required".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalDate {
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A short categorized excerpt surfaced to end users separately from the
/// full field set. `importance` ranges 1 (minor) to 5 (must-know).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub category: String,
    pub icon: String,
    pub importance: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    Processing,
    Completed,
    NeedsReview,
    Failed,
    Reanalyzing,
}

/// Fixed 30-day month approximation used for derived dates. Not
/// calendar-accurate by design.
const DAYS_PER_MONTH: i64 = 30;

/// Derive the warranty start and expiry dates from a month-normalized
/// duration. Returns `(None, None)` for a lifetime/unknown duration. The
/// start date falls back to "now" when no purchase date is supplied.
pub fn warranty_window(
    duration_months: Option<u32>,
    purchase_date: Option<DateTime<Utc>>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let Some(months) = duration_months else {
        return (None, None);
    };

    let start = purchase_date.unwrap_or_else(Utc::now);
    let expiry = start + Duration::days(i64::from(months) * DAYS_PER_MONTH);

    (Some(start), Some(expiry))
}
