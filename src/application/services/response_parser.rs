use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::WarrantyAnalysis;

/// Summary text of the minimal result returned when a reply cannot be
/// decoded at all.
pub const ANALYSIS_FAILURE_SUMMARY: &str = "Failed to analyze warranty contract";

/// Turn a raw model reply into a well-formed analysis.
///
/// This never fails outward: the model call is the expensive, non-retryable
/// step, so a formatting hiccup degrades the confidence score instead of
/// discarding the reply. Two tiers of degradation let consumers tell partial
/// trust from total failure: a decoded payload with a missing or out-of-range
/// confidence_score gets exactly 0.5, an undecodable payload yields the
/// minimal result with exactly 0.1.
pub fn parse_analysis_reply(raw: &str) -> WarrantyAnalysis {
    let payload = json_candidate(raw);

    let fields = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "model reply decoded to a non-object");
            return failed_analysis();
        }
        Err(e) => {
            tracing::warn!(error = %e, "model reply is not valid JSON");
            return failed_analysis();
        }
    };

    let confidence_score = match fields.get("confidence_score").and_then(Value::as_f64) {
        Some(score) if (0.0..=1.0).contains(&score) => score as f32,
        reported => {
            tracing::warn!(?reported, "confidence_score missing or out of range, using 0.5");
            0.5
        }
    };

    WarrantyAnalysis {
        summary: string_field(&fields, "summary"),
        duration: optional_string(&fields, "duration"),
        duration_months: fields
            .get("duration_months")
            .and_then(Value::as_u64)
            .map(|m| m as u32),
        coverage_items: string_list(&fields, "coverage_items"),
        exclusions: string_list(&fields, "exclusions"),
        limitations: string_list(&fields, "limitations"),
        claim_procedure: optional_string(&fields, "claim_procedure"),
        claim_contacts: structured_field(&fields, "claim_contacts"),
        required_docs: string_list(&fields, "required_docs"),
        critical_dates: structured_field(&fields, "critical_dates"),
        transferable: fields.get("transferable").and_then(Value::as_bool),
        extended_options: optional_string(&fields, "extended_options"),
        critical_highlights: structured_field(&fields, "critical_highlights"),
        warning_highlights: structured_field(&fields, "warning_highlights"),
        info_highlights: structured_field(&fields, "info_highlights"),
        confidence_score,
    }
}

/// Candidate JSON payload: the span from the first `{` to the last `}`, to
/// shed any prose the model wrapped around its answer. Falls back to the
/// whole reply when no brace pair exists. Greedy by choice; a reply whose
/// prose itself contains stray braces can defeat this.
fn json_candidate(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

fn failed_analysis() -> WarrantyAnalysis {
    WarrantyAnalysis {
        summary: ANALYSIS_FAILURE_SUMMARY.to_string(),
        duration: None,
        duration_months: None,
        coverage_items: Vec::new(),
        exclusions: Vec::new(),
        limitations: Vec::new(),
        claim_procedure: None,
        claim_contacts: Default::default(),
        required_docs: Vec::new(),
        critical_dates: Vec::new(),
        transferable: None,
        extended_options: None,
        critical_highlights: Vec::new(),
        warning_highlights: Vec::new(),
        info_highlights: Vec::new(),
        confidence_score: 0.1,
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Decode a nested structure, degrading to its empty default when the value
/// is missing or malformed.
fn structured_field<T>(fields: &Map<String, Value>, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    fields
        .get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
