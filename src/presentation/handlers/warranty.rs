use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;

use crate::application::ports::ModelClient;
use crate::domain::{AnalysisStatus, ContractId, warranty_window};
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, WarrantyAnalysisResponse};

#[tracing::instrument(skip(state))]
pub async fn get_warranty_handler<M: ModelClient + 'static>(
    State(state): State<AppState<M>>,
    Path(warranty_id): Path<String>,
) -> Response {
    let Some(id) = ContractId::parse(&warranty_id) else {
        return not_found(&warranty_id);
    };

    match state.contract_repository.get(id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(WarrantyAnalysisResponse::from(&record)),
        )
            .into_response(),
        Ok(None) => not_found(&warranty_id),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load warranty contract");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load warranty contract".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReanalyzeRequest {
    pub warranty_id: String,
    pub user_id: String,
}

/// Re-run structured extraction over the stored contract text, e.g. after a
/// model upgrade or a low-confidence first pass. Acquisition is not repeated;
/// the text on record is the input.
#[tracing::instrument(skip(state, request), fields(warranty_id = %request.warranty_id))]
pub async fn reanalyze_handler<M: ModelClient + 'static>(
    State(state): State<AppState<M>>,
    Json(request): Json<ReanalyzeRequest>,
) -> Response {
    tracing::info!(user_id = %request.user_id, "Reanalyzing warranty contract");

    let Some(id) = ContractId::parse(&request.warranty_id) else {
        return not_found(&request.warranty_id);
    };

    let record = match state.contract_repository.get(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found(&request.warranty_id),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load warranty contract");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load warranty contract".to_string(),
                }),
            )
                .into_response();
        }
    };

    let analysis = match state.analysis_service.analyze(&record.contract_text).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!(error = %e, "Reanalysis model call failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Failed to reanalyze warranty: {}", e),
                }),
            )
                .into_response();
        }
    };

    let (start_date, expiry_date) = warranty_window(analysis.duration_months, None);

    let mut updated = record;
    updated.analysis = analysis;
    updated.start_date = start_date;
    updated.expiry_date = expiry_date;
    updated.model = state.settings.llm.model.clone();
    updated.status = AnalysisStatus::Completed;
    updated.updated_at = Utc::now();

    if let Err(e) = state.contract_repository.update(&updated).await {
        tracing::error!(error = %e, "Failed to store reanalysis");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to store reanalysis".to_string(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(WarrantyAnalysisResponse::from(&updated)),
    )
        .into_response()
}

fn not_found(warranty_id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Warranty contract {} not found", warranty_id),
        }),
    )
        .into_response()
}
