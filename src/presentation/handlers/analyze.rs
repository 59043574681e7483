use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::application::ports::ModelClient;
use crate::application::services::AcquisitionError;
use crate::domain::{AnalysisStatus, ContractId, ContractRecord, warranty_window};
use crate::presentation::state::AppState;

use super::responses::{ErrorResponse, WarrantyAnalysisResponse};

struct UploadedFile {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler<M: ModelClient + 'static>(
    State(state): State<AppState<M>>,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<UploadedFile> = None;
    let mut user_id: Option<String> = None;
    let mut product_id: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("document").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read file: {}", e),
                        );
                    }
                };
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            Some("user_id") => {
                user_id = field.text().await.ok().filter(|t| !t.is_empty());
            }
            Some("product_id") => {
                product_id = field.text().await.ok().filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        tracing::warn!("Analyze request with no file");
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded".to_string());
    };
    let Some(user_id) = user_id else {
        return error_response(StatusCode::BAD_REQUEST, "user_id is required".to_string());
    };

    if file.data.len() as u64 > state.settings.upload.max_file_size_bytes {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "File too large. Maximum size: {:.1}MB",
                state.settings.upload.max_file_size_bytes as f64 / 1_048_576.0
            ),
        );
    }

    tracing::info!(
        filename = %file.filename,
        content_type = %file.content_type,
        bytes = file.data.len(),
        user_id = %user_id,
        "Analyzing warranty document"
    );

    let acquired = match state
        .acquisition_service
        .extract(&file.data, &file.content_type)
        .await
    {
        Ok(acquired) => acquired,
        Err(e) => return acquisition_error_response(e),
    };

    tracing::info!(
        chars = acquired.text.len(),
        confidence = acquired.confidence,
        "Text acquisition complete"
    );

    let analysis = match state.analysis_service.analyze(&acquired.text).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!(error = %e, "Warranty analysis model call failed");
            return error_response(
                StatusCode::BAD_GATEWAY,
                format!("Failed to analyze warranty: {}", e),
            );
        }
    };

    let (start_date, expiry_date) = warranty_window(analysis.duration_months, None);

    let now = Utc::now();
    let record = ContractRecord {
        id: ContractId::new(),
        user_id,
        product_id,
        file_name: file.filename,
        document_type: file.content_type,
        file_size: file.data.len() as u64,
        contract_text: acquired.text,
        ocr_confidence: acquired.confidence,
        page_count: acquired.page_count,
        analysis,
        start_date,
        expiry_date,
        model: state.settings.llm.model.clone(),
        status: AnalysisStatus::Completed,
        created_at: now,
        updated_at: now,
    };

    if let Err(e) = state.contract_repository.create(&record).await {
        tracing::error!(error = %e, "Failed to store warranty contract");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to store analysis".to_string(),
        );
    }

    tracing::info!(warranty_id = %record.id.as_uuid(), "Warranty analysis stored");

    (
        StatusCode::CREATED,
        Json(WarrantyAnalysisResponse::from(&record)),
    )
        .into_response()
}

fn acquisition_error_response(e: AcquisitionError) -> Response {
    let status = match &e {
        AcquisitionError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        AcquisitionError::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AcquisitionError::MissingCapability(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AcquisitionError::ModelCall(_) => StatusCode::BAD_GATEWAY,
    };
    tracing::warn!(error = %e, "Text acquisition failed");
    error_response(status, e.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}
