use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::ModelClient;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn root_handler() -> impl IntoResponse {
    Json(ServiceInfoResponse {
        service: "Warranty Analyzer API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceStatuses,
}

#[derive(Serialize)]
pub struct ServiceStatuses {
    pub api: bool,
    pub model: bool,
    pub storage: bool,
}

pub async fn health_handler<M: ModelClient + 'static>(
    State(state): State<AppState<M>>,
) -> impl IntoResponse {
    let services = ServiceStatuses {
        api: true,
        model: !state.settings.llm.api_key.is_empty(),
        storage: true,
    };

    let status = if services.api && services.model && services.storage {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
            services,
        }),
    )
}
