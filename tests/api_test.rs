use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use warranty_analyzer::application::ports::{
    ExtractedPages, ImageNormalizer, NormalizedImage, PdfTextError, PdfTextExtractor,
};
use warranty_analyzer::application::services::{AcquisitionService, AnalysisService};
use warranty_analyzer::domain::MediaType;
use warranty_analyzer::infrastructure::llm::MockModelClient;
use warranty_analyzer::infrastructure::persistence::InMemoryContractRepository;
use warranty_analyzer::presentation::config::{
    CorsSettings, Environment, LlmSettings, ServerSettings, Settings, UploadSettings,
};
use warranty_analyzer::presentation::{AppState, create_router};

const OCR_REPLY: &str = "LIMITED WARRANTY. This product is warranted against defects in \
materials and workmanship for 24 months from the date of original purchase.";

const ANALYSIS_REPLY: &str = r#"{
  "summary": "24 month limited warranty against defects.",
  "duration": "24 months",
  "duration_months": 24,
  "coverage_items": ["Defects in materials", "Defects in workmanship"],
  "exclusions": ["Misuse"],
  "limitations": [],
  "claim_procedure": "Contact the retailer with proof of purchase.",
  "claim_contacts": {"phone": null, "email": null, "website": null, "address": null},
  "required_docs": ["Proof of purchase"],
  "critical_dates": [],
  "transferable": null,
  "extended_options": null,
  "critical_highlights": [],
  "warning_highlights": [],
  "info_highlights": [],
  "confidence_score": 0.9
}"#;

struct StubPdfText;

#[async_trait]
impl PdfTextExtractor for StubPdfText {
    async fn extract_pages(&self, data: &[u8]) -> Result<ExtractedPages, PdfTextError> {
        Ok(ExtractedPages {
            pages: vec![String::from_utf8_lossy(data).to_string()],
        })
    }
}

struct PassthroughNormalizer;

impl ImageNormalizer for PassthroughNormalizer {
    fn normalize(&self, data: &[u8], declared: MediaType) -> NormalizedImage {
        NormalizedImage::passthrough(data, declared)
    }
}

fn test_settings(max_file_size_bytes: u64) -> Settings {
    Settings {
        environment: Environment::Development,
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: LlmSettings {
            api_key: "test-key".to_string(),
            model: "claude-test".to_string(),
            max_tokens: 1024,
            temperature: 0.0,
        },
        upload: UploadSettings {
            max_file_size_bytes,
        },
        cors: CorsSettings {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

fn app_with_limit(model: Arc<MockModelClient>, max_file_size_bytes: u64) -> Router {
    let acquisition_service = Arc::new(AcquisitionService::new(
        Arc::new(StubPdfText),
        None,
        Arc::new(PassthroughNormalizer),
        Arc::clone(&model),
    ));
    let analysis_service = Arc::new(AnalysisService::new(Arc::clone(&model), 1024, 0.0));

    let state = AppState {
        acquisition_service,
        analysis_service,
        contract_repository: Arc::new(InMemoryContractRepository::new()),
        settings: test_settings(max_file_size_bytes),
    };

    create_router(state)
}

fn app(model: Arc<MockModelClient>) -> Router {
    app_with_limit(model, 10 * 1024 * 1024)
}

const BOUNDARY: &str = "warranty-test-boundary";

fn multipart_body(file: Option<(&str, &str, &[u8])>, user_id: Option<&str>) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();

    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(user_id) = user_id {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"user_id\"\r\n\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(user_id.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn analyze_request(file: Option<(&str, &str, &[u8])>, user_id: Option<&str>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze-warranty")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(file, user_id)))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_root_request_when_calling_then_service_info_returns() {
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["service"], "Warranty Analyzer API");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn given_configured_api_key_when_checking_health_then_healthy() {
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["services"]["model"], true);
}

#[tokio::test]
async fn given_png_mentioning_24_months_when_analyzing_then_duration_extracts() {
    let model = Arc::new(MockModelClient::new([OCR_REPLY, ANALYSIS_REPLY]));
    let app = app(Arc::clone(&model));

    let response = app
        .oneshot(analyze_request(
            Some(("warranty.png", "image/png", b"\x89PNG fake image bytes")),
            Some("user-123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(model.call_count(), 2);

    let json = response_json(response).await;
    assert_eq!(json["duration_months"], 24);
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["ai_model"], "claude-test");

    let confidence = json["confidence_score"].as_f64().unwrap();
    assert!((0.0..=0.95).contains(&confidence));

    let ocr_confidence = json["ocr_confidence"].as_f64().unwrap();
    assert!((ocr_confidence - 0.88).abs() < 1e-6);
    assert_eq!(json["page_count"], 1);

    assert!(json["start_date"].is_string());
    assert!(json["expiry_date"].is_string());
}

#[tokio::test]
async fn given_unsupported_file_type_when_analyzing_then_415_without_model_spend() {
    let model = Arc::new(MockModelClient::default());
    let app = app(Arc::clone(&model));

    let response = app
        .oneshot(analyze_request(
            Some(("notes.txt", "text/plain", b"plain text")),
            Some("user-123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn given_no_file_when_analyzing_then_400() {
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(analyze_request(None, Some("user-123")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_missing_user_id_when_analyzing_then_400() {
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(analyze_request(
            Some(("warranty.png", "image/png", b"\x89PNG")),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_oversized_upload_when_analyzing_then_413() {
    let model = Arc::new(MockModelClient::default());
    let app = app_with_limit(Arc::clone(&model), 1024);

    let big = vec![0u8; 4096];
    let response = app
        .oneshot(analyze_request(
            Some(("warranty.pdf", "application/pdf", &big)),
            Some("user-123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn given_model_outage_when_analyzing_image_then_502() {
    // No scripted replies: the OCR call itself fails.
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(analyze_request(
            Some(("warranty.png", "image/png", b"\x89PNG")),
            Some("user-123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn given_unknown_warranty_id_when_fetching_then_404() {
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(
            Request::get("/warranty-contract/00000000-0000-4000-8000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_stored_analysis_when_fetching_then_record_returns() {
    let model = Arc::new(MockModelClient::new([OCR_REPLY, ANALYSIS_REPLY]));
    let app = app(Arc::clone(&model));

    let created = app
        .clone()
        .oneshot(analyze_request(
            Some(("warranty.png", "image/png", b"\x89PNG")),
            Some("user-123"),
        ))
        .await
        .unwrap();
    let created_json = response_json(created).await;
    let warranty_id = created_json["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::get(format!("/warranty-contract/{warranty_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["id"], warranty_id.as_str());
    assert_eq!(json["duration_months"], 24);
    assert_eq!(json["file_name"], "warranty.png");
}

#[tokio::test]
async fn given_stored_analysis_when_reanalyzing_then_record_updates_in_place() {
    let second_analysis = ANALYSIS_REPLY.replace("24", "12");
    let model = Arc::new(MockModelClient::new([
        OCR_REPLY.to_string(),
        ANALYSIS_REPLY.to_string(),
        second_analysis,
    ]));
    let app = app(Arc::clone(&model));

    let created = app
        .clone()
        .oneshot(analyze_request(
            Some(("warranty.png", "image/png", b"\x89PNG")),
            Some("user-123"),
        ))
        .await
        .unwrap();
    let created_json = response_json(created).await;
    let warranty_id = created_json["id"].as_str().unwrap().to_string();

    let reanalyze = app
        .clone()
        .oneshot(
            Request::post("/reanalyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    r#"{{"warranty_id": "{warranty_id}", "user_id": "user-123"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(reanalyze.status(), StatusCode::OK);
    let json = response_json(reanalyze).await;
    assert_eq!(json["duration_months"], 12);
    // Reanalysis reuses the stored text; no new OCR call is made.
    assert_eq!(model.call_count(), 3);

    let fetched = app
        .oneshot(
            Request::get(format!("/warranty-contract/{warranty_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let fetched_json = response_json(fetched).await;
    assert_eq!(fetched_json["duration_months"], 12);
}

#[tokio::test]
async fn given_reanalyze_for_unknown_id_when_posting_then_404() {
    let app = app(Arc::new(MockModelClient::default()));

    let response = app
        .oneshot(
            Request::post("/reanalyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"warranty_id": "missing", "user_id": "user-123"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
