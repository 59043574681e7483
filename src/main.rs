use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use warranty_analyzer::application::ports::PdfRasterizer;
use warranty_analyzer::application::services::{AcquisitionService, AnalysisService};
use warranty_analyzer::infrastructure::document::{
    PdfTextAdapter, PdfiumRasterizer, VisionImageNormalizer,
};
use warranty_analyzer::infrastructure::llm::AnthropicClient;
use warranty_analyzer::infrastructure::observability::{TracingConfig, init_tracing};
use warranty_analyzer::infrastructure::persistence::InMemoryContractRepository;
use warranty_analyzer::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(
        TracingConfig {
            environment: settings.environment.to_string(),
            ..TracingConfig::default()
        },
        settings.server.port,
    );

    let model_client = Arc::new(AnthropicClient::new(
        &settings.llm.api_key,
        &settings.llm.model,
    ));

    let rasterizer: Option<Arc<dyn PdfRasterizer>> = if PdfiumRasterizer::available() {
        Some(Arc::new(PdfiumRasterizer::new()))
    } else {
        tracing::warn!("pdfium not available, scanned PDFs cannot be OCR'd");
        None
    };

    let acquisition_service = Arc::new(AcquisitionService::new(
        Arc::new(PdfTextAdapter::new()),
        rasterizer,
        Arc::new(VisionImageNormalizer::new()),
        Arc::clone(&model_client),
    ));

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::clone(&model_client),
        settings.llm.max_tokens,
        settings.llm.temperature,
    ));

    let state = AppState {
        acquisition_service,
        analysis_service,
        contract_repository: Arc::new(InMemoryContractRepository::new()),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let host: IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
