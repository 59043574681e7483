use std::sync::Arc;

use async_trait::async_trait;

use warranty_analyzer::application::ports::{
    ExtractedPages, ImageNormalizer, NormalizedImage, PdfRasterizeError, PdfRasterizer,
    PdfTextError, PdfTextExtractor, UserContent,
};
use warranty_analyzer::application::services::{AcquisitionError, AcquisitionService};
use warranty_analyzer::domain::MediaType;
use warranty_analyzer::infrastructure::llm::MockModelClient;

struct StubPdfText {
    pages: Vec<&'static str>,
}

#[async_trait]
impl PdfTextExtractor for StubPdfText {
    async fn extract_pages(&self, _data: &[u8]) -> Result<ExtractedPages, PdfTextError> {
        Ok(ExtractedPages {
            pages: self.pages.iter().map(|p| p.to_string()).collect(),
        })
    }
}

struct FailingPdfText;

#[async_trait]
impl PdfTextExtractor for FailingPdfText {
    async fn extract_pages(&self, _data: &[u8]) -> Result<ExtractedPages, PdfTextError> {
        Err(PdfTextError::ExtractionFailed("corrupt file".to_string()))
    }
}

/// Pretends the document has `document_pages` pages and honors the cap the
/// way a real renderer would: only the leading pages come back.
struct StubRasterizer {
    document_pages: usize,
}

#[async_trait]
impl PdfRasterizer for StubRasterizer {
    async fn rasterize(
        &self,
        _data: &[u8],
        max_pages: usize,
    ) -> Result<Vec<Vec<u8>>, PdfRasterizeError> {
        Ok((0..self.document_pages.min(max_pages))
            .map(|i| vec![i as u8; 8])
            .collect())
    }
}

struct PassthroughNormalizer;

impl ImageNormalizer for PassthroughNormalizer {
    fn normalize(&self, data: &[u8], declared: MediaType) -> NormalizedImage {
        NormalizedImage::passthrough(data, declared)
    }
}

fn service_with(
    pdf_text: Arc<dyn PdfTextExtractor>,
    rasterizer: Option<Arc<dyn PdfRasterizer>>,
    model_client: Arc<MockModelClient>,
) -> AcquisitionService<MockModelClient> {
    AcquisitionService::new(
        pdf_text,
        rasterizer,
        Arc::new(PassthroughNormalizer),
        model_client,
    )
}

const LONG_PAGE: &str = "This limited warranty covers defects in materials and workmanship \
for a period of twenty-four months from the original date of purchase.";

#[tokio::test]
async fn given_pdf_with_native_text_when_extracting_then_no_model_call_is_made() {
    let model = Arc::new(MockModelClient::new(Vec::<String>::new()));
    let service = service_with(
        Arc::new(StubPdfText {
            pages: vec![LONG_PAGE, LONG_PAGE],
        }),
        None,
        Arc::clone(&model),
    );

    let acquired = service.extract(b"%PDF-", "application/pdf").await.unwrap();

    assert_eq!(model.call_count(), 0);
    assert_eq!(acquired.page_count, 2);
    assert_eq!(acquired.confidence, 0.95);
    assert!(acquired.text.starts_with("--- Page 1 ---"));
    assert!(acquired.text.contains("--- Page 2 ---"));
}

#[tokio::test]
async fn given_native_text_between_thresholds_when_extracting_then_confidence_is_lower() {
    // Over the 50-char scanned threshold (markers included) but at most 100.
    let page = "Ninety day warranty on all parts and labor included.";
    let model = Arc::new(MockModelClient::new(Vec::<String>::new()));
    let service = service_with(
        Arc::new(StubPdfText { pages: vec![page] }),
        None,
        Arc::clone(&model),
    );

    let acquired = service.extract(b"%PDF-", "application/pdf").await.unwrap();

    assert!(acquired.text.len() <= 100);
    assert_eq!(acquired.confidence, 0.7);
    assert_eq!(acquired.page_count, 1);
}

#[tokio::test]
async fn given_pdf_with_under_threshold_text_when_extracting_then_ocr_fallback_runs() {
    let model = Arc::new(MockModelClient::repeating(LONG_PAGE));
    let service = service_with(
        Arc::new(StubPdfText { pages: vec![""] }),
        Some(Arc::new(StubRasterizer { document_pages: 2 })),
        Arc::clone(&model),
    );

    let acquired = service.extract(b"%PDF-", "application/pdf").await.unwrap();

    assert_eq!(model.call_count(), 2);
    assert_eq!(acquired.page_count, 2);
    assert_eq!(acquired.confidence, 0.85);
    assert!(acquired.text.contains("--- Page 1 ---"));
    assert!(acquired.text.contains("--- Page 2 ---"));
}

#[tokio::test]
async fn given_fifteen_page_scanned_pdf_when_extracting_then_only_first_ten_are_ocrd() {
    let model = Arc::new(MockModelClient::repeating("page text from vision"));
    let service = service_with(
        Arc::new(StubPdfText { pages: vec![] }),
        Some(Arc::new(StubRasterizer { document_pages: 15 })),
        Arc::clone(&model),
    );

    let acquired = service.extract(b"%PDF-", "application/pdf").await.unwrap();

    assert_eq!(model.call_count(), 10);
    assert_eq!(acquired.page_count, 10);
    assert!(acquired.text.contains("--- Page 10 ---"));
    assert!(!acquired.text.contains("--- Page 11 ---"));
}

#[tokio::test]
async fn given_short_ocr_output_when_extracting_scanned_pdf_then_confidence_drops() {
    let model = Arc::new(MockModelClient::new(["WARRANTY"]));
    let service = service_with(
        Arc::new(StubPdfText { pages: vec![""] }),
        Some(Arc::new(StubRasterizer { document_pages: 1 })),
        Arc::clone(&model),
    );

    let acquired = service.extract(b"%PDF-", "application/pdf").await.unwrap();

    assert!(acquired.text.len() <= 100);
    assert_eq!(acquired.confidence, 0.6);
}

#[tokio::test]
async fn given_scanned_pdf_without_rasterizer_when_extracting_then_missing_capability() {
    let model = Arc::new(MockModelClient::new(Vec::<String>::new()));
    let service = service_with(
        Arc::new(StubPdfText { pages: vec![""] }),
        None,
        Arc::clone(&model),
    );

    let result = service.extract(b"%PDF-", "application/pdf").await;

    assert!(matches!(result, Err(AcquisitionError::MissingCapability(_))));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn given_unknown_media_type_when_extracting_then_hard_failure() {
    let model = Arc::new(MockModelClient::new(Vec::<String>::new()));
    let service = service_with(Arc::new(StubPdfText { pages: vec![] }), None, model);

    let result = service.extract(b"GIF89a", "image/gif").await;

    assert!(matches!(
        result,
        Err(AcquisitionError::UnsupportedMediaType(ref mime)) if mime == "image/gif"
    ));
}

#[tokio::test]
async fn given_corrupt_pdf_when_extracting_then_extraction_failure() {
    let model = Arc::new(MockModelClient::new(Vec::<String>::new()));
    let service = service_with(Arc::new(FailingPdfText), None, model);

    let result = service.extract(b"not a pdf", "application/pdf").await;

    assert!(matches!(result, Err(AcquisitionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_legible_image_when_extracting_then_single_ocr_call_with_high_confidence() {
    let model = Arc::new(MockModelClient::new([LONG_PAGE]));
    let service = service_with(
        Arc::new(StubPdfText { pages: vec![] }),
        None,
        Arc::clone(&model),
    );

    let acquired = service.extract(b"\x89PNG", "image/png").await.unwrap();

    assert_eq!(model.call_count(), 1);
    assert_eq!(acquired.page_count, 1);
    assert_eq!(acquired.confidence, 0.88);
    assert_eq!(acquired.text, LONG_PAGE);

    let requests = model.requests();
    assert!(matches!(
        requests[0].content,
        UserContent::Image {
            media_type: MediaType::Png,
            ..
        }
    ));
}

#[tokio::test]
async fn given_barely_legible_image_when_extracting_then_low_confidence() {
    let model = Arc::new(MockModelClient::new(["90 days"]));
    let service = service_with(Arc::new(StubPdfText { pages: vec![] }), None, model);

    let acquired = service.extract(b"\xff\xd8\xff", "image/jpg").await.unwrap();

    assert_eq!(acquired.confidence, 0.65);
    assert_eq!(acquired.page_count, 1);
}

#[tokio::test]
async fn given_model_failure_during_image_ocr_when_extracting_then_model_call_error() {
    // No scripted replies: the mock reports an API failure on first use.
    let model = Arc::new(MockModelClient::new(Vec::<String>::new()));
    let service = service_with(Arc::new(StubPdfText { pages: vec![] }), None, model);

    let result = service.extract(b"\x89PNG", "image/png").await;

    assert!(matches!(result, Err(AcquisitionError::ModelCall(_))));
}

#[tokio::test]
async fn given_every_acquisition_path_when_extracting_then_confidence_stays_in_range() {
    let cases: Vec<(Arc<dyn PdfTextExtractor>, &str, Vec<&str>)> = vec![
        (
            Arc::new(StubPdfText {
                pages: vec![LONG_PAGE],
            }),
            "application/pdf",
            vec![],
        ),
        (
            Arc::new(StubPdfText { pages: vec![""] }),
            "application/pdf",
            vec![LONG_PAGE],
        ),
        (Arc::new(StubPdfText { pages: vec![] }), "image/png", vec![LONG_PAGE]),
    ];

    for (pdf_text, mime, replies) in cases {
        let model = Arc::new(MockModelClient::new(replies));
        let service = service_with(
            pdf_text,
            Some(Arc::new(StubRasterizer { document_pages: 1 })),
            model,
        );

        let acquired = service.extract(b"data", mime).await.unwrap();
        assert!((0.0..=1.0).contains(&acquired.confidence));
        assert!(acquired.page_count >= 1);
    }
}
