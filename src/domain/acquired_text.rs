/// Output of the text-acquisition stage: plain contract text plus a
/// per-path confidence score and the number of pages actually processed.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredText {
    pub text: String,
    pub confidence: f32,
    pub page_count: usize,
}

impl AcquiredText {
    pub fn new(text: String, confidence: f32, page_count: usize) -> Self {
        Self {
            text,
            confidence,
            page_count,
        }
    }
}
