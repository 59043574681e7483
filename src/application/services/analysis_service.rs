use std::sync::Arc;

use crate::application::ports::{ModelClient, ModelClientError, ModelRequest, UserContent};
use crate::domain::WarrantyAnalysis;

use super::analysis_prompt::build_analysis_prompt;
use super::response_parser::parse_analysis_reply;

/// Structured-extraction stage: one prompt, one model call, one resilient
/// parse. Fails only when the model call itself does; a malformed reply is
/// absorbed into a degraded result by the parser.
pub struct AnalysisService<M: ModelClient> {
    model_client: Arc<M>,
    max_tokens: u32,
    temperature: f32,
}

impl<M: ModelClient> AnalysisService<M> {
    pub fn new(model_client: Arc<M>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            model_client,
            max_tokens,
            temperature,
        }
    }

    #[tracing::instrument(skip(self, contract_text), fields(chars = contract_text.len()))]
    pub async fn analyze(&self, contract_text: &str) -> Result<WarrantyAnalysis, AnalysisError> {
        let prompt = build_analysis_prompt(contract_text);

        let reply = self
            .model_client
            .complete(ModelRequest {
                max_tokens: self.max_tokens,
                temperature: Some(self.temperature),
                content: UserContent::Text(prompt),
            })
            .await?;

        let raw = reply.text();
        let analysis = parse_analysis_reply(&raw);

        tracing::info!(
            confidence = analysis.confidence_score,
            duration_months = ?analysis.duration_months,
            "warranty analysis complete"
        );

        Ok(analysis)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("model call: {0}")]
    ModelCall(#[from] ModelClientError),
}
