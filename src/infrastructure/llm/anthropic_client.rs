use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{
    ModelClient, ModelClientError, ModelReply, ModelRequest, ReplyBlock, UserContent,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Messages-API backend for both vision OCR and structured extraction.
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn content_json(content: &UserContent) -> serde_json::Value {
        match content {
            UserContent::Text(prompt) => serde_json::json!([
                { "type": "text", "text": prompt }
            ]),
            UserContent::Image {
                media_type,
                data,
                instruction,
            } => {
                let b64 = general_purpose::STANDARD.encode(data);
                serde_json::json!([
                    {
                        "type": "image",
                        "source": {
                            "type": "base64",
                            "media_type": media_type.as_mime(),
                            "data": b64,
                        }
                    },
                    { "type": "text", "text": instruction }
                ])
            }
        }
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ModelClient for AnthropicClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, ModelClientError> {
        let mut body = serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "messages": [
                { "role": "user", "content": Self::content_json(&request.content) }
            ],
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ModelClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ModelClientError::ApiRequestFailed(format!(
                "{status}: {text}"
            )));
        }

        let decoded: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ModelClientError::InvalidResponse(e.to_string()))?;

        Ok(ModelReply {
            blocks: decoded
                .content
                .into_iter()
                .map(|block| ReplyBlock { text: block.text })
                .collect(),
        })
    }
}
