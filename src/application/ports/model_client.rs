use async_trait::async_trait;

use crate::domain::MediaType;

/// Chat-style model invocation: one user turn, either a plain text prompt or
/// an image attachment paired with fixed instruction text. The backend is an
/// injected capability so tests can substitute a scripted client.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, ModelClientError>;
}

#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub content: UserContent,
}

#[derive(Debug, Clone)]
pub enum UserContent {
    Text(String),
    Image {
        media_type: MediaType,
        data: Vec<u8>,
        instruction: String,
    },
}

/// Ordered content blocks as returned by the model backend. Blocks without a
/// text payload (tool use, thinking) are carried but contribute nothing to
/// the concatenated reply.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub blocks: Vec<ReplyBlock>,
}

#[derive(Debug, Clone)]
pub struct ReplyBlock {
    pub text: Option<String>,
}

impl ModelReply {
    /// Concatenate all text payloads in block order to form the raw reply.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
