mod anthropic_client;
mod mock_model_client;

pub use anthropic_client::AnthropicClient;
pub use mock_model_client::MockModelClient;
