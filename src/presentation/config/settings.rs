use std::str::FromStr;

use super::Environment;

/// Immutable process configuration, read once at startup from environment
/// variables and passed into each component at construction.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub upload: UploadSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| SettingsError::MissingVar("ANTHROPIC_API_KEY"))?;

        let environment = Environment::try_from(var_or("ENVIRONMENT", "development"))
            .map_err(|value| SettingsError::InvalidVar {
                name: "ENVIRONMENT",
                value,
            })?;

        Ok(Self {
            environment,
            server: ServerSettings {
                host: var_or("SERVICE_HOST", "0.0.0.0"),
                port: parsed_var("SERVICE_PORT", 8001)?,
            },
            llm: LlmSettings {
                api_key,
                model: var_or("CLAUDE_MODEL", "claude-3-5-sonnet-20241022"),
                max_tokens: parsed_var("CLAUDE_MAX_TOKENS", 4096)?,
                temperature: parsed_var("CLAUDE_TEMPERATURE", 0.3)?,
            },
            upload: UploadSettings {
                max_file_size_bytes: parsed_var("MAX_FILE_SIZE", 10_485_760)?,
            },
            cors: CorsSettings {
                allowed_origins: var_or(
                    "ALLOWED_ORIGINS",
                    "http://localhost:3000,http://localhost:3001",
                )
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            },
        })
    }
}

fn var_or(name: &'static str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_var<T: FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| SettingsError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}
