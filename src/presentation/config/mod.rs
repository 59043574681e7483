mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CorsSettings, LlmSettings, ServerSettings, Settings, SettingsError, UploadSettings,
};
