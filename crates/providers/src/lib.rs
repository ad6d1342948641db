//! Model provider implementations for LoreSeek.
//!
//! All providers implement the `loreseek_core::Provider` trait. The
//! orchestration loop only ever sees the trait object.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;

use loreseek_config::AppConfig;
use loreseek_core::Provider;

/// Build the model provider from configuration.
///
/// Credentials and the base URL come from config; nothing downstream
/// reads the environment.
pub fn from_config(config: &AppConfig) -> Arc<dyn Provider> {
    let api_key = config.api_key.clone().unwrap_or_default();
    Arc::new(OpenAiCompatProvider::new("openai", &config.api_url, api_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_configured_url() {
        let config = AppConfig {
            api_url: "http://localhost:8000/v1".into(),
            ..AppConfig::default()
        };
        let provider = from_config(&config);
        assert_eq!(provider.name(), "openai");
    }
}
