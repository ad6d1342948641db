//! Error types for the LoreSeek domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Propagation policy: tool-level faults are absorbed into the conversation
//! as error-bearing tool results so the model can see and react to them.
//! Only provider faults escape to the caller; configuration faults are
//! `loreseek_config::ConfigError` and never get past startup.

use thiserror::Error;

/// The top-level error type for all LoreSeek operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors (fatal to the current loop invocation) ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Domain errors ---
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown research domain: '{0}'")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Tool timed out: {tool_name} after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "web_search".into(),
            reason: "provider returned 500".into(),
        });
        assert!(err.to_string().contains("web_search"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn each_bounded_context_converts_into_the_top_level_error() {
        let from_provider: Error = ProviderError::Timeout("slow".into()).into();
        assert!(matches!(from_provider, Error::Provider(_)));

        let from_domain: Error = DomainError::Unknown("Alchemy".into()).into();
        assert!(matches!(from_domain, Error::Domain(_)));

        let from_tool: Error = ToolError::NotFound("nonexistent".into()).into();
        assert!(matches!(from_tool, Error::Tool(_)));
    }

    #[test]
    fn unknown_domain_names_the_offender() {
        let err = Error::Domain(DomainError::Unknown("Alchemy".into()));
        assert!(err.to_string().contains("Alchemy"));
    }
}
