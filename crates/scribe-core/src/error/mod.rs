//! Error types for the Scribe invocation pipeline

pub mod sanitize;

use thiserror::Error;

/// Result type alias for pipeline operations
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Unified error type for the invocation and recovery pipeline.
///
/// Two variants are terminal for an invocation and reach callers:
/// [`ScribeError::ProvidersExhausted`] and [`ScribeError::ParseExhausted`].
/// [`ScribeError::ProviderCall`] is recovered internally by the fallback
/// orchestrator, which logs it and moves to the next provider.
#[derive(Error, Debug, Clone)]
pub enum ScribeError {
    /// One provider's HTTP call returned a non-success status
    #[error("{provider} call failed (status {status} {status_text}): {body}")]
    ProviderCall {
        provider: String,
        status: u16,
        status_text: String,
        body: String,
    },

    /// Every eligible provider failed, or none were eligible to try
    #[error("all providers exhausted: {message}")]
    ProvidersExhausted { message: String },

    /// Every repair strategy failed on every retry attempt
    #[error(
        "no structured value recovered after {attempts} attempt(s): {last_error}; \
         response preview: {preview}"
    )]
    ParseExhausted {
        attempts: u32,
        last_error: String,
        preview: String,
    },

    /// Configuration errors (bad or missing environment)
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Transport-level failure before any HTTP status was received
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// A response body that should be JSON could not be decoded
    #[error("JSON error: {message}")]
    Json { message: String },
}

impl ScribeError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport-level HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// Create a JSON decode error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Create a provider call failure from an HTTP status and body
    pub fn provider_call(
        provider: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::ProviderCall {
            provider: provider.into(),
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create an all-providers-exhausted error
    pub fn providers_exhausted(message: impl Into<String>) -> Self {
        Self::ProvidersExhausted {
            message: message.into(),
        }
    }

    /// Create a parse-exhausted error with a bounded text preview
    pub fn parse_exhausted(
        attempts: u32,
        last_error: impl Into<String>,
        preview: impl Into<String>,
    ) -> Self {
        Self::ParseExhausted {
            attempts,
            last_error: last_error.into(),
            preview: preview.into(),
        }
    }

    /// Whether this error ends the invocation as a whole.
    ///
    /// Non-terminal errors are recovered inside the pipeline (a failed
    /// provider call falls through to the next provider).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ProvidersExhausted { .. } | Self::ParseExhausted { .. } | Self::Config { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_call_display_includes_status_and_body() {
        let err = ScribeError::provider_call("openai", 429, "Too Many Requests", "rate limited");
        let text = err.to_string();
        assert!(text.contains("openai"));
        assert!(text.contains("429"));
        assert!(text.contains("rate limited"));
    }

    #[test]
    fn parse_exhausted_display_includes_preview() {
        let err = ScribeError::parse_exhausted(3, "all-failed: ...", "Sure, here is your JSON");
        let text = err.to_string();
        assert!(text.contains("3 attempt(s)"));
        assert!(text.contains("Sure, here is your JSON"));
    }

    #[test]
    fn terminal_classification() {
        assert!(ScribeError::providers_exhausted("x").is_terminal());
        assert!(ScribeError::parse_exhausted(1, "x", "y").is_terminal());
        assert!(!ScribeError::provider_call("p", 500, "Internal Server Error", "").is_terminal());
    }
}
