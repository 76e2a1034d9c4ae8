//! Provider response envelope

use crate::error::{ScribeError, ScribeResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A successful provider response.
///
/// The decoded body is kept as raw JSON; downstream recovery works on the
/// generated text and has no use for the rest of the envelope. The
/// provider and resolved model names record which fallback attempt
/// actually answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Profile name that produced this response
    pub provider: String,
    /// Provider-side model identifier that was invoked
    pub model: String,
    /// Decoded JSON body as returned by the provider
    pub body: Value,
}

impl ProviderResponse {
    /// Wrap a decoded provider body
    pub fn new(provider: impl Into<String>, model: impl Into<String>, body: Value) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            body,
        }
    }

    /// The generated text of the first choice.
    ///
    /// Reads `choices[0].message.content`; when the model answered through
    /// a forced tool call instead, falls back to the arguments string of
    /// the first tool call, which carries the structured payload.
    ///
    /// # Errors
    ///
    /// Returns a JSON error when the body holds neither field.
    pub fn content_text(&self) -> ScribeResult<&str> {
        let message = self
            .body
            .pointer("/choices/0/message")
            .ok_or_else(|| ScribeError::json("response body has no choices[0].message"))?;

        if let Some(text) = message.get("content").and_then(Value::as_str) {
            return Ok(text);
        }
        if let Some(arguments) = message
            .pointer("/tool_calls/0/function/arguments")
            .and_then(Value::as_str)
        {
            return Ok(arguments);
        }

        Err(ScribeError::json(
            "response message has neither content nor tool call arguments",
        ))
    }
}
