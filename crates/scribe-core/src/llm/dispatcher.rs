//! Single-attempt provider dispatch
//!
//! The dispatcher performs exactly one HTTP round trip per call. Fallback,
//! retries, and response repair all live in the layers above; keeping this
//! layer single-shot makes each provider attempt observable and testable
//! on its own.

use crate::config::profile::{ProviderProfile, StructuredOutputStyle};
use crate::config::timeouts::TimeoutConfig;
use crate::error::sanitize::sanitize_error_body;
use crate::error::{ScribeError, ScribeResult};
use crate::llm::request::{InvocationRequest, ToolSpec};
use crate::llm::response::ProviderResponse;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

/// Output-size bound applied when the caller did not specify one
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Dispatches one chat-completion request to one provider
#[derive(Debug, Clone)]
pub struct ProviderDispatcher {
    http: Client,
}

impl ProviderDispatcher {
    /// Create a dispatcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error when the client cannot be constructed.
    pub fn new(timeouts: &TimeoutConfig) -> ScribeResult<Self> {
        let http = Client::builder()
            .connect_timeout(timeouts.connect_timeout())
            .timeout(timeouts.request_timeout())
            .build()
            .map_err(|e| ScribeError::http(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Create a dispatcher around an existing HTTP client
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Send one chat-completion request to the given provider.
    ///
    /// `model` must already be resolved into the provider's namespace and
    /// `messages` must already be in wire format. The request supplies
    /// generation parameters, tools, and the optional output schema, which
    /// is mapped into the envelope style the profile declares.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the profile has no credential, an
    /// HTTP error when the transport fails, a provider-call error for
    /// non-success status codes (with the response body sanitized and
    /// bounded), and a JSON error when the success body does not decode.
    #[instrument(skip_all, fields(provider = %profile.name, model = %model))]
    pub async fn dispatch(
        &self,
        profile: &ProviderProfile,
        model: &str,
        messages: Vec<Value>,
        request: &InvocationRequest,
    ) -> ScribeResult<ProviderResponse> {
        let api_key = profile.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            ScribeError::config(format!("provider '{}' has no API key", profile.name))
        })?;

        let url = profile.chat_url();
        let body = build_request_body(profile, model, messages, request);

        debug!("sending chat completion request");
        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ScribeError::http(format!("request to '{}' failed: {}", profile.name, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "provider call failed");
            return Err(ScribeError::provider_call(
                &profile.name,
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown"),
                sanitize_error_body(&raw_body),
            ));
        }

        let decoded: Value = response.json().await.map_err(|e| {
            ScribeError::json(format!(
                "failed to decode '{}' response body: {}",
                profile.name, e
            ))
        })?;

        info!("provider call succeeded");
        Ok(ProviderResponse::new(&profile.name, model, decoded))
    }
}

/// Assemble the request body for one provider call.
///
/// The caller-facing request never mentions provider envelope styles; the
/// schema directive is written here, into whichever fields the profile's
/// style requires.
pub(crate) fn build_request_body(
    profile: &ProviderProfile,
    model: &str,
    messages: Vec<Value>,
    request: &InvocationRequest,
) -> Value {
    let mut body = json!({
        "model": model,
        "messages": messages,
        "max_tokens": request.params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
    });

    if let Some(temperature) = request.params.temperature {
        body["temperature"] = json!(temperature);
    }

    let mut tools: Vec<Value> = request.tools.iter().flatten().map(tool_to_wire).collect();

    if let Some(schema) = &request.output_schema {
        match profile.output_style {
            StructuredOutputStyle::JsonSchema => {
                body["response_format"] = json!({
                    "type": "json_schema",
                    "json_schema": {
                        "name": schema.name,
                        "schema": schema.schema,
                        "strict": true,
                    }
                });
            }
            StructuredOutputStyle::ToolCall => {
                tools.push(json!({
                    "type": "function",
                    "function": {
                        "name": schema.name,
                        "description": "Return the structured result.",
                        "parameters": schema.schema,
                    }
                }));
                body["tool_choice"] = json!({
                    "type": "function",
                    "function": {"name": schema.name}
                });
            }
        }
    }

    if !tools.is_empty() {
        body["tools"] = json!(tools);
    }

    body
}

fn tool_to_wire(tool: &ToolSpec) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}
