//! Invocation request types

use crate::llm::messages::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generation parameters forwarded to the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum output size in tokens; the dispatcher applies a default
    /// when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A JSON schema the response must conform to.
///
/// The dispatcher maps the schema into whichever structured-output
/// envelope the target provider accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Schema name surfaced to the provider
    pub name: String,
    /// The JSON schema itself
    pub schema: Value,
}

impl OutputSchema {
    /// Create a named output schema
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// A function tool offered to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Function name
    pub name: String,
    /// What the function does
    pub description: String,
    /// JSON schema of the function parameters
    pub parameters: Value,
}

impl ToolSpec {
    /// Create a tool specification
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A complete model invocation: conversation, model choice, and options.
///
/// The model identifier is abstract; each provider profile resolves it
/// into its own namespace at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Abstract model identifier, e.g. "gpt-4o"
    pub model: String,

    /// Conversation history, oldest first
    pub messages: Vec<ChatMessage>,

    /// Generation parameters
    #[serde(default)]
    pub params: GenerationParams,

    /// Response schema, when the caller wants structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchema>,

    /// Function tools offered to the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
}

impl InvocationRequest {
    /// Create a request for the given model and conversation
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            params: GenerationParams::default(),
            output_schema: None,
            tools: None,
        }
    }

    /// Set the maximum output size in tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.params.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.params.temperature = Some(temperature);
        self
    }

    /// Require structured output conforming to the given schema
    pub fn with_output_schema(mut self, schema: OutputSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Offer function tools to the model
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }
}
