//! Provider profile definitions

use crate::error::sanitize::mask_key;
use crate::error::{ScribeError, ScribeResult};
use crate::llm::resolver::ModelAliasTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a provider accepts structured-output instructions.
///
/// Both styles carry the same caller-supplied JSON schema; they differ only
/// in which request fields the dispatcher writes it into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredOutputStyle {
    /// Native `response_format` field with an embedded JSON schema
    JsonSchema,
    /// Synthetic function tool plus a forced `tool_choice`
    ToolCall,
}

impl Default for StructuredOutputStyle {
    fn default() -> Self {
        Self::JsonSchema
    }
}

impl fmt::Display for StructuredOutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonSchema => write!(f, "json_schema"),
            Self::ToolCall => write!(f, "tool_call"),
        }
    }
}

/// Configuration for a single chat-completion endpoint.
///
/// A profile bundles everything the dispatcher needs to talk to one
/// provider: the endpoint base URL, the bearer credential (if configured),
/// the alias table translating abstract model identifiers into this
/// provider's namespace, and the structured-output style its API speaks.
///
/// Profiles are plain data. The fallback orchestrator walks them in
/// ascending `priority` order and skips any profile without a credential,
/// so an unset API key quietly disables a provider instead of failing.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Short identifier used in logs and error messages, e.g. "openai"
    pub name: String,

    /// Base URL of the chat-completions API, without the endpoint path
    pub base_url: String,

    /// Bearer credential; `None` marks the profile ineligible for dispatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Position in the fallback order (lower runs first)
    #[serde(default)]
    pub priority: u8,

    /// Structured-output style this endpoint accepts
    #[serde(default)]
    pub output_style: StructuredOutputStyle,

    /// Model identifier translations for this provider's namespace
    #[serde(default)]
    pub aliases: ModelAliasTable,
}

impl ProviderProfile {
    /// Create a profile with the given name and base URL.
    ///
    /// The profile starts without a credential and with an empty alias
    /// table; use the `with_*` builders to fill in the rest.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: None,
            priority: 0,
            output_style: StructuredOutputStyle::default(),
            aliases: ModelAliasTable::default(),
        }
    }

    /// Set the bearer credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the fallback priority (lower runs first)
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Set the structured-output style
    pub fn with_output_style(mut self, style: StructuredOutputStyle) -> Self {
        self.output_style = style;
        self
    }

    /// Set the model alias table
    pub fn with_aliases(mut self, aliases: ModelAliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Whether this profile holds a credential and may be dispatched to
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Full URL of the chat-completions endpoint
    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Validate the profile fields.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is empty or the base URL
    /// is not an HTTP(S) URL.
    pub fn validate(&self) -> ScribeResult<()> {
        if self.name.is_empty() {
            return Err(ScribeError::config("provider profile name is empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ScribeError::config(format!(
                "provider '{}' has invalid base URL: {}",
                self.name, self.base_url
            )));
        }
        Ok(())
    }
}

// Manual Debug so a dumped profile never exposes the raw credential.
impl fmt::Debug for ProviderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderProfile")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(mask_key))
            .field("priority", &self.priority)
            .field("output_style", &self.output_style)
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let profile = ProviderProfile::new("openai", "https://api.openai.com/v1")
            .with_api_key("sk-test-key")
            .with_priority(2)
            .with_output_style(StructuredOutputStyle::ToolCall);

        assert_eq!(profile.name, "openai");
        assert_eq!(profile.priority, 2);
        assert_eq!(profile.output_style, StructuredOutputStyle::ToolCall);
        assert!(profile.has_credential());
    }

    #[test]
    fn test_missing_or_empty_key_means_no_credential() {
        let bare = ProviderProfile::new("openai", "https://api.openai.com/v1");
        assert!(!bare.has_credential());

        let empty = bare.with_api_key("");
        assert!(!empty.has_credential());
    }

    #[test]
    fn test_chat_url_joins_without_double_slash() {
        let profile = ProviderProfile::new("openrouter", "https://openrouter.ai/api/v1/");
        assert_eq!(
            profile.chat_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let profile = ProviderProfile::new("openai", "api.openai.com");
        assert!(profile.validate().is_err());

        let ok = ProviderProfile::new("openai", "https://api.openai.com/v1");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let profile = ProviderProfile::new("openai", "https://api.openai.com/v1")
            .with_api_key("sk-proj-1234567890abcdef");
        let dumped = format!("{:?}", profile);
        assert!(!dumped.contains("sk-proj-1234567890abcdef"));
        assert!(dumped.contains("sk-pro"));
    }
}
