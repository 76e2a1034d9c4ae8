//! Environment variable-based profile loading
//!
//! Builds the default fallback chain from process environment variables:
//! a direct OpenAI profile first, then an OpenRouter gateway profile.
//! Each provider reads `<PREFIX>_API_KEY` and an optional
//! `<PREFIX>_BASE_URL` override.

use crate::config::profile::{ProviderProfile, StructuredOutputStyle};
use crate::error::ScribeResult;
use crate::llm::resolver::ModelAliasTable;
use std::env;

/// Default OpenAI chat-completions base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenRouter chat-completions base URL
pub const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Load the default provider profiles from environment variables.
///
/// Both profiles are always returned, even when their API key variable is
/// unset; the orchestrator skips credential-less profiles at dispatch time.
/// The OpenAI profile runs first and uses native JSON-schema output; the
/// OpenRouter profile is the fallback gateway and uses forced tool calls,
/// with an alias table translating bare model names into the gateway's
/// `vendor/model` namespace.
pub fn load_from_env() -> ScribeResult<Vec<ProviderProfile>> {
    load_with(|name| env::var(name).ok())
}

/// Load profiles through an explicit variable lookup.
///
/// Separated from [`load_from_env`] so tests can supply their own variable
/// set without mutating process state.
pub fn load_with<F>(lookup: F) -> ScribeResult<Vec<ProviderProfile>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut openai = ProviderProfile::new(
        "openai",
        lookup("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string()),
    )
    .with_priority(0)
    .with_output_style(StructuredOutputStyle::JsonSchema);
    if let Some(key) = lookup("OPENAI_API_KEY") {
        openai = openai.with_api_key(key);
    }
    openai.validate()?;

    let mut openrouter = ProviderProfile::new(
        "openrouter",
        lookup("OPENROUTER_BASE_URL").unwrap_or_else(|| OPENROUTER_DEFAULT_BASE_URL.to_string()),
    )
    .with_priority(1)
    .with_output_style(StructuredOutputStyle::ToolCall)
    .with_aliases(gateway_aliases());
    if let Some(key) = lookup("OPENROUTER_API_KEY") {
        openrouter = openrouter.with_api_key(key);
    }
    openrouter.validate()?;

    Ok(vec![openai, openrouter])
}

/// Alias table mapping bare model names onto OpenRouter's namespace
fn gateway_aliases() -> ModelAliasTable {
    ModelAliasTable::from_pairs([
        ("gpt-4o", "openai/gpt-4o"),
        ("gpt-4o-mini", "openai/gpt-4o-mini"),
        ("claude-3-5-sonnet", "anthropic/claude-3.5-sonnet"),
        ("gemini-1.5-flash", "google/gemini-flash-1.5"),
    ])
}
