//! Provider fallback orchestration
//!
//! Walks the configured profiles in priority order and returns the first
//! successful response. Each eligible provider gets exactly one attempt
//! per invocation; per-provider retry belongs to the caller's retry
//! policy, not here, so a flaky primary cannot starve the fallback chain.

use crate::config::env_loader::load_from_env;
use crate::config::profile::ProviderProfile;
use crate::config::timeouts::TimeoutConfig;
use crate::error::{ScribeError, ScribeResult};
use crate::llm::dispatcher::ProviderDispatcher;
use crate::llm::normalizer::MessageNormalizer;
use crate::llm::request::InvocationRequest;
use crate::llm::response::ProviderResponse;
use tracing::{debug, info, instrument, warn};

/// Tries providers in priority order until one answers
#[derive(Debug, Clone)]
pub struct FallbackOrchestrator {
    profiles: Vec<ProviderProfile>,
    dispatcher: ProviderDispatcher,
}

impl FallbackOrchestrator {
    /// Create an orchestrator over the given profiles.
    ///
    /// Profiles are sorted by ascending priority; ties keep their given
    /// order.
    pub fn new(mut profiles: Vec<ProviderProfile>, dispatcher: ProviderDispatcher) -> Self {
        profiles.sort_by_key(|p| p.priority);
        Self {
            profiles,
            dispatcher,
        }
    }

    /// Build the default orchestrator from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a profile fails validation, or
    /// an HTTP error when the client cannot be constructed.
    pub fn from_env() -> ScribeResult<Self> {
        let profiles = load_from_env()?;
        let dispatcher = ProviderDispatcher::new(&TimeoutConfig::default())?;
        Ok(Self::new(profiles, dispatcher))
    }

    /// The configured profiles in fallback order
    pub fn profiles(&self) -> &[ProviderProfile] {
        &self.profiles
    }

    /// Invoke the model, falling back across providers on failure.
    ///
    /// Profiles without a credential are skipped without a network call.
    /// When every eligible provider fails, the error wraps the last
    /// provider failure so the terminal message names a concrete cause.
    ///
    /// # Errors
    ///
    /// Returns a providers-exhausted error when no provider produced a
    /// response, including when none was eligible to begin with.
    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn invoke(&self, request: &InvocationRequest) -> ScribeResult<ProviderResponse> {
        let wire_messages = MessageNormalizer::to_wire(&request.messages);
        let mut last_error: Option<ScribeError> = None;

        for profile in &self.profiles {
            if !profile.has_credential() {
                debug!(provider = %profile.name, "skipping provider without credential");
                continue;
            }

            let model = profile.aliases.resolve(&request.model);
            match self
                .dispatcher
                .dispatch(profile, model, wire_messages.clone(), request)
                .await
            {
                Ok(response) => {
                    if last_error.is_some() {
                        info!(provider = %profile.name, "fallback provider answered");
                    }
                    return Ok(response);
                }
                Err(error) => {
                    warn!(provider = %profile.name, error = %error, "provider attempt failed");
                    last_error = Some(error);
                }
            }
        }

        let message = match last_error {
            Some(error) => format!("all providers failed, last error: {}", error),
            None => "no provider has a credential configured".to_string(),
        };
        Err(ScribeError::providers_exhausted(message))
    }
}
