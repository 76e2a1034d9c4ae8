//! SDK client implementation

use scribe_core::error::ScribeResult;
use scribe_core::llm::{FallbackOrchestrator, InvocationRequest, ProviderResponse};
use scribe_core::repair::RecoveryEngine;
use serde::de::DeserializeOwned;

/// A typed generation result with its provenance.
///
/// Records which provider and model actually answered and which repair
/// strategy produced the value, so callers can log degraded paths.
#[derive(Debug, Clone)]
pub struct Generated<T> {
    /// The recovered, conforming value
    pub value: T,
    /// Profile name that answered
    pub provider: String,
    /// Provider-side model identifier that was invoked
    pub model: String,
    /// Repair strategy that produced the value
    pub strategy: &'static str,
}

/// High-level client combining provider fallback with response recovery.
///
/// # Examples
///
/// ```no_run
/// use scribe_sdk::{ChatMessage, InvocationRequest, ScribeClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ScribeClient::from_env()?;
/// let request = InvocationRequest::new("gpt-4o", vec![ChatMessage::user("Summarize.")]);
/// let response = client.invoke(&request).await?;
/// println!("{}", response.content_text()?);
/// # Ok(())
/// # }
/// ```
pub struct ScribeClient {
    orchestrator: FallbackOrchestrator,
    engine: RecoveryEngine,
}

impl ScribeClient {
    /// Build a client from environment variables.
    ///
    /// Reads `OPENAI_API_KEY` / `OPENAI_BASE_URL` and `OPENROUTER_API_KEY`
    /// / `OPENROUTER_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a profile fails validation, or
    /// an HTTP error when the client cannot be constructed.
    pub fn from_env() -> ScribeResult<Self> {
        let orchestrator = FallbackOrchestrator::from_env()?;
        let eligible = orchestrator
            .profiles()
            .iter()
            .filter(|p| p.has_credential())
            .count();
        tracing::info!(
            "client configured, {} of {} providers hold a credential",
            eligible,
            orchestrator.profiles().len()
        );
        if eligible == 0 {
            tracing::warn!("no provider credentials found, every invocation will fail");
        }
        Ok(Self {
            orchestrator,
            engine: RecoveryEngine::default(),
        })
    }

    /// Build a client over an explicit orchestrator
    pub fn new(orchestrator: FallbackOrchestrator) -> Self {
        Self {
            orchestrator,
            engine: RecoveryEngine::default(),
        }
    }

    /// Replace the recovery engine (e.g. to change the attempt bound)
    pub fn with_engine(mut self, engine: RecoveryEngine) -> Self {
        self.engine = engine;
        self
    }

    /// The underlying fallback orchestrator
    pub fn orchestrator(&self) -> &FallbackOrchestrator {
        &self.orchestrator
    }

    /// Invoke the model and return the raw provider response.
    ///
    /// # Errors
    ///
    /// Returns a providers-exhausted error when no provider answered.
    pub async fn invoke(&self, request: &InvocationRequest) -> ScribeResult<ProviderResponse> {
        self.orchestrator.invoke(request).await
    }

    /// Invoke the model and recover a typed value from its output.
    ///
    /// # Errors
    ///
    /// Returns a providers-exhausted error when no provider answered, a
    /// JSON error when the response carries no generated text, and a
    /// parse-exhausted error when recovery fails on every attempt.
    pub async fn generate<T: DeserializeOwned>(
        &self,
        request: &InvocationRequest,
    ) -> ScribeResult<Generated<T>> {
        self.generate_with_progress(request, |_, _| {}).await
    }

    /// Like [`generate`](Self::generate), observing each failed parse
    /// attempt through `on_failure`.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub async fn generate_with_progress<T, F>(
        &self,
        request: &InvocationRequest,
        on_failure: F,
    ) -> ScribeResult<Generated<T>>
    where
        T: DeserializeOwned,
        F: FnMut(u32, &str),
    {
        let response = self.orchestrator.invoke(request).await?;
        let text = response.content_text()?;
        let recovered = self.engine.recover_with_progress(text, on_failure)?;
        Ok(Generated {
            value: recovered.value,
            provider: response.provider.clone(),
            model: response.model.clone(),
            strategy: recovered.strategy,
        })
    }
}
