//! Recovery engine: strategy cascade with bounded retries

use crate::error::sanitize::text_preview;
use crate::error::{ScribeError, ScribeResult};
use crate::repair::strategies::{ParseAttempt, Strategy};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Default number of full cascade attempts before giving up
pub const DEFAULT_PARSE_ATTEMPTS: u32 = 3;

/// A recovered value and the strategy that produced it
#[derive(Debug, Clone)]
pub struct Recovered<T> {
    /// The parsed, conforming value
    pub value: T,
    /// Name of the winning strategy
    pub strategy: &'static str,
}

/// Drives the strategy cascade over raw model text.
///
/// One attempt runs every strategy in order and stops at the first
/// success; a failed attempt reports the joined per-strategy reasons.
/// The engine re-runs the whole cascade up to its attempt bound, calling
/// the caller's progress hook after each failure, and only then raises a
/// terminal parse-exhausted error carrying a bounded preview of the
/// offending text.
#[derive(Debug, Clone)]
pub struct RecoveryEngine {
    max_attempts: u32,
}

impl Default for RecoveryEngine {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_PARSE_ATTEMPTS,
        }
    }
}

impl RecoveryEngine {
    /// Create an engine with a custom attempt bound (minimum 1)
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// The configured attempt bound
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Recover a structured value from raw model text.
    ///
    /// # Errors
    ///
    /// Returns a parse-exhausted error when every attempt fails.
    pub fn recover<T: DeserializeOwned>(&self, text: &str) -> ScribeResult<Recovered<T>> {
        self.recover_with_progress(text, |_, _| {})
    }

    /// Recover a structured value, observing each failed attempt.
    ///
    /// `on_failure` receives the 1-based attempt number and the aggregate
    /// failure reason; it fires after every failed attempt, including the
    /// final one.
    ///
    /// # Errors
    ///
    /// Returns a parse-exhausted error when every attempt fails.
    pub fn recover_with_progress<T, F>(
        &self,
        text: &str,
        mut on_failure: F,
    ) -> ScribeResult<Recovered<T>>
    where
        T: DeserializeOwned,
        F: FnMut(u32, &str),
    {
        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            match run_cascade(text) {
                Ok(recovered) => {
                    info!(
                        strategy = recovered.strategy,
                        attempt, "recovered structured value"
                    );
                    return Ok(recovered);
                }
                Err(reason) => {
                    debug!(attempt, %reason, "recovery attempt failed");
                    on_failure(attempt, &reason);
                    last_error = reason;
                }
            }
        }
        Err(ScribeError::parse_exhausted(
            self.max_attempts,
            last_error,
            text_preview(text),
        ))
    }
}

/// One pass over the cascade: first success wins, failures accumulate
fn run_cascade<T: DeserializeOwned>(text: &str) -> Result<Recovered<T>, String> {
    let mut reasons = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        match strategy.attempt(text) {
            ParseAttempt::Success { value, strategy } => {
                return Ok(Recovered { value, strategy });
            }
            ParseAttempt::Failure { strategy, reason } => {
                reasons.push(format!("{}: {}", strategy, reason));
            }
        }
    }
    Err(format!("all-failed: {}", reasons.join("; ")))
}
