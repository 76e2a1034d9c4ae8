//! Scribe SDK
//!
//! This crate provides a high-level client for the Scribe pipeline:
//! invoke a model across a fallback chain of providers and recover a
//! typed value from whatever text comes back.
//!
//! # Example
//!
//! ```no_run
//! use scribe_sdk::{ChatMessage, InvocationRequest, ScribeClient};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Report {
//!     title: String,
//!     summary: String,
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ScribeClient::from_env()?;
//! let request = InvocationRequest::new(
//!     "gpt-4o",
//!     vec![
//!         ChatMessage::system("You write inspection reports as JSON."),
//!         ChatMessage::user_with_image("Describe the damage.", "https://example.com/roof.jpg"),
//!     ],
//! );
//!
//! let report = client.generate::<Report>(&request).await?;
//! println!("{} (answered by {})", report.value.title, report.provider);
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{Generated, ScribeClient};

// Re-export commonly used types from core
pub use scribe_core::{
    config::{ProviderProfile, StructuredOutputStyle, TimeoutConfig},
    error::{ScribeError, ScribeResult},
    llm::{ChatMessage, InvocationRequest, MessageRole, OutputSchema, ProviderResponse},
    repair::{RecoveryEngine, Strategy},
};

/// Initialize console logging with environment-based filtering.
///
/// Honors `RUST_LOG`; binaries embedding the pipeline call this once at
/// startup.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
