//! Scribe Core Library
//!
//! This crate provides the invocation pipeline for turning photo-backed
//! conversations into structured reports: provider profiles and fallback
//! orchestration, message normalization, and recovery of structured
//! values from malformed model output.

pub mod config;
pub mod error;
pub mod llm;
pub mod repair;

// Re-export commonly used types
pub use config::{ProviderProfile, StructuredOutputStyle, TimeoutConfig};
pub use error::{ScribeError, ScribeResult};
pub use llm::{
    ChatMessage, FallbackOrchestrator, InvocationRequest, MessageRole, ModelAliasTable,
    OutputSchema, ProviderDispatcher, ProviderResponse,
};
pub use repair::{Recovered, RecoveryEngine, Strategy};
