//! Model invocation pipeline
//!
//! A request flows through four stages: alias resolution picks the
//! provider-side model name, normalization shapes the conversation for the
//! wire, the dispatcher performs a single HTTP attempt, and the
//! orchestrator walks providers in priority order until one answers.

pub mod dispatcher;
pub mod messages;
pub mod normalizer;
pub mod orchestrator;
pub mod request;
pub mod resolver;
pub mod response;

#[cfg(test)]
mod dispatcher_tests;

pub use dispatcher::{ProviderDispatcher, DEFAULT_MAX_TOKENS};
pub use messages::{ChatMessage, ContentPart, ImageRef, MessageContent, MessageRole, TypedPart};
pub use normalizer::MessageNormalizer;
pub use orchestrator::FallbackOrchestrator;
pub use request::{GenerationParams, InvocationRequest, OutputSchema, ToolSpec};
pub use resolver::ModelAliasTable;
pub use response::ProviderResponse;
