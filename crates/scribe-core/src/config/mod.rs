//! Provider configuration: profiles, timeouts, environment loading

pub mod env_loader;
pub mod profile;
pub mod timeouts;

pub use env_loader::load_from_env;
pub use profile::{ProviderProfile, StructuredOutputStyle};
pub use timeouts::TimeoutConfig;
