//! Structured-output recovery for malformed model responses
//!
//! Models asked for JSON return fenced blocks, prose-wrapped objects,
//! almost-JSON with trailing commas, and output cut off mid-document.
//! This module recovers a typed value from all of those shapes through a
//! fixed cascade of independent strategies, retried a bounded number of
//! times before raising a terminal error.

pub mod cleanup;
pub mod engine;
pub mod strategies;


pub use engine::{Recovered, RecoveryEngine, DEFAULT_PARSE_ATTEMPTS};
pub use strategies::{ParseAttempt, Strategy};
