//! Repair strategies for malformed model output

use crate::repair::cleanup::{balanced_groups, clean_all, last_balanced_object, CLEANUP_PASSES};
use serde::de::DeserializeOwned;
use std::cmp::Reverse;

/// Outcome of one strategy attempt
#[derive(Debug)]
pub enum ParseAttempt<T> {
    /// The strategy produced a conforming value
    Success {
        value: T,
        strategy: &'static str,
    },
    /// The strategy could not produce a value
    Failure {
        strategy: &'static str,
        reason: String,
    },
}

/// One way of coaxing a structured value out of raw model text.
///
/// Strategies are independent: each one starts from the original text, so
/// an aggressive rewrite in one cannot poison the next. A value only
/// counts as recovered when it deserializes into the caller's target
/// type; syntactically valid JSON of the wrong shape fails the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full cleanup pipeline, then parse
    Direct,
    /// Parse each balanced top-level object, largest first
    Extract,
    /// Apply cleanup passes one at a time, parsing after each
    FixSyntax,
    /// Parse up to the last point where brace depth returned to zero
    TruncateRepair,
}

impl Strategy {
    /// Every strategy in cascade order
    pub const ALL: [Strategy; 4] = [
        Strategy::Direct,
        Strategy::Extract,
        Strategy::FixSyntax,
        Strategy::TruncateRepair,
    ];

    /// Stable name used in logs and failure reports
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Extract => "extract",
            Strategy::FixSyntax => "fix-syntax",
            Strategy::TruncateRepair => "truncate-repair",
        }
    }

    /// Run this strategy against the original text
    pub fn attempt<T: DeserializeOwned>(&self, text: &str) -> ParseAttempt<T> {
        let result = match self {
            Strategy::Direct => direct(text),
            Strategy::Extract => extract(text),
            Strategy::FixSyntax => fix_syntax(text),
            Strategy::TruncateRepair => truncate_repair(text),
        };
        match result {
            Ok(value) => ParseAttempt::Success {
                value,
                strategy: self.name(),
            },
            Err(reason) => ParseAttempt::Failure {
                strategy: self.name(),
                reason,
            },
        }
    }
}

fn direct<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    // Fast path: well-formed output needs no cleanup at all.
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Ok(value);
    }
    serde_json::from_str(&clean_all(text))
        .map_err(|e| format!("cleaned text did not parse: {}", e))
}

fn extract<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let mut candidates: Vec<&str> = balanced_groups(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect();
    if candidates.is_empty() {
        return Err("no balanced object found".to_string());
    }
    // The payload tends to be the biggest object in the text.
    candidates.sort_by_key(|c| Reverse(c.len()));

    let mut last_error = String::new();
    for candidate in candidates {
        match serde_json::from_str(&clean_all(candidate)) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = e.to_string(),
        }
    }
    Err(format!("no balanced object parsed: {}", last_error))
}

fn fix_syntax<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let mut current = text.trim().to_string();
    let mut last_error = String::new();
    for (name, pass) in CLEANUP_PASSES {
        current = pass(&current);
        match serde_json::from_str(&current) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = format!("after {}: {}", name, e),
        }
    }
    Err(format!("no cleanup pass produced valid syntax, {}", last_error))
}

fn truncate_repair<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let span = last_balanced_object(text)
        .ok_or_else(|| "brace depth never returned to zero".to_string())?;
    serde_json::from_str(span).map_err(|e| format!("last balanced object did not parse: {}", e))
}
