//! Sanitization helpers for diagnostics that may carry provider payloads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Upper bound on provider error bodies embedded in errors and logs.
const MAX_ERROR_BODY_CHARS: usize = 1_024;

/// Upper bound on the offending-text preview carried by parse failures.
/// Model output is the only artifact available for postmortems, so the
/// preview must be long enough to be useful but never unbounded.
pub const PREVIEW_CHARS: usize = 500;

const REDACTED: &str = "[REDACTED]";

/// Key-name fragments that mark a JSON field as secret-bearing, matched
/// against lowercased keys with `-` and spaces folded to `_`.
const SECRET_KEY_HINTS: &[&str] = &[
    "api_key",
    "token",
    "secret",
    "password",
    "authorization",
    "cookie",
];

static BEARER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}").expect("valid bearer token regex")
});

static KEY_VALUE_SECRET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(api[_-]?key|access[_-]?token|token|secret|password|authorization)\b\s*[:=]\s*["']?[^"',\s}]+"#,
    )
    .expect("valid key/value secret regex")
});

/// Sanitize a provider error body: redact secrets, bound the length.
///
/// JSON bodies are redacted structurally (sensitive keys replaced wholesale);
/// anything else goes through inline pattern redaction.
pub fn sanitize_error_body(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error body>".to_string();
    }

    let redacted = match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => serde_json::to_string(&scrub_value(json))
            .unwrap_or_else(|_| "<unserializable error>".to_string()),
        Err(_) => redact_inline_secrets(trimmed),
    };
    truncate_with_suffix(redacted, MAX_ERROR_BODY_CHARS)
}

/// Bounded excerpt of model output for parse diagnostics.
pub fn text_preview(text: &str) -> String {
    truncate_with_suffix(text.to_string(), PREVIEW_CHARS)
}

/// Mask a credential for display: keep a short prefix and suffix only.
pub fn mask_key(key: &str) -> String {
    let len = key.chars().count();
    if len <= 12 {
        return "*".repeat(len);
    }
    let prefix: String = key.chars().take(6).collect();
    let suffix: String = key.chars().skip(len - 4).collect();
    format!("{}{}...{}", prefix, "*".repeat((len - 10).min(8)), suffix)
}

/// Rebuild a JSON value with secret-bearing fields replaced wholesale and
/// free-form strings run through inline redaction.
fn scrub_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let scrubbed: Map<String, Value> = map
                .into_iter()
                .map(|(key, val)| {
                    let val = if is_sensitive_key(&key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        scrub_value(val)
                    };
                    (key, val)
                })
                .collect();
            Value::Object(scrubbed)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(scrub_value).collect()),
        Value::String(s) => Value::String(redact_inline_secrets(&s)),
        other => other,
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.to_ascii_lowercase().replace(['-', ' '], "_");
    SECRET_KEY_HINTS
        .iter()
        .any(|hint| normalized.contains(hint))
}

fn redact_inline_secrets(input: &str) -> String {
    let without_bearer = BEARER_TOKEN_RE.replace_all(input, "Bearer [REDACTED]");
    KEY_VALUE_SECRET_RE
        .replace_all(&without_bearer, "$1=[REDACTED]")
        .into_owned()
}

fn truncate_with_suffix(input: String, limit: usize) -> String {
    match input.char_indices().nth(limit) {
        None => input,
        Some((cut, _)) => {
            let dropped = input[cut..].chars().count();
            format!("{}... [truncated {} chars]", &input[..cut], dropped)
        }
    }
}
