//! Text cleanup passes for malformed model output
//!
//! Every pass is a pure `&str -> String` transformation, and every pass
//! that rewrites punctuation scans with string-literal awareness so that
//! URLs, apostrophes, and comma sequences inside quoted values survive
//! untouched. On well-formed JSON the whole pipeline is a no-op.

/// Ordered cleanup passes shared by the direct and fix-syntax strategies
pub(crate) const CLEANUP_PASSES: [(&str, fn(&str) -> String); 7] = [
    ("strip-code-fences", strip_code_fences),
    ("slice-to-braces", slice_to_braces),
    ("remove-trailing-commas", remove_trailing_commas),
    ("quote-bare-keys", quote_bare_keys),
    ("normalize-single-quotes", normalize_single_quotes),
    ("strip-comments", strip_comments),
    ("collapse-string-breaks", collapse_string_breaks),
];

/// Apply every cleanup pass in pipeline order
pub fn clean_all(text: &str) -> String {
    CLEANUP_PASSES
        .iter()
        .fold(text.trim().to_string(), |acc, (_, pass)| pass(&acc))
}

/// Remove Markdown code fences, keeping only the fenced body.
///
/// An optional language tag after the opening fence is dropped with the
/// fence line; an unterminated fence keeps everything after it.
pub fn strip_code_fences(text: &str) -> String {
    let Some(open) = text.find("```") else {
        return text.to_string();
    };
    let after = &text[open + 3..];
    // Everything up to the first newline is the fence line (language tag).
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let inner = match body.find("```") {
        Some(close) => &body[..close],
        None => body,
    };
    inner.trim().to_string()
}

/// Trim surrounding prose down to the outermost brace pair.
///
/// Text already starting with `{` or `[` is left alone, so well-formed
/// arrays are never mangled.
pub fn slice_to_braces(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed.to_string();
    }
    let Some(start) = trimmed.find(['{', '[']) else {
        return trimmed.to_string();
    };
    let close = if trimmed.as_bytes()[start] == b'{' {
        '}'
    } else {
        ']'
    };
    match trimmed.rfind(close) {
        Some(end) if end > start => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Remove commas that directly precede a closing brace or bracket
pub fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if !(j < chars.len() && (chars[j] == '}' || chars[j] == ']')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
        i += 1;
    }
    out
}

/// Wrap unquoted object keys in double quotes.
///
/// A bare identifier counts as a key only when it follows `{` or `,` and
/// is followed by a colon, which keeps `true`, `false`, and `null` in
/// value position untouched.
pub fn quote_bare_keys(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut prev_sig: Option<char> = None;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if ch == '"' {
            in_string = true;
            prev_sig = Some('"');
            out.push(ch);
            i += 1;
            continue;
        }
        if (ch.is_alphabetic() || ch == '_') && matches!(prev_sig, Some('{') | Some(',')) {
            let mut j = i;
            while j < chars.len()
                && (chars[j].is_alphanumeric() || matches!(chars[j], '_' | '-' | '$'))
            {
                j += 1;
            }
            let mut k = j;
            while k < chars.len() && chars[k].is_whitespace() {
                k += 1;
            }
            if k < chars.len() && chars[k] == ':' {
                out.push('"');
                out.extend(&chars[i..j]);
                out.push('"');
                prev_sig = Some('"');
            } else {
                out.extend(&chars[i..j]);
                prev_sig = Some(chars[j - 1]);
            }
            i = j;
            continue;
        }
        if !ch.is_whitespace() {
            prev_sig = Some(ch);
        }
        out.push(ch);
        i += 1;
    }
    out
}

/// Convert single-quoted strings to double-quoted ones.
///
/// Apostrophes inside double-quoted strings are never touched; an
/// unterminated single quote is left as-is.
pub fn normalize_single_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_double = false;
    let mut escaped = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if in_double {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_double = false;
            }
            i += 1;
            continue;
        }
        if ch == '"' {
            in_double = true;
            out.push(ch);
            i += 1;
            continue;
        }
        if ch == '\'' {
            let mut inner = String::new();
            let mut j = i + 1;
            let mut closed = false;
            while j < chars.len() {
                let c = chars[j];
                if c == '\\' && j + 1 < chars.len() {
                    if chars[j + 1] == '\'' {
                        inner.push('\'');
                    } else {
                        inner.push('\\');
                        inner.push(chars[j + 1]);
                    }
                    j += 2;
                    continue;
                }
                if c == '\'' {
                    closed = true;
                    j += 1;
                    break;
                }
                inner.push(c);
                j += 1;
            }
            if closed {
                out.push('"');
                out.push_str(&inner.replace('"', "\\\""));
                out.push('"');
                i = j;
            } else {
                out.push(ch);
                i += 1;
            }
            continue;
        }
        out.push(ch);
        i += 1;
    }
    out
}

/// Remove `//` line comments and `/* */` block comments outside strings
pub fn strip_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
                i += 1;
            }
            '/' if i + 1 < chars.len() && chars[i + 1] == '/' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if i + 1 < chars.len() && chars[i + 1] == '*' => {
                i += 2;
                while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }
    out
}

/// Join string literals split across lines.
///
/// A closing quote followed by whitespace containing a newline and then a
/// reopening quote is a broken literal; the two halves are merged. Valid
/// JSON never places two strings with only whitespace between them, so
/// this cannot fire on well-formed input.
pub fn collapse_string_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            if escaped {
                out.push(ch);
                escaped = false;
                i += 1;
                continue;
            }
            if ch == '\\' {
                out.push(ch);
                escaped = true;
                i += 1;
                continue;
            }
            if ch == '"' {
                let mut j = i + 1;
                let mut saw_newline = false;
                while j < chars.len() && chars[j].is_whitespace() {
                    if chars[j] == '\n' {
                        saw_newline = true;
                    }
                    j += 1;
                }
                if saw_newline && j < chars.len() && chars[j] == '"' {
                    // Merge the halves and stay inside the string.
                    i = j + 1;
                    continue;
                }
                out.push(ch);
                in_string = false;
                i += 1;
                continue;
            }
            out.push(ch);
            i += 1;
            continue;
        }
        if ch == '"' {
            in_string = true;
        }
        out.push(ch);
        i += 1;
    }
    out
}

/// Byte spans of every top-level balanced `{...}` group.
///
/// Depth is tracked outside string literals only while inside a group;
/// stray quotes in surrounding prose cannot desynchronize the scan. A
/// group whose braces never rebalance produces no span.
pub fn balanced_groups(text: &str) -> Vec<(usize, usize)> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        groups.push((start, i + 1));
                    }
                }
            }
            _ => {}
        }
    }
    groups
}

/// The last complete top-level object in the text, if any
pub fn last_balanced_object(text: &str) -> Option<&str> {
    balanced_groups(text)
        .last()
        .map(|&(start, end)| &text[start..end])
}
