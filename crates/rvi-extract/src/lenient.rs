//! Progressively lenient JSON parsing.
//!
//! Model-generated payloads are frequently almost-JSON: `//` comments,
//! `/* */` comments and trailing commas are common. Parsing runs a
//! strict pass first, then retries on a loosened copy with those
//! constructs stripped. Anything still unparseable is the caller's
//! problem to degrade (the extractors wrap it as a fallback block).

use serde_json::Value;

/// Payload parse failure. Never escapes the extractors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ParseError {
    /// Body was not valid JSON even after loosening.
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a directive body, strictly first and loosened second.
pub(crate) fn parse_lenient(body: &str) -> Result<Value, ParseError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            let loosened = loosen(body);
            serde_json::from_str(&loosened).map_err(|_| ParseError::Json(strict_err))
        }
    }
}

/// Strip `//` line comments, `/* */` block comments and trailing commas.
///
/// The scanner is string-aware: comment markers and commas inside string
/// literals (including escaped quotes) are left alone.
pub(crate) fn loosen(body: &str) -> String {
    let without_comments = strip_comments(body);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Line comment: drop until newline (kept for line structure).
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn strip_trailing_commas(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let chars: Vec<char> = body.chars().collect();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next_significant = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next_significant, Some(']' | '}')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_strict_pass() {
        assert_eq!(parse_lenient(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_line_comments() {
        let body = "{\n  // the answer\n  \"a\": 42\n}";
        assert_eq!(parse_lenient(body).unwrap(), json!({"a": 42}));
    }

    #[test]
    fn test_block_comments() {
        let body = r#"{ /* noise */ "a": 1 }"#;
        assert_eq!(parse_lenient(body).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_trailing_commas() {
        let body = r#"{"items": ["a", "b",], }"#;
        assert_eq!(parse_lenient(body).unwrap(), json!({"items": ["a", "b"]}));
    }

    #[test]
    fn test_slashes_inside_strings_survive() {
        let body = r#"{"url": "https://example.com", "note": "a // b"}"#;
        assert_eq!(
            parse_lenient(body).unwrap(),
            json!({"url": "https://example.com", "note": "a // b"})
        );
    }

    #[test]
    fn test_commas_inside_strings_survive() {
        let body = r#"{"text": "a, ]"}"#;
        assert_eq!(parse_lenient(body).unwrap(), json!({"text": "a, ]"}));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let body = r#"{"text": "say \"hi\"," }"#;
        assert_eq!(parse_lenient(body).unwrap(), json!({"text": "say \"hi\","}));
    }

    #[test]
    fn test_hopeless_input_errors() {
        assert!(parse_lenient("{not valid json,,,}").is_err());
        assert!(parse_lenient("").is_err());
    }
}
