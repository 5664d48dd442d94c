//! Prepass normalization
//!
//! Two jobs run before scanning. First, response text cleanup: older
//! backends double-encode replies, leaving literal `\uXXXX` escapes
//! (including surrogate pairs for emoji), escaped newlines/quotes, and
//! the occasional dangling `**`. Second, legacy marker rewriting: several
//! generations of wrapper syntax (`{{TABLE_DATA:…}}`, `{table:…}`,
//! `[CHART:…]`, …) are rewritten to the canonical `%%…%%` markers when
//! their payload is valid JSON, and left untouched otherwise so the user
//! can still see them (fail-open).

use crate::constants::{GRAPH_CLOSE, GRAPH_OPEN, TABLE_CLOSE, TABLE_OPEN};
use serde_json::Value;

/// Run both prepass stages.
///
/// `<br>` tags become newlines here, before scanning, so that a fence
/// or marker "hidden" behind a tag on the first pass does not surface at
/// line start in the cleaned output and get extracted on a re-run.
pub fn prepare(text: &str) -> String {
    let text = break_tags_to_newlines(&clean_response_text(text));
    rewrite_legacy_markers(&text)
}

fn break_tags_to_newlines(text: &str) -> String {
    text.replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
}

// ============================================================================
// Response Text Cleanup
// ============================================================================

/// Undo double-encoding artifacts in a reply body.
pub fn clean_response_text(text: &str) -> String {
    // A reply that is itself a JSON string literal gets unwrapped first.
    let text = if text.starts_with('"')
        && text.ends_with('"')
        && (text.contains("\\n") || text.contains("\\\""))
    {
        serde_json::from_str::<String>(text).unwrap_or_else(|_| text.to_string())
    } else {
        text.to_string()
    };

    fix_unbalanced_bold(&unescape_sequences(&text))
}

fn hex4(text: &str, at: usize) -> Option<u16> {
    u16::from_str_radix(text.get(at..at + 4)?, 16).ok()
}

/// Decode literal escape sequences: `\uXXXX` (with surrogate pairs
/// combined, lone surrogates dropped), `\n`, `\t`, `\"`, `\'`, `\\`.
fn unescape_sequences(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        if bytes[i] == b'\\' && i + 1 < text.len() {
            match bytes[i + 1] {
                b'n' => {
                    out.push('\n');
                    i += 2;
                    continue;
                }
                b't' => {
                    out.push('\t');
                    i += 2;
                    continue;
                }
                b'"' => {
                    out.push('"');
                    i += 2;
                    continue;
                }
                b'\'' => {
                    out.push('\'');
                    i += 2;
                    continue;
                }
                b'\\' => {
                    out.push('\\');
                    i += 2;
                    continue;
                }
                b'u' => {
                    if let Some(unit) = hex4(text, i + 2) {
                        if (0xD800..0xDC00).contains(&unit) {
                            // High surrogate: must pair with a low one.
                            let pair = text[i + 6..].starts_with("\\u").then(|| hex4(text, i + 8)).flatten();
                            if let Some(low) = pair.filter(|l| (0xDC00..0xE000).contains(l)) {
                                let code = 0x10000
                                    + ((unit as u32 - 0xD800) << 10)
                                    + (low as u32 - 0xDC00);
                                if let Some(ch) = char::from_u32(code) {
                                    out.push(ch);
                                }
                                i += 12;
                                continue;
                            }
                            i += 6; // lone high surrogate, drop it
                            continue;
                        }
                        if (0xDC00..0xE000).contains(&unit) {
                            i += 6; // lone low surrogate, drop it
                            continue;
                        }
                        if let Some(ch) = char::from_u32(unit as u32) {
                            out.push(ch);
                        }
                        i += 6;
                        continue;
                    }
                }
                _ => {}
            }
        }
        let ch = text[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// An odd number of `**` markers leaves markdown renderers bolding to
/// end-of-message; drop the last one.
fn fix_unbalanced_bold(text: &str) -> String {
    let count = text.matches("**").count();
    if count % 2 == 0 {
        return text.to_string();
    }
    match text.rfind("**") {
        Some(at) => format!("{}{}", &text[..at], &text[at + 2..]),
        None => text.to_string(),
    }
}

// ============================================================================
// Legacy Marker Rewriting
// ============================================================================

/// Find the end of a JSON payload that runs up to a closer token.
///
/// The closer may also appear inside the payload (nested braces), so each
/// occurrence is tried in turn until the prefix parses as JSON.
fn parse_prefix_payload(text: &str, from: usize, close: &str) -> Option<(usize, Value)> {
    let mut cursor = from;
    while let Some(rel) = text[cursor..].find(close) {
        let at = cursor + rel;
        let candidate = text[from..at].trim();
        if !candidate.is_empty() {
            if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                return Some((at + close.len(), value));
            }
        }
        // Closer occurrences can overlap ("}}}" holds two "}}"), so
        // advance one byte at a time.
        cursor = at + 1;
    }
    None
}

/// Rewrite every `open…close` wrapper whose payload satisfies `accept`.
/// Wrappers with unparseable or unacceptable payloads stay literal.
fn rewrite_wrapper(
    text: &str,
    open: &str,
    close: &str,
    accept: impl Fn(&Value) -> bool,
    open_marker: &str,
    close_marker: &str,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(open) {
        let at = cursor + rel;
        let payload_from = at + open.len();
        match parse_prefix_payload(text, payload_from, close) {
            Some((end, value)) if accept(&value) => {
                out.push_str(&text[cursor..at]);
                out.push_str(open_marker);
                out.push_str(&value.to_string());
                out.push_str(close_marker);
                cursor = end;
            }
            _ => {
                out.push_str(&text[cursor..payload_from]);
                cursor = payload_from;
            }
        }
    }
    out.push_str(&text[cursor..]);
    out
}

fn table_like(value: &Value) -> bool {
    value.is_array()
        || value.get("rows").is_some()
        || value.get("headers").is_some()
        || value.get("datasets").is_some()
}

fn chart_like(value: &Value) -> bool {
    let Some(obj) = value.as_object() else { return false };
    obj.contains_key("datasets")
        || obj.contains_key("series")
        || (obj.contains_key("xAxis") && obj.contains_key("yAxis"))
}

/// Rewrite every known legacy wrapper generation to canonical markers.
pub fn rewrite_legacy_markers(text: &str) -> String {
    let table = |text: &str, open: &str, close: &str| {
        rewrite_wrapper(text, open, close, table_like, TABLE_OPEN, TABLE_CLOSE)
    };
    let chart = |text: &str, open: &str, close: &str| {
        rewrite_wrapper(text, open, close, chart_like, GRAPH_OPEN, GRAPH_CLOSE)
    };

    let text = table(text, "{{TABLE_DATA:", "}}");
    let text = chart(&text, "{{GRAPH_DATA:", "}}");
    let text = table(&text, "{table:", "}");
    let text = chart(&text, "{GRAPH:", "}");
    let text = chart(&text, "[CHART:", "]");
    let text = chart(&text, "[DISPLAY_CHART:", "]");
    let text = chart(&text, "[VISUALIZATION:", "]");
    chart(&text, "(VISUALIZATION:", ")")
}
