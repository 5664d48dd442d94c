//! Text reassembly
//!
//! Removes consumed fragment ranges from the original text and tidies
//! what remains: `<br>` tags become newlines and runs of three or more
//! newlines collapse to exactly two. Ranges belonging to fragments that
//! errored are not deleted, so their raw marker text stays visible.
//!
//! Also provides the plain-text rendition used for clipboard-style
//! output, where fragments become short placeholders.

use crate::constants::{
    CODE_PLACEHOLDER, FENCE, GRAPH_CLOSE, GRAPH_OPEN, GRAPH_PLACEHOLDER, TABLE_CLOSE,
    TABLE_OPEN, TABLE_PLACEHOLDER,
};
use std::ops::Range;

/// Delete the consumed ranges from `text` and normalize the remainder.
///
/// `consumed` must be sorted ascending and non-overlapping, which is what
/// the scanner produces.
pub fn reassemble(text: &str, consumed: &[Range<usize>]) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in consumed {
        kept.push_str(&text[cursor..range.start]);
        cursor = range.end;
    }
    kept.push_str(&text[cursor..]);
    normalize_prose(&kept)
}

/// `<br>` variants to newlines, collapse 3+ newlines to 2, trim the ends.
/// Line endings are normalized to bare `\n` first so CRLF runs collapse
/// the same way.
fn normalize_prose(text: &str) -> String {
    let text = text
        .replace("\r\n", "\n")
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n");

    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push(ch);
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }
    out.trim().to_string()
}

// ============================================================================
// Plain-Text Rendition
// ============================================================================

/// Replace every `open…close` block with a placeholder. An unmatched
/// opener is left as literal text.
fn replace_blocks(text: &str, open: &str, close: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(rel) = text[cursor..].find(open) {
        let open_at = cursor + rel;
        let inner_start = open_at + open.len();
        match text[inner_start..].find(close) {
            Some(close_rel) => {
                out.push_str(&text[cursor..open_at]);
                out.push_str(placeholder);
                cursor = inner_start + close_rel + close.len();
            }
            None => break,
        }
    }
    out.push_str(&text[cursor..]);
    out
}

/// Strip `[text](url)` links down to their text.
fn strip_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(close_rel) = rest[open..].find(']') else { break };
        let close = open + close_rel;
        let after = &rest[close + 1..];
        if after.starts_with('(') {
            if let Some(paren_rel) = after.find(')') {
                out.push_str(&rest[..open]);
                out.push_str(&rest[open + 1..close]);
                rest = &after[paren_rel + 1..];
                continue;
            }
        }
        out.push_str(&rest[..close + 1]);
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Strip leading `#` header markers from each line.
fn strip_headers(text: &str) -> String {
    text.lines()
        .map(|line| {
            let hashes = line.chars().take_while(|&c| c == '#').count();
            if hashes > 0 && line[hashes..].starts_with(' ') {
                &line[hashes + 1..]
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text rendition of an assistant reply: fragments and code become
/// short placeholders and simple markdown is flattened.
pub fn plain_text(text: &str) -> String {
    let text = replace_blocks(text, TABLE_OPEN, TABLE_CLOSE, TABLE_PLACEHOLDER);
    let text = replace_blocks(&text, GRAPH_OPEN, GRAPH_CLOSE, GRAPH_PLACEHOLDER);
    let text = replace_blocks(&text, FENCE, FENCE, CODE_PLACEHOLDER);
    let text = text
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("**", "");
    let text = strip_links(&text);
    let text = strip_headers(&text);
    text.replace('`', "").trim().to_string()
}
