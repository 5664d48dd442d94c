//! Fragment scanning
//!
//! Finds delimited sub-blocks inside an assistant reply and yields raw
//! payload substrings plus their byte ranges. Three syntaxes are
//! recognized: paired `%%…%%` markers, fenced ```json code blocks that
//! structurally look like chart/table data, and GFM markdown tables.
//!
//! Scanning is a single forward pass per syntax; overlapping candidate
//! ranges are resolved by syntax-class precedence (marker > fence >
//! markdown table), then earliest-start, then longest-match.

use crate::constants::{
    FENCE, GRAPH_CLOSE, GRAPH_OPEN, JSON_FENCE_OPEN, TABLE_CLOSE, TABLE_OPEN,
};
use crate::extract::markdown;
use crate::types::{FragmentKind, FragmentSyntax, RawFragment};

/// Scan source text and return an ordered, non-overlapping fragment list.
pub fn scan(text: &str) -> Vec<RawFragment> {
    let mut candidates = scan_markers(text);
    candidates.extend(scan_fences(text));
    candidates.extend(markdown::find_tables(text));
    merge_candidates(candidates)
}

/// Precedence class for overlap resolution; lower wins.
fn syntax_rank(syntax: FragmentSyntax) -> u8 {
    match syntax {
        FragmentSyntax::Marker => 0,
        FragmentSyntax::Fence => 1,
        FragmentSyntax::MarkdownTable => 2,
    }
}

/// Resolve overlapping candidates into a non-overlapping document-order list.
fn merge_candidates(candidates: Vec<RawFragment>) -> Vec<RawFragment> {
    // A candidate loses outright to any overlapping candidate of a
    // stronger syntax class (a markdown table detected across a marker
    // block must not shadow the marker).
    let survivors: Vec<RawFragment> = candidates
        .iter()
        .filter(|c| {
            !candidates.iter().any(|o| {
                syntax_rank(o.syntax) < syntax_rank(c.syntax)
                    && o.start < c.end
                    && c.start < o.end
            })
        })
        .cloned()
        .collect();

    // Earliest start wins, then longest match.
    let mut survivors = survivors;
    survivors.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out: Vec<RawFragment> = Vec::new();
    for cand in survivors {
        if out.last().is_none_or(|prev| cand.start >= prev.end) {
            out.push(cand);
        }
    }
    out
}

// ============================================================================
// Custom Markers
// ============================================================================

/// Find the earliest marker opener at or after `from`.
fn next_opener(text: &str, from: usize) -> Option<(usize, FragmentKind)> {
    let table = text[from..].find(TABLE_OPEN).map(|i| (from + i, FragmentKind::Table));
    let graph = text[from..].find(GRAPH_OPEN).map(|i| (from + i, FragmentKind::Chart));
    match (table, graph) {
        (Some(t), Some(g)) => Some(if t.0 <= g.0 { t } else { g }),
        (Some(t), None) => Some(t),
        (None, Some(g)) => Some(g),
        (None, None) => None,
    }
}

/// Scan for `%%TABLE_JSON%%…%%END_TABLE%%` / `%%GRAPH_JSON%%…%%END_GRAPH%%`
/// blocks. An opener with no matching end token before end-of-string or
/// before the next opener is not a fragment; the literal text is left to
/// surface in cleaned prose as-is.
fn scan_markers(text: &str) -> Vec<RawFragment> {
    let mut out = Vec::new();
    let mut cursor = 0;

    while let Some((open_at, kind)) = next_opener(text, cursor) {
        let (open_tok, close_tok) = match kind {
            FragmentKind::Table => (TABLE_OPEN, TABLE_CLOSE),
            FragmentKind::Chart => (GRAPH_OPEN, GRAPH_CLOSE),
        };
        let inner_start = open_at + open_tok.len();
        let close_at = text[inner_start..].find(close_tok).map(|i| inner_start + i);
        let following = next_opener(text, inner_start).map(|(pos, _)| pos);

        match close_at {
            Some(close) if following.is_none_or(|next| close < next) => {
                let end = close + close_tok.len();
                out.push(RawFragment {
                    kind,
                    syntax: FragmentSyntax::Marker,
                    raw: text[inner_start..close].trim().to_string(),
                    start: open_at,
                    end,
                });
                cursor = end;
            }
            _ => {
                // Unterminated opener: skip past it and keep scanning.
                match following {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        }
    }
    out
}

// ============================================================================
// Fenced JSON Blocks
// ============================================================================

/// True when `pos` sits at the start of a line.
fn at_line_start(text: &str, pos: usize) -> bool {
    pos == 0 || text.as_bytes()[pos - 1] == b'\n'
}

/// Classify a fence payload by the keys it appears to carry.
///
/// Heuristic, applied to raw text before parsing: an object with both
/// headers-like and rows-like members is a table; one with a `datasets`
/// array, a `series` array, or an `xAxis`/`yAxis` pair is a chart.
/// Anything else is not a fragment (ordinary code block, left alone).
fn classify_fence(raw: &str) -> Option<FragmentKind> {
    if !raw.starts_with('{') {
        return None;
    }
    if raw.contains("\"headers\"") && raw.contains("\"rows\"") {
        return Some(FragmentKind::Table);
    }
    if raw.contains("\"datasets\"")
        || raw.contains("\"series\"")
        || (raw.contains("\"xAxis\"") && raw.contains("\"yAxis\""))
    {
        return Some(FragmentKind::Chart);
    }
    None
}

/// Find the closing fence line at or after `from`.
fn find_fence_close(text: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(rel) = text[cursor..].find(FENCE) {
        let at = cursor + rel;
        if at_line_start(text, at) {
            return Some(at);
        }
        cursor = at + FENCE.len();
    }
    None
}

/// Scan for ```json fences whose body looks like chart/table data.
fn scan_fences(text: &str) -> Vec<RawFragment> {
    let mut out = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(JSON_FENCE_OPEN) {
        let open_at = cursor + rel;
        let tag_end = open_at + JSON_FENCE_OPEN.len();
        if !at_line_start(text, open_at) {
            cursor = tag_end;
            continue;
        }

        // The rest of the opening line must be blank.
        let line_break = match text[tag_end..].find('\n') {
            Some(i) => tag_end + i,
            None => break, // opener with no content
        };
        if !text[tag_end..line_break].trim().is_empty() {
            cursor = tag_end;
            continue;
        }

        let body_start = line_break + 1;
        let close_at = match find_fence_close(text, body_start) {
            Some(pos) => pos,
            None => break, // unterminated fence, leave literal
        };

        let raw = text[body_start..close_at].trim();
        let end = close_at + FENCE.len();
        if let Some(kind) = classify_fence(raw) {
            out.push(RawFragment {
                kind,
                syntax: FragmentSyntax::Fence,
                raw: raw.to_string(),
                start: open_at,
                end,
            });
        }
        cursor = end;
    }
    out
}
