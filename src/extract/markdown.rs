//! Markdown table detection
//!
//! Locates GFM tables (header row + dash separator + at least one body
//! row) in assistant prose and extracts their cells. Detection reports
//! byte ranges so the reassembler can delete consumed regions exactly.

use crate::extract::error::{ExtractError, ExtractResult};
use crate::types::{FragmentKind, FragmentSyntax, RawFragment};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde_json::{Value, json};

fn table_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Find every GFM table in `text` and yield it as a table fragment.
///
/// The fragment's `raw` is the markdown slice itself; the parser decodes
/// it via [`table_value`] rather than as JSON.
pub fn find_tables(text: &str) -> Vec<RawFragment> {
    let parser = Parser::new_ext(text, table_options());
    let mut out = Vec::new();

    for (event, range) in parser.into_offset_iter() {
        if let Event::Start(Tag::Table(_)) = event {
            // Trailing newline of the block belongs to the prose, not
            // the table; keep the range tight around the table lines.
            let slice = &text[range.clone()];
            let trimmed_len = slice.trim_end().len();
            // Header + separator with no body rows is prose, not data.
            if slice.trim_end().lines().count() < 3 {
                continue;
            }
            out.push(RawFragment {
                kind: FragmentKind::Table,
                syntax: FragmentSyntax::MarkdownTable,
                raw: slice.trim().to_string(),
                start: range.start,
                end: range.start + trimmed_len,
            });
        }
    }
    out
}

/// Decode a markdown table slice into the direct `{headers, rows}` form
/// the shape normalizer already understands.
pub fn table_value(md: &str) -> ExtractResult<Value> {
    let (headers, rows) = parse_table(md)?;
    Ok(json!({ "headers": headers, "rows": rows }))
}

/// Extract header and body cells from a markdown table slice.
fn parse_table(md: &str) -> ExtractResult<(Vec<String>, Vec<Vec<String>>)> {
    let parser = Parser::new_ext(md, table_options());

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_cell = false;

    for event in parser {
        match event {
            Event::Start(Tag::TableCell) => {
                in_cell = true;
                cell.clear();
            }
            Event::End(TagEnd::TableCell) => {
                in_cell = false;
                current_row.push(cell.trim().to_string());
            }
            // Header cells sit directly inside TableHead; body cells
            // inside TableRow.
            Event::End(TagEnd::TableHead) => {
                headers = std::mem::take(&mut current_row);
            }
            Event::End(TagEnd::TableRow) => {
                rows.push(std::mem::take(&mut current_row));
            }
            Event::Text(t) | Event::Code(t) if in_cell => {
                cell.push_str(&t);
            }
            _ => {}
        }
    }

    if headers.is_empty() {
        return Err(ExtractError::MarkdownTable("no header row".to_string()));
    }
    if rows.is_empty() {
        return Err(ExtractError::MarkdownTable("no body rows".to_string()));
    }
    Ok((headers, rows))
}
