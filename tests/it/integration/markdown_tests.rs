//! Markdown table extraction through the full pipeline.

use crate::helpers::assert_rectangular;
use chatviz::process;
use chatviz::types::CellValue;

#[test]
fn gfm_table_in_prose_becomes_a_table_model() {
    let text = "Here are the figures:\n\n\
                | Region | Sales |\n\
                |--------|-------|\n\
                | North  | 120   |\n\
                | South  | 80    |\n\n\
                Let me know if you need more.";
    let result = process(text);
    assert_eq!(result.tables.len(), 1);
    let table = &result.tables[0];
    assert_eq!(table.headers, vec!["Region", "Sales"]);
    assert_eq!(table.rows.len(), 2);
    assert_rectangular(table);
    assert!(!result.cleaned_text.contains('|'));
    assert!(result.cleaned_text.contains("Here are the figures:"));
    assert!(result.cleaned_text.contains("Let me know if you need more."));
}

#[test]
fn table_cells_keep_their_text_verbatim() {
    let text = "| Name | Note |\n|---|---|\n| a | uses `code` |\n";
    let result = process(text);
    assert_eq!(
        result.tables[0].rows[0][1],
        CellValue::Text("uses code".to_string())
    );
}

#[test]
fn header_only_table_is_left_as_prose() {
    let text = "| A | B |\n|---|---|\n";
    let result = process(text);
    assert!(result.tables.is_empty());
    assert!(result.cleaned_text.contains("| A | B |"));
}

#[test]
fn two_separate_tables_yield_two_models() {
    let text = "| A |\n|---|\n| 1 |\n\nand\n\n| B |\n|---|\n| 2 |\n";
    let result = process(text);
    assert_eq!(result.tables.len(), 2);
    assert_eq!(result.tables[0].headers, vec!["A"]);
    assert_eq!(result.tables[1].headers, vec!["B"]);
}

#[test]
fn markdown_table_does_not_shadow_an_overlapping_marker_block() {
    // A marker block whose payload happens to contain pipe characters
    // must still be treated as a marker fragment.
    let text = "%%TABLE_JSON%%{\"headers\":[\"A|B\"],\"rows\":[[\"x|y\"]]}%%END_TABLE%%";
    let result = process(text);
    assert_eq!(result.tables.len(), 1);
    assert_eq!(result.tables[0].headers, vec!["A|B"]);
}
