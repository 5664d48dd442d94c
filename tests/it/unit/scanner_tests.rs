//! Fragment scanner tests: discovery order, precedence, unterminated blocks.

use crate::helpers::{graph_marker, json_fence, table_marker};
use chatviz::extract::scan;
use chatviz::types::{FragmentKind, FragmentSyntax};

#[test]
fn scan_finds_all_three_syntaxes_in_document_order() {
    let text = format!(
        "Intro.\n\n{}\n\n{}\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nOutro.",
        graph_marker(r#"{"series":[{"data":[1]}],"xAxis":{"data":["a"]}}"#),
        json_fence(r#"{"headers":["H"],"rows":[["x"]]}"#),
    );
    let fragments = scan(&text);
    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].syntax, FragmentSyntax::Marker);
    assert_eq!(fragments[1].syntax, FragmentSyntax::Fence);
    assert_eq!(fragments[2].syntax, FragmentSyntax::MarkdownTable);
    assert!(fragments[0].start < fragments[1].start);
    assert!(fragments[1].start < fragments[2].start);
}

#[test]
fn scan_ranges_do_not_overlap() {
    let text = format!(
        "{} and {}",
        table_marker(r#"{"headers":["A"],"rows":[[1]]}"#),
        graph_marker(r#"{"series":[{"data":[2]}],"xAxis":{"data":["b"]}}"#),
    );
    let fragments = scan(&text);
    assert_eq!(fragments.len(), 2);
    assert!(fragments[0].end <= fragments[1].start);
}

#[test]
fn scan_unterminated_marker_is_not_a_fragment() {
    let text = "%%TABLE_JSON%%{\"headers\":[\"A\"],\"rows\":[]}";
    assert!(scan(text).is_empty());
}

#[test]
fn scan_unterminated_opener_does_not_hide_later_block() {
    let text = format!(
        "%%GRAPH_JSON%% oops {}",
        table_marker(r#"{"headers":["A"],"rows":[[1]]}"#)
    );
    let fragments = scan(&text);
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].kind, FragmentKind::Table);
}

#[test]
fn scan_plain_fence_is_ignored() {
    let text = "```\nnot json\n```";
    assert!(scan(text).is_empty());
}

#[test]
fn scan_json_fence_without_table_or_chart_keys_is_ignored() {
    let text = json_fence(r#"{"message":"hi"}"#);
    assert!(scan(&text).is_empty());
}

#[test]
fn scan_fence_classifies_chart_by_keys() {
    let text = json_fence(r#"{"datasets":[{"data":[1,2]}],"labels":["a","b"]}"#);
    let fragments = scan(&text);
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].kind, FragmentKind::Chart);
}

#[test]
fn scan_marker_payload_is_trimmed() {
    let text = "%%TABLE_JSON%%\n  {\"headers\":[],\"rows\":[]}\n%%END_TABLE%%";
    let fragments = scan(text);
    assert_eq!(fragments[0].raw, "{\"headers\":[],\"rows\":[]}");
}
