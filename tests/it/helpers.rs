//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - Marker builders (`table_marker()`, `graph_marker()`) for composing reply bodies
//! - Canned payloads for the common chart shapes
//! - Assertion helpers for the model invariants

use chatviz::{ChartModel, TableModel};

// ============================================================================
// Reply body builders
// ============================================================================

/// Wrap a JSON payload in table markers.
pub fn table_marker(json: &str) -> String {
    format!("%%TABLE_JSON%%{json}%%END_TABLE%%")
}

/// Wrap a JSON payload in graph markers.
pub fn graph_marker(json: &str) -> String {
    format!("%%GRAPH_JSON%%{json}%%END_GRAPH%%")
}

/// Wrap a JSON payload in a ```json fence.
pub fn json_fence(json: &str) -> String {
    format!("```json\n{json}\n```")
}

/// A minimal valid table payload with one row.
pub fn simple_table_json() -> &'static str {
    r#"{"headers":["Name","Score"],"rows":[["alpha",10]]}"#
}

/// A minimal multi-series chart payload.
pub fn simple_chart_json() -> &'static str {
    r#"{"chartType":"line","series":[{"name":"A","data":[1,2]}],"xAxis":{"data":["x","y"]}}"#
}

// ============================================================================
// Invariant assertions
// ============================================================================

/// Every row must have exactly as many cells as there are headers.
pub fn assert_rectangular(table: &TableModel) {
    for (i, row) in table.rows.iter().enumerate() {
        assert_eq!(
            row.len(),
            table.headers.len(),
            "row {i} has {} cells, expected {}",
            row.len(),
            table.headers.len()
        );
    }
}

/// Every series of a category chart must match the label count.
pub fn assert_series_aligned(chart: &ChartModel) {
    if !chart.chart_type.is_categorical() {
        return;
    }
    for series in &chart.series {
        assert_eq!(
            series.values.len(),
            chart.category_labels.len(),
            "series {:?} out of step with category labels",
            series.name
        );
    }
}
