//! Core types for the chatviz extraction pipeline.
//!
//! This module defines the canonical models every recognized payload shape
//! is normalized into, plus the fragment bookkeeping types the pipeline
//! stages pass between each other. The models are the renderer-facing
//! contract: once a `TableModel` or `ChartModel` leaves the pipeline, no
//! further validation is required to draw it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Chart Types
// ============================================================================

/// The chart renderings the downstream component supports.
///
/// Unrecognized type strings are rewritten to [`ChartType::Bar`] at
/// normalization time, so a model always carries a valid variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
    Scatter,
    Radar,
    Composed,
    Treemap,
}

impl ChartType {
    /// Parse a chart type string, case-insensitively.
    ///
    /// Returns `None` for anything outside the supported set; callers
    /// decide the fallback (the sanitizer uses [`ChartType::Bar`]).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Some(ChartType::Bar),
            "line" => Some(ChartType::Line),
            "pie" => Some(ChartType::Pie),
            "area" => Some(ChartType::Area),
            "scatter" => Some(ChartType::Scatter),
            "radar" => Some(ChartType::Radar),
            "composed" => Some(ChartType::Composed),
            "treemap" => Some(ChartType::Treemap),
            _ => None,
        }
    }

    /// Whether this chart type plots against shared category labels.
    ///
    /// Pie charts aggregate each series to a single slice and scatter
    /// charts plot raw point pairs, so neither carries category labels.
    pub fn is_categorical(&self) -> bool {
        !matches!(self, ChartType::Pie | ChartType::Scatter)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
            ChartType::Radar => "radar",
            ChartType::Composed => "composed",
            ChartType::Treemap => "treemap",
        };
        write!(f, "{}", name)
    }
}

impl Default for ChartType {
    fn default() -> Self {
        ChartType::Bar
    }
}

// ============================================================================
// Canonical Models
// ============================================================================

/// A single table cell: text or a number, as delivered by the payload.
///
/// Table cells are presentation-oriented and are not coerced; a numeric
/// string like `"10"` stays a string. JSON numbers stay numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// The empty cell used to right-pad short rows.
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Canonical table extracted from an assistant reply.
///
/// Invariant: every row has exactly `headers.len()` cells. Short rows are
/// right-padded with empty strings, long rows truncated, at build time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableModel {
    /// Column headers, in document order. Uniqueness is not required.
    pub headers: Vec<String>,
    /// Data rows; each row has one cell per header.
    pub rows: Vec<Vec<CellValue>>,
}

impl TableModel {
    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One named numeric sequence in a chart.
///
/// For category charts, `values.len()` equals the chart's category label
/// count (missing entries default to 0). Pie charts carry a single
/// aggregated value per series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesModel {
    pub name: String,
    pub values: Vec<f64>,
}

/// Canonical chart ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    /// Always a supported variant; see [`ChartType::parse`].
    pub chart_type: ChartType,
    /// Optional chart title from the payload.
    pub title: Option<String>,
    /// X-axis tick labels. Empty for pie and scatter charts.
    pub category_labels: Vec<String>,
    /// At least one series; a shape with none is a classification error.
    pub series: Vec<SeriesModel>,
    /// X-axis label; empty string when the payload supplies none.
    pub x_axis_label: String,
    /// Y-axis label; empty string when the payload supplies none.
    pub y_axis_label: String,
    /// Color token per series name, palette-assigned when unspecified.
    pub color_assignment: BTreeMap<String, String>,
}

// ============================================================================
// Fragments
// ============================================================================

/// The content kind a fragment is expected to carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Table,
    Chart,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentKind::Table => write!(f, "table"),
            FragmentKind::Chart => write!(f, "chart"),
        }
    }
}

/// Which surface syntax a fragment was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentSyntax {
    /// `%%TABLE_JSON%%…%%END_TABLE%%` / `%%GRAPH_JSON%%…%%END_GRAPH%%`
    Marker,
    /// A fenced ```json code block that looks like chart/table data
    Fence,
    /// A GitHub-flavored markdown table
    MarkdownTable,
}

/// A delimited sub-region of assistant text identified by the scanner.
///
/// `start..end` is the byte range of the whole delimited region in the
/// scanned text (markers/fence included); `raw` is the inner payload with
/// the delimiters stripped. Fragments live for a single pipeline pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFragment {
    pub kind: FragmentKind,
    pub syntax: FragmentSyntax,
    pub raw: String,
    pub start: usize,
    pub end: usize,
}

impl RawFragment {
    /// Byte range of the delimited region in the source text.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

// ============================================================================
// Pipeline Result
// ============================================================================

/// What stage a fragment failed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    /// Invalid JSON inside a recognized region
    Parse,
    /// Valid JSON that matches no known table/chart shape
    Shape,
}

/// A per-fragment failure recorded without aborting the pipeline.
///
/// The failed fragment's raw text is left in the cleaned prose so the
/// user can see it was not rendered (fail-open, not fail-silent-drop).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionFailure {
    /// Index of the fragment in document order, as found by the scanner.
    pub fragment_index: usize,
    pub stage: FailureStage,
    pub reason: String,
}

/// Everything the pipeline produces for one assistant message.
///
/// Owned by the message it was produced for and never mutated afterwards;
/// re-running the pipeline on edited text produces a fresh result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// The prose with every consumed fragment range deleted.
    pub cleaned_text: String,
    /// Extracted tables, in document order.
    pub tables: Vec<TableModel>,
    /// Extracted charts, in document order.
    pub charts: Vec<ChartModel>,
    /// Per-fragment failures, in document order.
    pub errors: Vec<ExtractionFailure>,
}

impl PipelineResult {
    /// Whether any table or chart was extracted.
    pub fn has_visualizations(&self) -> bool {
        !self.tables.is_empty() || !self.charts.is_empty()
    }
}
