//! Shape classification
//!
//! A decoded fragment may follow any of several historical payload
//! layouts produced by an evolving backend. This module detects which
//! known shape a value matches and converts it into one canonical model
//! per content kind. Detection is an explicit ordered list of matchers,
//! each returning a tagged variant, resolved first-match in a fixed
//! priority order; anything unmatched is a classification error.

use crate::constants::DEFAULT_SERIES_NAME;
use crate::extract::error::{ExtractError, ExtractResult};
use crate::extract::sanitize;
use crate::types::{CellValue, ChartType, FragmentKind, TableModel};
use serde_json::{Map, Value};

// ============================================================================
// Table Shapes
// ============================================================================

/// The table layouts the normalizer recognizes, in match priority order.
#[derive(Debug)]
pub enum TableShape {
    /// `{"headers": [...], "rows": [[...], ...]}` direct form
    HeadersRows {
        headers: Vec<Value>,
        rows: Vec<Value>,
    },
    /// An array of flat objects, one per row
    RowMaps(Vec<Map<String, Value>>),
}

/// Match a decoded value against the known table shapes, in order.
pub fn classify_table(value: &Value) -> ExtractResult<TableShape> {
    if let Some(obj) = value.as_object() {
        if let (Some(headers), Some(rows)) = (
            obj.get("headers").and_then(Value::as_array),
            obj.get("rows").and_then(Value::as_array),
        ) {
            return Ok(TableShape::HeadersRows {
                headers: headers.clone(),
                rows: rows.clone(),
            });
        }
    }

    if let Some(items) = value.as_array() {
        if !items.is_empty() && items.iter().all(Value::is_object) {
            let maps = items
                .iter()
                .filter_map(Value::as_object)
                .cloned()
                .collect();
            return Ok(TableShape::RowMaps(maps));
        }
    }

    Err(ExtractError::UnknownShape {
        kind: FragmentKind::Table,
        reason: "expected {headers, rows} or an array of row objects".to_string(),
    })
}

/// Convert a classified table shape into the canonical model.
///
/// Every row ends up with exactly `headers.len()` cells: short rows are
/// right-padded with empty strings, long rows truncated.
pub fn table_model(shape: TableShape) -> TableModel {
    match shape {
        TableShape::HeadersRows { headers, rows } => {
            let headers: Vec<String> = headers.iter().map(label_string).collect();
            let rows = rows
                .iter()
                .filter_map(Value::as_array)
                .map(|row| {
                    let mut cells: Vec<CellValue> =
                        row.iter().map(sanitize::cell_value).collect();
                    cells.resize(headers.len(), CellValue::empty());
                    cells
                })
                .collect();
            TableModel { headers, rows }
        }
        TableShape::RowMaps(maps) => {
            // Headers = union of keys across all rows, in first-seen order.
            let mut headers: Vec<String> = Vec::new();
            for map in &maps {
                for key in map.keys() {
                    if !headers.iter().any(|h| h == key) {
                        headers.push(key.clone());
                    }
                }
            }
            let rows = maps
                .iter()
                .map(|map| {
                    headers
                        .iter()
                        .map(|h| {
                            map.get(h)
                                .map(sanitize::cell_value)
                                .unwrap_or_else(CellValue::empty)
                        })
                        .collect()
                })
                .collect();
            TableModel { headers, rows }
        }
    }
}

// ============================================================================
// Chart Shapes
// ============================================================================

/// One series as found in the payload, before sanitization.
#[derive(Debug)]
pub struct SeriesDraft {
    pub name: Option<String>,
    pub color: Option<String>,
    pub values: Vec<Value>,
}

/// The chart layouts the normalizer recognizes, in match priority order.
#[derive(Debug)]
pub enum ChartShape {
    /// `{"series": [{name, data}, ...], "xAxis": {"data": [...]}}`
    MultiSeries {
        labels: Vec<Value>,
        series: Vec<SeriesDraft>,
    },
    /// `{"xAxis": {"data": [...]}, "yAxis": {"data": [...]}}` single series
    LegacyAxisPair {
        labels: Vec<Value>,
        values: Vec<Value>,
        series_name: Option<String>,
    },
    /// `{"labels": [...], "datasets": [{label, data}, ...]}`
    DatasetLabels {
        labels: Vec<Value>,
        datasets: Vec<SeriesDraft>,
    },
}

/// A chart after classification, before value sanitization.
#[derive(Debug)]
pub struct ChartDraft {
    pub chart_type: ChartType,
    pub title: Option<String>,
    pub category_labels: Vec<String>,
    pub series: Vec<SeriesDraft>,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

fn axis_data<'a>(value: &'a Value, axis: &str) -> Option<&'a Vec<Value>> {
    value.get(axis)?.get("data")?.as_array()
}

fn axis_label(value: &Value, axis: &str, flat_key: &str) -> String {
    value
        .get(flat_key)
        .and_then(Value::as_str)
        .or_else(|| value.get(axis).and_then(|a| a.get("label")).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Series color from a dataset entry: `backgroundColor` wins over
/// `borderColor`; an array of colors contributes its first string.
fn entry_color(entry: &Map<String, Value>) -> Option<String> {
    for key in ["backgroundColor", "borderColor", "color"] {
        match entry.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Array(items)) => {
                if let Some(first) = items.iter().find_map(Value::as_str) {
                    return Some(first.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn entry_series(entry: &Map<String, Value>, name_key: &str) -> Option<SeriesDraft> {
    let values = entry.get("data")?.as_array()?.clone();
    Some(SeriesDraft {
        name: entry.get(name_key).and_then(Value::as_str).map(str::to_string),
        color: entry_color(entry),
        values,
    })
}

fn try_multi_series(value: &Value) -> Option<ChartShape> {
    let entries = value.get("series")?.as_array()?;
    let labels = axis_data(value, "xAxis")?;
    let series: Vec<SeriesDraft> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|e| entry_series(e, "name"))
        .collect();
    if series.is_empty() {
        return None;
    }
    Some(ChartShape::MultiSeries {
        labels: labels.clone(),
        series,
    })
}

fn try_legacy_axis_pair(value: &Value) -> Option<ChartShape> {
    let x = axis_data(value, "xAxis")?;
    let y = axis_data(value, "yAxis")?;
    // Canonical length is the shorter of the two axes.
    let len = x.len().min(y.len());
    let series_name = value
        .get("yAxis")
        .and_then(|a| a.get("label"))
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(ChartShape::LegacyAxisPair {
        labels: x[..len].to_vec(),
        values: y[..len].to_vec(),
        series_name,
    })
}

fn try_dataset_labels(value: &Value) -> Option<ChartShape> {
    let entries = value.get("datasets")?.as_array()?;
    let datasets: Vec<SeriesDraft> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|e| entry_series(e, "label"))
        .collect();
    if datasets.is_empty() {
        return None;
    }
    // Labels are usually present; some producers omit them, in which
    // case positional item labels are generated.
    let labels = match value.get("labels").and_then(Value::as_array) {
        Some(labels) => labels.clone(),
        None => (0..datasets[0].values.len())
            .map(|i| Value::String(format!("Item {}", i + 1)))
            .collect(),
    };
    Some(ChartShape::DatasetLabels { labels, datasets })
}

/// Match a decoded value against the known chart shapes, in order.
///
/// Multi-series wins over the legacy axis pair: an object carrying both a
/// `series` array and `xAxis`/`yAxis` data classifies as multi-series.
pub fn classify_chart(value: &Value) -> ExtractResult<ChartShape> {
    try_multi_series(value)
        .or_else(|| try_legacy_axis_pair(value))
        .or_else(|| try_dataset_labels(value))
        .ok_or_else(|| ExtractError::UnknownShape {
            kind: FragmentKind::Chart,
            reason: "expected series/xAxis, xAxis/yAxis, or labels/datasets".to_string(),
        })
}

/// Chart type precedence: explicit `chartType` string, then the first
/// entry of a `chartTypes` array, then bar. Each candidate is validated
/// case-insensitively against the supported set.
fn resolve_chart_type(value: &Value) -> ChartType {
    value
        .get("chartType")
        .and_then(Value::as_str)
        .and_then(ChartType::parse)
        .or_else(|| {
            value
                .get("chartTypes")
                .and_then(Value::as_array)
                .and_then(|types| types.first())
                .and_then(Value::as_str)
                .and_then(ChartType::parse)
        })
        .unwrap_or_default()
}

/// Classify a chart value and assemble the pre-sanitization draft.
pub fn chart_draft(value: &Value) -> ExtractResult<ChartDraft> {
    let shape = classify_chart(value)?;

    let chart_type = resolve_chart_type(value);
    let title = value
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|t| !t.trim().is_empty());
    let x_axis_label = axis_label(value, "xAxis", "xAxisLabel");
    let y_axis_label = axis_label(value, "yAxis", "yAxisLabel");

    let (category_labels, series) = match shape {
        ChartShape::MultiSeries { labels, series } => {
            (labels.iter().map(label_string).collect(), series)
        }
        ChartShape::LegacyAxisPair {
            labels,
            values,
            series_name,
        } => {
            let name = series_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERIES_NAME.to_string());
            (
                labels.iter().map(label_string).collect(),
                vec![SeriesDraft {
                    name: Some(name),
                    color: None,
                    values,
                }],
            )
        }
        ChartShape::DatasetLabels { labels, datasets } => {
            (labels.iter().map(label_string).collect(), datasets)
        }
    };

    Ok(ChartDraft {
        chart_type,
        title,
        category_labels,
        series,
        x_axis_label,
        y_axis_label,
    })
}

/// Render a label value as a string without JSON quoting artifacts.
pub fn label_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
