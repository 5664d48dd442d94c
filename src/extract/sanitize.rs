//! Value sanitization
//!
//! Final cleanup pass over a freshly classified table or chart before it
//! leaves the pipeline: numeric coercion for chart series, color token
//! cleanup and palette assignment, deterministic label defaults, and the
//! pie aggregation rule. After this pass a renderer can consume the model
//! without further validation.

use crate::constants::CHART_PALETTE;
use crate::extract::error::{ExtractError, ExtractResult};
use crate::extract::shape::ChartDraft;
use crate::types::{CellValue, ChartModel, ChartType, SeriesModel};
use serde_json::Value;
use std::collections::BTreeMap;

/// Coerce a chart value to a number.
///
/// Numeric strings are parsed, tolerating a single currency/percent
/// symbol and thousands separators; anything non-numeric or missing
/// becomes 0.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            // Symbols may sit apart from the digits ("€ 99"), so
            // whitespace goes with them.
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '$' | '%' | '€' | '£' | ',') && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Convert a JSON value to a table cell.
///
/// Table cells are presentation-oriented: strings stay strings, numbers
/// stay numbers, and composite values are flattened to text.
pub fn cell_value(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::empty(),
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(0.0)),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Array(items) => CellValue::Text(
            items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

/// Strip stray backticks from a color token (an artifact of payloads that
/// embed code-quoted hex values) and trim whitespace.
pub fn clean_color(color: &str) -> String {
    color.replace('`', "").trim().to_string()
}

/// Sanitize a chart draft into the canonical model.
pub fn sanitize_chart(draft: ChartDraft) -> ExtractResult<ChartModel> {
    if draft.series.is_empty() {
        return Err(ExtractError::EmptyChart);
    }

    let chart_type = draft.chart_type;
    let mut category_labels = draft.category_labels;
    let mut series = Vec::with_capacity(draft.series.len());
    let mut color_assignment = BTreeMap::new();

    for (index, entry) in draft.series.into_iter().enumerate() {
        let name = entry
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Series {}", index + 1));

        let mut values: Vec<f64> = entry.values.iter().map(coerce_number).collect();
        match chart_type {
            // One slice per series: aggregate to a single scalar.
            ChartType::Pie => values = vec![values.iter().sum()],
            // Scatter keeps its raw point values.
            ChartType::Scatter => {}
            // Category charts align every series to the label count.
            _ => values.resize(category_labels.len(), 0.0),
        }

        let color = entry
            .color
            .map(|c| clean_color(&c))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| CHART_PALETTE[index % CHART_PALETTE.len()].to_string());
        color_assignment.insert(name.clone(), color);

        series.push(SeriesModel { name, values });
    }

    if !chart_type.is_categorical() {
        category_labels.clear();
    }

    Ok(ChartModel {
        chart_type,
        title: draft.title,
        category_labels,
        series,
        x_axis_label: draft.x_axis_label,
        y_axis_label: draft.y_axis_label,
        color_assignment,
    })
}
