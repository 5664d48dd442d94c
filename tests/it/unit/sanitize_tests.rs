//! Value sanitization tests: numeric coercion, colors, pie and scatter.

use crate::helpers::assert_series_aligned;
use chatviz::constants::CHART_PALETTE;
use chatviz::extract::{chart_draft, coerce_number, sanitize_chart};
use chatviz::types::ChartType;
use serde_json::json;

fn sanitize(value: serde_json::Value) -> chatviz::ChartModel {
    sanitize_chart(chart_draft(&value).unwrap()).unwrap()
}

#[test]
fn coerce_number_tolerates_currency_and_separators() {
    assert_eq!(coerce_number(&json!("$1,234.5")), 1234.5);
    assert_eq!(coerce_number(&json!("42%")), 42.0);
    assert_eq!(coerce_number(&json!("€ 99")), 99.0);
    assert_eq!(coerce_number(&json!(7)), 7.0);
}

#[test]
fn coerce_number_defaults_to_zero() {
    assert_eq!(coerce_number(&json!("n/a")), 0.0);
    assert_eq!(coerce_number(&json!(null)), 0.0);
    assert_eq!(coerce_number(&json!(true)), 0.0);
}

#[test]
fn unnamed_series_get_positional_names() {
    let chart = sanitize(json!({
        "labels": ["a"],
        "datasets": [{"data": [1]}, {"data": [2]}]
    }));
    assert_eq!(chart.series[0].name, "Series 1");
    assert_eq!(chart.series[1].name, "Series 2");
}

#[test]
fn palette_colors_assigned_round_robin_by_series_index() {
    let datasets: Vec<_> = (0..CHART_PALETTE.len() + 1)
        .map(|i| json!({"label": format!("s{i}"), "data": [1]}))
        .collect();
    let chart = sanitize(json!({"labels": ["a"], "datasets": datasets}));
    assert_eq!(chart.color_assignment["s0"], CHART_PALETTE[0]);
    let wrapped = format!("s{}", CHART_PALETTE.len());
    assert_eq!(chart.color_assignment[&wrapped], CHART_PALETTE[0]);
}

#[test]
fn explicit_colors_survive_with_backticks_stripped() {
    let chart = sanitize(json!({
        "labels": ["a"],
        "datasets": [{"label": "S", "data": [1], "backgroundColor": "`#ff0000`"}]
    }));
    assert_eq!(chart.color_assignment["S"], "#ff0000");
}

#[test]
fn pie_chart_aggregates_each_series_to_a_sum() {
    let chart = sanitize(json!({
        "chartType": "pie",
        "series": [{"name": "A", "data": [1, 2, 3]}],
        "xAxis": {"data": ["x", "y", "z"]}
    }));
    assert_eq!(chart.chart_type, ChartType::Pie);
    assert_eq!(chart.series[0].values, vec![6.0]);
    assert!(chart.category_labels.is_empty());
}

#[test]
fn scatter_chart_keeps_values_but_drops_labels() {
    let chart = sanitize(json!({
        "chartType": "scatter",
        "series": [{"name": "A", "data": [3, 1, 4, 1, 5]}],
        "xAxis": {"data": ["a", "b"]}
    }));
    assert!(chart.category_labels.is_empty());
    assert_eq!(chart.series[0].values.len(), 5);
}

#[test]
fn category_series_are_resized_to_label_count() {
    let chart = sanitize(json!({
        "labels": ["a", "b", "c"],
        "datasets": [{"label": "S", "data": [1]}]
    }));
    assert_series_aligned(&chart);
    assert_eq!(chart.series[0].values, vec![1.0, 0.0, 0.0]);
}

#[test]
fn chart_without_series_is_rejected() {
    assert!(chart_draft(&json!({"labels": ["a"], "datasets": []})).is_err());
}
