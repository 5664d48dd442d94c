//! Answer payload normalization
//!
//! Backends disagree about response envelopes: the answer may live under
//! `answer`, `response`, or `result`, may itself be a nested object, or
//! may be raw chart data with no prose at all. This module flattens all
//! of that into an `AnswerPayload` whose `answer` field is plain reply
//! text ready for the extraction pipeline.

use crate::constants::{GRAPH_CLOSE, GRAPH_OPEN};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Terms that suggest a reply is talking about chartable data. Used by
/// clients to decide whether to offer a "visualize this" affordance.
pub const VISUALIZATION_KEYWORDS: &[&str] = &[
    "trend", "stats", "chart", "graph", "visualization", "plot", "data", "analytics",
    "metrics", "statistics", "figures", "numbers", "comparison", "dashboard",
    "report", "analysis", "patterns", "measure", "tracking", "insights",
    "indicators", "dimensions", "variables", "dataset", "quantitative", "distribution",
    "average", "mean", "median", "percentage", "ratio", "proportion", "frequency",
    "historical", "timeline", "projection", "forecast", "prediction", "correlate",
    "series", "scatter", "bar", "line", "pie", "radar", "area", "histogram",
];

/// Case-insensitive substring match against [`VISUALIZATION_KEYWORDS`].
pub fn has_visualization_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    VISUALIZATION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// A normalized backend response envelope.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub citations: Vec<Value>,
    pub hyperlinks: Vec<String>,
    /// Backend-classified intent of the question, when provided.
    pub intent: Option<String>,
    pub error: bool,
}

impl AnswerPayload {
    pub fn error_message(message: impl Into<String>) -> Self {
        AnswerPayload {
            answer: message.into(),
            error: true,
            ..AnswerPayload::default()
        }
    }

    /// Normalize a raw backend response body.
    pub fn from_response(data: &Value) -> Self {
        if data.is_null() {
            return Self::error_message("No data received from the API.");
        }
        if let Some(message) = data.get("error").and_then(Value::as_str) {
            debug!(%message, "backend returned an error envelope");
            return Self::error_message(message);
        }

        let answer = ["answer", "response", "result"]
            .iter()
            .find_map(|key| data.get(*key).filter(|v| !v.is_null()))
            .map(answer_text)
            .unwrap_or_default();

        AnswerPayload {
            answer,
            citations: reference_list(data, "citation", "citations"),
            hyperlinks: reference_list(data, "hyperlink", "hyperlinks")
                .iter()
                .map(scalar_text)
                .collect(),
            intent: data
                .get("intent")
                .and_then(Value::as_str)
                .map(str::to_string),
            error: false,
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn graph_worthy(value: &Value) -> bool {
    let Some(obj) = value.as_object() else { return false };
    obj.contains_key("datasets")
        || obj.contains_key("series")
        || (obj.contains_key("xAxis") && obj.contains_key("yAxis"))
}

fn wrapped_graph(value: &Value) -> Option<String> {
    graph_worthy(value).then(|| {
        format!("Here's a visualization of the data:\n\n{GRAPH_OPEN}{value}{GRAPH_CLOSE}")
    })
}

/// Extract reply text from an answer value of unknown nesting.
///
/// Objects that are actually chart data come back wrapped in graph
/// markers so the extraction pipeline picks them up; unknown objects are
/// stringified rather than dropped.
pub fn answer_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            if map.contains_key("chartType") && map.contains_key("datasets") {
                if let Some(text) = wrapped_graph(value) {
                    return text;
                }
            }
            for key in ["answer", "content"] {
                if let Some(inner) = map.get(key) {
                    return if inner.is_object() {
                        answer_text(inner)
                    } else {
                        scalar_text(inner)
                    };
                }
            }
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            for key in ["visualization", "chart", "graph"] {
                if let Some(text) = map.get(key).and_then(wrapped_graph) {
                    return text;
                }
            }
            value.to_string()
        }
        other => other.to_string(),
    }
}

/// Pull a reference field that may be absent, scalar, or an array, and
/// split comma-joined string entries into individual references.
fn reference_list(data: &Value, key: &str, plural_key: &str) -> Vec<Value> {
    let raw = match data.get(key).or_else(|| data.get(plural_key)) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    };

    let mut out = Vec::new();
    for item in raw {
        match item {
            Value::String(s) if s.contains(',') => {
                out.extend(
                    s.split(',')
                        .map(str::trim)
                        .filter(|part| !part.is_empty())
                        .map(|part| Value::String(part.to_string())),
                );
            }
            Value::Null => {}
            other => out.push(other),
        }
    }
    out
}
