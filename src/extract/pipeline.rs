//! Extraction pipeline
//!
//! The orchestrator wires the stages together: prepass cleanup, fragment
//! scanning, per-fragment parse / shape classification / sanitization, and
//! prose reassembly. Every fragment is processed independently: a fragment
//! that fails at any stage is recorded in `errors` and its source text is
//! left in the prose, so one bad payload never blanks the reply.

use crate::extract::error::ExtractResult;
use crate::extract::{parser, prepass, reassemble, sanitize, scanner, shape};
use crate::types::{
    ChartModel, ExtractionFailure, FragmentKind, PipelineResult, RawFragment, TableModel,
};
use std::ops::Range;
use tracing::{debug, warn};

enum Extracted {
    Table(TableModel),
    Chart(ChartModel),
}

fn extract_fragment(fragment: RawFragment) -> ExtractResult<Extracted> {
    let kind = fragment.kind;
    let value = parser::parse_fragment(fragment).value?;
    match kind {
        FragmentKind::Table => {
            let shape = shape::classify_table(&value)?;
            Ok(Extracted::Table(shape::table_model(shape)))
        }
        FragmentKind::Chart => {
            let draft = shape::chart_draft(&value)?;
            Ok(Extracted::Chart(sanitize::sanitize_chart(draft)?))
        }
    }
}

/// Run the full pipeline over a reply body.
///
/// Tables, charts, and errors all come back in document order. The
/// cleaned text has successfully extracted fragments removed and its
/// whitespace normalized; running the output back through `process` is a
/// no-op on the prose.
pub fn process(text: &str) -> PipelineResult {
    let prepared = prepass::prepare(text);
    let fragments = scanner::scan(&prepared);
    debug!(count = fragments.len(), "scanned visualization fragments");

    let mut tables = Vec::new();
    let mut charts = Vec::new();
    let mut errors = Vec::new();
    let mut consumed: Vec<Range<usize>> = Vec::new();

    for (fragment_index, fragment) in fragments.into_iter().enumerate() {
        let range = fragment.range();
        let syntax = fragment.syntax;
        match extract_fragment(fragment) {
            Ok(Extracted::Table(table)) => {
                debug!(fragment_index, ?syntax, "extracted table");
                tables.push(table);
                consumed.push(range);
            }
            Ok(Extracted::Chart(chart)) => {
                debug!(fragment_index, ?syntax, chart_type = %chart.chart_type, "extracted chart");
                charts.push(chart);
                consumed.push(range);
            }
            Err(err) => {
                warn!(fragment_index, ?syntax, %err, "fragment extraction failed");
                errors.push(ExtractionFailure {
                    fragment_index,
                    stage: err.stage(),
                    reason: err.to_string(),
                });
            }
        }
    }

    PipelineResult {
        cleaned_text: reassemble::reassemble(&prepared, &consumed),
        tables,
        charts,
        errors,
    }
}
