//! chatviz: structured-content extraction for assistant replies
//!
//! Enterprise Q&A backends embed tables and charts inside reply text
//! using marker blocks (`%%TABLE_JSON%%…%%END_TABLE%%`), fenced JSON
//! code blocks, and GitHub-flavored markdown tables. This crate parses
//! a reply once and returns cleaned prose plus canonical `TableModel`
//! and `ChartModel` values, so rendering code never touches raw JSON.
//!
//! The entry point is [`process`]:
//!
//! ```text
//! let result = chatviz::process(reply_text);
//! // result.cleaned_text, result.tables, result.charts, result.errors
//! ```
//!
//! Extraction fails open: a malformed fragment is reported in
//! `PipelineResult::errors` and its source text stays in the prose.

pub mod citations;
pub mod constants;
pub mod extract;
pub mod payload;
pub mod types;

pub use citations::{format_citations, Citation};
pub use extract::{plain_text, process};
pub use payload::AnswerPayload;
pub use types::{
    CellValue, ChartModel, ChartType, ExtractionFailure, FailureStage, PipelineResult,
    SeriesModel, TableModel,
};
