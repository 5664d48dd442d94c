//! Error types for fragment extraction
//!
//! Provides unified error handling for every stage of the pipeline. All of
//! these are local and recoverable: the orchestrator records them in
//! `PipelineResult::errors` and keeps going, and the failed fragment's raw
//! text stays visible in the cleaned prose.

use crate::types::{FailureStage, FragmentKind};
use thiserror::Error;

/// Errors that can occur while decoding or classifying a fragment
#[derive(Error, Debug)]
pub enum ExtractError {
    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Markdown table region that yields no usable header/body rows
    #[error("Malformed markdown table: {0}")]
    MarkdownTable(String),

    /// Valid JSON that matches no known shape for its fragment kind
    #[error("Unrecognized {kind} shape: {reason}")]
    UnknownShape { kind: FragmentKind, reason: String },

    /// A chart shape that resolves to zero series
    #[error("Chart has no series")]
    EmptyChart,
}

impl ExtractError {
    /// Which pipeline stage this error belongs to, for failure records.
    pub fn stage(&self) -> FailureStage {
        match self {
            ExtractError::Json(_) | ExtractError::MarkdownTable(_) => FailureStage::Parse,
            ExtractError::UnknownShape { .. } | ExtractError::EmptyChart => FailureStage::Shape,
        }
    }
}

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;
