//! Structured-content extraction module
//!
//! This module turns a raw assistant reply into prose plus canonical
//! visualization models. The stages run in a fixed order:
//!
//! 1. `prepass` — escape-sequence cleanup and legacy marker rewriting
//! 2. `scanner` — locate marker, fence, and markdown-table fragments
//! 3. `parser` — decode each fragment body to a JSON value
//! 4. `shape` — classify the payload shape and build a model draft
//! 5. `sanitize` — coerce values, assign colors, finish the model
//! 6. `reassemble` — splice extracted fragments out of the prose
//!
//! ## Error Handling
//!
//! All stages return `ExtractResult<T>` which uses the `ExtractError`
//! type. Failures are per-fragment: the pipeline records them in
//! `PipelineResult::errors` and leaves the offending text in the prose.

mod error;
mod markdown;
mod parser;
mod pipeline;
mod prepass;
mod reassemble;
mod sanitize;
mod scanner;
mod shape;

pub use error::*;
pub use markdown::*;
pub use parser::*;
pub use pipeline::*;
pub use prepass::*;
pub use reassemble::*;
pub use sanitize::*;
pub use scanner::*;
pub use shape::*;
