//! Fragment decoding
//!
//! Turns a raw fragment payload into a decoded JSON value or a typed
//! error. JSON payloads are parsed strictly with no repair heuristics:
//! a malformed fragment always becomes an error, never a partial guess,
//! which bounds failure blast radius to one block. Markdown-table
//! fragments are decoded by the table grammar instead.

use crate::extract::error::ExtractResult;
use crate::extract::markdown;
use crate::types::{FragmentSyntax, RawFragment};
use serde_json::Value;

/// A fragment plus its decode outcome. Exactly one of a decoded value or
/// an error is present, carried by the `Result`.
#[derive(Debug)]
pub struct ParsedFragment {
    pub fragment: RawFragment,
    pub value: ExtractResult<Value>,
}

/// Decode one fragment's payload.
pub fn parse_fragment(fragment: RawFragment) -> ParsedFragment {
    let value = decode(&fragment);
    ParsedFragment { fragment, value }
}

fn decode(fragment: &RawFragment) -> ExtractResult<Value> {
    match fragment.syntax {
        FragmentSyntax::MarkdownTable => markdown::table_value(&fragment.raw),
        FragmentSyntax::Marker | FragmentSyntax::Fence => {
            Ok(serde_json::from_str(&fragment.raw)?)
        }
    }
}
