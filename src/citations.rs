//! Citation formatting
//!
//! Turns the loosely typed citation and hyperlink lists that come back
//! from the backend into display-ready entries: stable id, label text,
//! a document-kind emoji picked from the filename, and a URL resolved
//! through a chain of fallbacks.

use crate::constants::CITATION_FALLBACK_URL;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Filename substrings mapped to a display emoji, checked in order.
pub const DOCUMENT_KINDS: &[(&str, &str)] = &[
    ("report", "📊"),
    ("case", "📱"),
    ("study", "📚"),
    ("analysis", "📈"),
    ("article", "📃"),
    ("paper", "📄"),
    ("survey", "📋"),
    ("data", "📈"),
    ("document", "📝"),
];

pub const DEFAULT_DOCUMENT_EMOJI: &str = "📄";

/// Pick an emoji for a source by substring match on its name.
pub fn document_emoji(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    DOCUMENT_KINDS
        .iter()
        .find(|(kind, _)| lower.contains(kind))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_DOCUMENT_EMOJI)
}

/// A display-ready source reference.
#[derive(Debug, Clone, Serialize)]
pub struct Citation {
    pub id: Uuid,
    pub text: String,
    pub emoji: String,
    pub url: String,
}

/// Pair citations with hyperlinks by index and format each for display.
///
/// A citation may be a bare string (the source name) or an object with
/// `title`/`name` and `url`/`link`/`href` fields. The hyperlink at the
/// same index wins over any URL embedded in the citation object.
pub fn format_citations(citations: &[Value], hyperlinks: &[String]) -> Vec<Citation> {
    citations
        .iter()
        .enumerate()
        .filter(|(_, citation)| !citation.is_null())
        .map(|(index, citation)| {
            let text = match citation {
                Value::String(s) => s.clone(),
                other => ["title", "name"]
                    .iter()
                    .find_map(|key| other.get(*key).and_then(Value::as_str))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Source {}", index + 1)),
            };

            let url = hyperlinks
                .get(index)
                .filter(|link| !link.is_empty())
                .cloned()
                .or_else(|| {
                    ["url", "link", "href"]
                        .iter()
                        .find_map(|key| citation.get(*key).and_then(Value::as_str))
                        .map(str::to_string)
                })
                .unwrap_or_else(|| CITATION_FALLBACK_URL.to_string());

            Citation {
                id: Uuid::new_v4(),
                emoji: document_emoji(&text).to_string(),
                text,
                url,
            }
        })
        .collect()
}
