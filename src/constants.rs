//! Pipeline-wide constants.
//!
//! Centralizes marker tokens, defaults, and the chart palette to make the
//! codebase more maintainable and self-documenting.

// ============================================================================
// Marker Tokens
// ============================================================================

/// Opening marker for an embedded table payload
pub const TABLE_OPEN: &str = "%%TABLE_JSON%%";

/// Closing marker for an embedded table payload
pub const TABLE_CLOSE: &str = "%%END_TABLE%%";

/// Opening marker for an embedded chart payload
pub const GRAPH_OPEN: &str = "%%GRAPH_JSON%%";

/// Closing marker for an embedded chart payload
pub const GRAPH_CLOSE: &str = "%%END_GRAPH%%";

/// Fence opener recognized for embedded JSON payloads
pub const JSON_FENCE_OPEN: &str = "```json";

/// Fence terminator
pub const FENCE: &str = "```";

// ============================================================================
// Normalization Defaults
// ============================================================================

/// Series name for the single series of a legacy axis-pair chart
pub const DEFAULT_SERIES_NAME: &str = "Value";

/// Placeholder substituted for table fragments in plain-text renditions
pub const TABLE_PLACEHOLDER: &str = "[Table]";

/// Placeholder substituted for chart fragments in plain-text renditions
pub const GRAPH_PLACEHOLDER: &str = "[Graph]";

/// Placeholder substituted for fenced code in plain-text renditions
pub const CODE_PLACEHOLDER: &str = "[Code Block]";

// ============================================================================
// Chart Palette
// ============================================================================

/// Chart color palette - distinct tokens assigned round-robin by series
/// index when a payload supplies no colors of its own.
pub const CHART_PALETTE: [&str; 15] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff8042", "#0088FE",
    "#00C49F", "#FFBB28", "#FF8042", "#6b486b", "#a05d56",
    "#d0743c", "#ff8c00", "#8a89a6", "#7b6888", "#6b486b",
];

/// Default URL for a citation with no resolvable link
pub const CITATION_FALLBACK_URL: &str = "#";
