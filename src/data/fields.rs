//! Cell-level parsers for card list columns.
//!
//! These never fail: malformed input degrades to a default value and the
//! caller decides whether to record a warning.

use super::model::{SERIES_NONE, SERIES_OTHER};

const PLACEHOLDER: &str = "-";

/// Parse a cost cell.
///
/// An empty cell or the `-` placeholder is 0; `None` means the text is not a
/// non-negative integer.
pub fn parse_cost(raw: &str) -> Option<u32> {
    let value = raw.trim();
    if value.is_empty() || value == PLACEHOLDER {
        return Some(0);
    }
    value.parse::<u32>().ok()
}

/// Split a `/` or `／` separated cell, dropping empty and `-` segments.
pub fn parse_list_cell(raw: &str) -> Vec<String> {
    raw.split(['/', '／'])
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != PLACEHOLDER)
        .map(str::to_string)
        .collect()
}

/// Outcome of parsing a boolean flag cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Empty cell; the caller applies its own default.
    Unset,
    Value(bool),
    /// Unrecognized text.
    Invalid,
}

/// Parse a boolean flag cell, case-insensitively.
pub fn parse_flag(raw: &str) -> Flag {
    let value = raw.trim().to_ascii_lowercase();
    match value.as_str() {
        "" => Flag::Unset,
        "true" | "1" => Flag::Value(true),
        "false" | "0" | PLACEHOLDER => Flag::Value(false),
        _ => Flag::Invalid,
    }
}

/// Derive the series id from an acquisition info cell such as
/// `ブースターパック【OP-01】`.
pub fn extract_series_id(info: &str) -> String {
    if let Some(open) = info.find('【') {
        let rest = &info[open + '【'.len_utf8()..];
        if let Some(close) = rest.find('】') {
            let series = rest[..close].trim();
            if !series.is_empty() {
                return series.to_string();
            }
        }
    }

    let trimmed = info.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        SERIES_NONE.to_string()
    } else {
        SERIES_OTHER.to_string()
    }
}
