//! Leading numeral prefixes such as `01 - Projects` or `02. Areas`

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Default zero-padded width used by [`normalize_number_prefix`]
pub const DEFAULT_PREFIX_WIDTH: usize = 2;

// "01 - Name", "01-Name"
static DASH_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*-\s*(.+)$").expect("invalid dash prefix regex"));

// "01 Name", "01. Name"
static SPACE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.?\s+(.+)$").expect("invalid space prefix regex"));

/// Result of splitting a numeral prefix off a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPrefix {
    pub number: Option<String>,
    pub name: String,
    pub full_match: bool,
}

/// Output layout when re-adding a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixFormat {
    /// `01 - Name`
    #[default]
    Dash,
    /// `01 Name`
    Space,
}

pub fn extract_number_prefix(text: &str) -> NumberPrefix {
    let caps = DASH_PREFIX_RE
        .captures(text)
        .or_else(|| SPACE_PREFIX_RE.captures(text));

    match caps {
        Some(caps) => NumberPrefix {
            number: Some(caps[1].to_string()),
            name: caps[2].to_string(),
            full_match: true,
        },
        None => NumberPrefix {
            number: None,
            name: text.to_string(),
            full_match: false,
        },
    }
}

pub fn has_number_prefix(text: &str) -> bool {
    DASH_PREFIX_RE.is_match(text) || SPACE_PREFIX_RE.is_match(text)
}

/// Drop the numeral and its separator, keeping the name
pub fn strip_number_prefix(text: &str) -> String {
    extract_number_prefix(text).name
}

pub fn add_number_prefix(name: &str, number: &str, format: PrefixFormat) -> String {
    match format {
        PrefixFormat::Dash => format!("{} - {}", number, name),
        PrefixFormat::Space => format!("{} {}", number, name),
    }
}

/// Zero-pad the numeral to `width` digits, rewriting into `NN - Name` form.
/// Text without a prefix is returned unchanged.
pub fn normalize_number_prefix(text: &str, width: usize) -> String {
    let extracted = extract_number_prefix(text);
    match extracted.number {
        Some(number) => {
            let padded = format!("{:0>width$}", number, width = width);
            add_number_prefix(&extracted.name, &padded, PrefixFormat::Dash)
        }
        None => text.to_string(),
    }
}
