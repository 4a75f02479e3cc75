//! Foldertag - rule-based mapping between folder paths and tags
//!
//! Given an ordered rule set, decides which rule applies to a folder path or a
//! hashtag-style tag and produces its counterpart through a fixed transform
//! pipeline (emoji, number prefix, case, custom regex, tag sanitizing).
//!
//! Everything here is synchronous and side-effect free apart from logging;
//! rule sets are borrowed read-only per call.

pub mod config;
pub mod pattern;
pub mod rules;
pub mod transform;

pub use config::Config;
pub use pattern::{PatternError, glob_to_regex, is_glob_pattern, matches_pattern, pattern_to_regex};
pub use rules::{
    Direction, MatchContext, MatchType, Rule, RuleEngine, RuleMatch, RuleOptions, validate_rule,
};
pub use transform::{TransformConfig, TransformOptions, folder_to_tag, tag_to_folder};

/// Current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
