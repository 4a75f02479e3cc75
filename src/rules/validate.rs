//! Rule validation - structural and pattern checks for display by a host

use serde::Serialize;

use super::{MatchType, Rule};
use crate::pattern::{PatternError, pattern_to_regex};

/// Outcome of [`validate_rule`]; `valid` is true iff `errors` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a rule, collecting every problem rather than stopping at the first.
///
/// The error strings are matched on by callers; keep them stable.
pub fn validate_rule(rule: &Rule) -> ValidationResult {
    let mut errors = Vec::new();

    if rule.id.trim().is_empty() {
        errors.push("Rule must have a valid ID".to_string());
    }

    if rule.name.trim().is_empty() {
        errors.push("Rule must have a valid name".to_string());
    }

    if rule.priority < 0 {
        errors.push("Rule priority must be a non-negative number".to_string());
    }

    let folder_pattern = rule.pattern_for(MatchType::Folder);
    let tag_pattern = rule.pattern_for(MatchType::Tag);

    if rule.direction.needs_folder_pattern() && folder_pattern.is_none() {
        errors.push("Folder-to-tag rules must have a folder pattern".to_string());
    }

    if rule.direction.needs_tag_pattern() && tag_pattern.is_none() {
        errors.push("Tag-to-folder rules must have a tag pattern".to_string());
    }

    if let Some(pattern) = folder_pattern
        && let Err(e) = pattern_to_regex(pattern)
    {
        errors.push(format!("Invalid folder pattern: {}", pattern_error_detail(&e)));
    }

    if let Some(pattern) = tag_pattern
        && let Err(e) = pattern_to_regex(pattern)
    {
        errors.push(format!("Invalid tag pattern: {}", pattern_error_detail(&e)));
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// The engine's message without the pattern-error preamble
fn pattern_error_detail(error: &PatternError) -> String {
    match error {
        PatternError::InvalidPattern { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
