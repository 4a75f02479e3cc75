//! Rule matcher - which rules apply to an input and which one wins

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use super::{Direction, MatchType, Rule};
use crate::pattern::matches_pattern;

/// Where an input is being matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext {
    pub match_type: MatchType,

    /// Only consider rules that map this way (bidirectional rules always qualify)
    pub direction: Option<Direction>,

    /// Consider disabled rules too (previews, debugging)
    pub include_disabled: bool,
}

impl MatchContext {
    pub fn new(match_type: MatchType) -> Self {
        Self {
            match_type,
            direction: None,
            include_disabled: false,
        }
    }

    /// Folder input, folder-to-tag rules
    pub fn folder() -> Self {
        Self {
            match_type: MatchType::Folder,
            direction: Some(Direction::FolderToTag),
            include_disabled: false,
        }
    }

    /// Tag input, tag-to-folder rules
    pub fn tag() -> Self {
        Self {
            match_type: MatchType::Tag,
            direction: Some(Direction::TagToFolder),
            include_disabled: false,
        }
    }
}

/// One rule that matched an input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch<'a> {
    pub rule: &'a Rule,
    pub match_type: MatchType,
    pub matched_pattern: &'a str,
    /// Specificity in `[0, 1]`; only breaks priority ties
    pub confidence: f64,
}

/// Match one rule against an input
pub fn evaluate_rule<'a>(
    input: &str,
    rule: &'a Rule,
    context: &MatchContext,
) -> Option<RuleMatch<'a>> {
    if !rule.enabled && !context.include_disabled {
        trace!("Skipping disabled rule: {}", rule.name);
        return None;
    }

    if let Some(direction) = context.direction
        && !is_rule_applicable(rule, direction)
    {
        trace!("Skipping rule '{}': not {}", rule.name, direction.label());
        return None;
    }

    let pattern = rule.pattern_for(context.match_type)?;
    if !matches_pattern(input, pattern, None) {
        return None;
    }

    let confidence = calculate_confidence(input, pattern);
    debug!(
        "Rule '{}' matched '{}' with confidence {:.3}",
        rule.name, input, confidence
    );

    Some(RuleMatch {
        rule,
        match_type: context.match_type,
        matched_pattern: pattern,
        confidence,
    })
}

/// Specificity heuristic: exact patterns score 1, wildcards cost, literal length
/// and hierarchy depth earn
pub fn calculate_confidence(input: &str, pattern: &str) -> f64 {
    if pattern == input {
        return 1.0;
    }

    let stars = pattern.matches('*').count();
    let questions = pattern.matches('?').count();
    let slashes = pattern.matches('/').count();
    let literal_chars = pattern.chars().count() - stars - questions;
    let input_chars = input.chars().count();

    let mut score = 0.5;
    score -= 0.1 * stars as f64;
    score -= 0.05 * questions as f64;

    if input_chars > 0 {
        let ratio = literal_chars as f64 / input_chars as f64;
        score += 0.2 * ratio.min(1.0);
    }

    score += 0.05 * slashes as f64;
    score.clamp(0.0, 1.0)
}

/// Every matching rule, in rule order
pub fn find_matching_rules<'a>(
    input: &str,
    rules: &'a [Rule],
    context: &MatchContext,
) -> Vec<RuleMatch<'a>> {
    rules
        .iter()
        .filter_map(|rule| evaluate_rule(input, rule, context))
        .collect()
}

/// Lowest priority number wins; equal priorities go to the higher confidence,
/// and full ties to the earlier rule
pub fn find_best_match<'a>(
    input: &str,
    rules: &'a [Rule],
    context: &MatchContext,
) -> Option<RuleMatch<'a>> {
    let mut best: Option<RuleMatch<'a>> = None;

    for candidate in find_matching_rules(input, rules, context) {
        let replace = match &best {
            None => true,
            Some(current) => {
                candidate.rule.priority < current.rule.priority
                    || (candidate.rule.priority == current.rule.priority
                        && candidate.confidence > current.confidence)
            }
        };
        if replace {
            best = Some(candidate);
        }
    }

    if let Some(ref m) = best {
        debug!("Best match for '{}': {}", input, m.rule.id);
    }
    best
}

/// Groups of two or more matches sharing one priority, in order of first appearance
pub fn find_conflicts<'a>(
    input: &str,
    rules: &'a [Rule],
    context: &MatchContext,
) -> Vec<Vec<RuleMatch<'a>>> {
    let mut by_priority: IndexMap<i32, Vec<RuleMatch<'a>>> = IndexMap::new();
    for m in find_matching_rules(input, rules, context) {
        by_priority.entry(m.rule.priority).or_default().push(m);
    }

    by_priority
        .into_values()
        .filter(|group| group.len() >= 2)
        .collect()
}

/// True if the rule maps in `direction` (bidirectional rules always do)
pub fn is_rule_applicable(rule: &Rule, direction: Direction) -> bool {
    rule.direction == Direction::Bidirectional || rule.direction == direction
}

/// Enabled rules that can turn folders into tags
pub fn get_folder_to_tag_rules(rules: &[Rule]) -> Vec<&Rule> {
    rules
        .iter()
        .filter(|r| {
            r.enabled
                && r.pattern_for(MatchType::Folder).is_some()
                && is_rule_applicable(r, Direction::FolderToTag)
        })
        .collect()
}

/// Enabled rules that can turn tags into folders
pub fn get_tag_to_folder_rules(rules: &[Rule]) -> Vec<&Rule> {
    rules
        .iter()
        .filter(|r| {
            r.enabled
                && r.pattern_for(MatchType::Tag).is_some()
                && is_rule_applicable(r, Direction::TagToFolder)
        })
        .collect()
}
