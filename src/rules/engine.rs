//! Rule engine - owns a rule set and maps folder paths and tags through it

use serde::Serialize;
use tracing::{debug, info};

use super::{
    MatchContext, Rule, RuleMatch, find_best_match, find_conflicts, find_matching_rules,
    get_folder_to_tag_rules, get_tag_to_folder_rules,
};
use crate::transform::{TransformConfig, folder_to_tag, tag_to_folder};

/// A folder path or tag translated through one rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapping<'a> {
    pub rule: &'a Rule,
    pub confidence: f64,
    pub source: String,
    pub target: String,
}

/// Engine for evaluating an ordered rule set
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Create a new rule engine with the given rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Map a folder path to a tag using the best folder-to-tag rule
    pub fn map_folder(&self, folder_path: &str) -> Option<Mapping<'_>> {
        let path = folder_path.trim().trim_matches('/');
        let best = find_best_match(path, &self.rules, &MatchContext::folder())?;
        let rule = best.rule;

        let relative = strip_entry_point(path, rule.folder_entry_point.as_deref());
        let config = rule.tag_transforms.clone().unwrap_or_default();
        let transformed = transform_segments(relative, &config, folder_to_tag);
        let target = join_entry_point(rule.tag_entry_point.as_deref(), &transformed);

        if target.is_empty() {
            debug!("Rule '{}' mapped '{}' to an empty tag", rule.name, path);
            return None;
        }

        info!("Mapped folder {} -> #{} ({})", path, target, rule.name);
        Some(Mapping {
            rule,
            confidence: best.confidence,
            source: path.to_string(),
            target,
        })
    }

    /// Map a tag (with or without a leading `#`) to a folder path
    pub fn map_tag(&self, tag: &str) -> Option<Mapping<'_>> {
        let tag = tag.trim().trim_start_matches('#').trim_matches('/');
        let best = find_best_match(tag, &self.rules, &MatchContext::tag())?;
        let rule = best.rule;

        let relative = strip_entry_point(tag, rule.tag_entry_point.as_deref());
        let config = rule.folder_transforms.clone().unwrap_or_default();
        let transformed = transform_segments(relative, &config, tag_to_folder);
        let target = join_entry_point(rule.folder_entry_point.as_deref(), &transformed);

        if target.is_empty() {
            debug!("Rule '{}' mapped '#{}' to an empty folder", rule.name, tag);
            return None;
        }

        info!("Mapped tag #{} -> {} ({})", tag, target, rule.name);
        Some(Mapping {
            rule,
            confidence: best.confidence,
            source: tag.to_string(),
            target,
        })
    }

    pub fn find_best_match(&self, input: &str, context: &MatchContext) -> Option<RuleMatch<'_>> {
        find_best_match(input, &self.rules, context)
    }

    pub fn find_matching_rules(&self, input: &str, context: &MatchContext) -> Vec<RuleMatch<'_>> {
        find_matching_rules(input, &self.rules, context)
    }

    pub fn find_conflicts(&self, input: &str, context: &MatchContext) -> Vec<Vec<RuleMatch<'_>>> {
        find_conflicts(input, &self.rules, context)
    }

    /// Get all rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Enabled rules that map folders to tags, in order
    pub fn folder_to_tag_rules(&self) -> Vec<&Rule> {
        get_folder_to_tag_rules(&self.rules)
    }

    pub fn tag_to_folder_rules(&self) -> Vec<&Rule> {
        get_tag_to_folder_rules(&self.rules)
    }
}

/// Drop `entry_point` and the slash after it when `path` starts with it
fn strip_entry_point<'p>(path: &'p str, entry_point: Option<&str>) -> &'p str {
    let Some(entry) = entry_point.map(|e| e.trim_matches('/')).filter(|e| !e.is_empty()) else {
        return path;
    };
    match path.strip_prefix(entry) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => path,
    }
}

fn join_entry_point(entry_point: Option<&str>, relative: &str) -> String {
    match entry_point.map(|e| e.trim_matches('/')).filter(|e| !e.is_empty()) {
        Some(entry) if relative.is_empty() => entry.to_string(),
        Some(entry) => format!("{}/{}", entry, relative),
        None => relative.to_string(),
    }
}

/// Transform each segment on its own, dropping the ones that end up empty
fn transform_segments(
    relative: &str,
    config: &TransformConfig,
    transform: fn(&str, &TransformConfig) -> String,
) -> String {
    relative
        .split('/')
        .map(|segment| transform(segment, config))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
