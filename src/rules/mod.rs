//! Mapping rules - matching folder paths and tags to their counterparts

mod engine;
mod matcher;
mod validate;

pub use engine::{Mapping, RuleEngine};
pub use matcher::{
    MatchContext, RuleMatch, calculate_confidence, evaluate_rule, find_best_match,
    find_conflicts, find_matching_rules, get_folder_to_tag_rules, get_tag_to_folder_rules,
    is_rule_applicable,
};
pub use validate::{ValidationResult, validate_rule};

use serde::{Deserialize, Serialize};

use crate::transform::TransformConfig;

/// Which way a rule maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    FolderToTag,
    TagToFolder,
    Bidirectional,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::FolderToTag => "folder-to-tag",
            Direction::TagToFolder => "tag-to-folder",
            Direction::Bidirectional => "bidirectional",
        }
    }

    /// Rules in this direction need a folder pattern
    pub fn needs_folder_pattern(&self) -> bool {
        matches!(self, Direction::FolderToTag | Direction::Bidirectional)
    }

    /// Rules in this direction need a tag pattern
    pub fn needs_tag_pattern(&self) -> bool {
        matches!(self, Direction::TagToFolder | Direction::Bidirectional)
    }
}

/// Which side of a rule an input is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Folder,
    Tag,
}

/// Behavior flags read by the sync layer of a host; the matcher ignores them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOptions {
    #[serde(default = "default_true")]
    pub sync_on_create: bool,

    #[serde(default = "default_true")]
    pub sync_on_rename: bool,

    #[serde(default = "default_true")]
    pub sync_on_move: bool,

    /// Remove tags left behind when a folder goes away
    #[serde(default)]
    pub remove_orphaned_tags: bool,

    /// Also apply parent folder tags to nested notes
    #[serde(default)]
    pub inherit_from_parent: bool,

    #[serde(default)]
    pub create_missing_folders: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            sync_on_create: true,
            sync_on_rename: true,
            sync_on_move: true,
            remove_orphaned_tags: false,
            inherit_from_parent: false,
            create_missing_folders: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A mapping rule between a folder pattern and a tag pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,

    /// Human-readable name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the rule is active
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lower wins
    pub priority: i32,

    pub direction: Direction,

    /// Glob or regex matched against folder paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_pattern: Option<String>,

    /// Folder prefix stripped before and added after transforming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_entry_point: Option<String>,

    /// Glob or regex matched against tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_pattern: Option<String>,

    /// Tag prefix stripped before and added after transforming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_entry_point: Option<String>,

    /// Shapes folder names produced from tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_transforms: Option<TransformConfig>,

    /// Shapes tags produced from folder names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_transforms: Option<TransformConfig>,

    #[serde(default)]
    pub options: RuleOptions,
}

impl Rule {
    /// Create an enabled rule with no patterns
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        direction: Direction,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            enabled: true,
            priority,
            direction,
            folder_pattern: None,
            folder_entry_point: None,
            tag_pattern: None,
            tag_entry_point: None,
            folder_transforms: None,
            tag_transforms: None,
            options: RuleOptions::default(),
        }
    }

    pub fn with_folder_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.folder_pattern = Some(pattern.into());
        self
    }

    pub fn with_tag_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.tag_pattern = Some(pattern.into());
        self
    }

    /// The pattern used for `match_type`, ignoring blank strings
    pub fn pattern_for(&self, match_type: MatchType) -> Option<&str> {
        let pattern = match match_type {
            MatchType::Folder => self.folder_pattern.as_deref(),
            MatchType::Tag => self.tag_pattern.as_deref(),
        };
        pattern.filter(|p| !p.trim().is_empty())
    }
}
