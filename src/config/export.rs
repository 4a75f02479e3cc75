//! Rule-set import/export as order-preserving JSON

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::Config;
use crate::rules::{Rule, validate_rule};

/// Envelope written by [`export_rules`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetExport {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub rules: Vec<Rule>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportShape {
    Envelope(RuleSetExport),
    Bare(Vec<Rule>),
}

/// Serialize rules into a pretty JSON export envelope
pub fn export_rules(rules: &[Rule]) -> Result<String> {
    let export = RuleSetExport {
        version: crate::VERSION.to_string(),
        exported_at: Utc::now(),
        rules: rules.to_vec(),
    };
    serde_json::to_string_pretty(&export).context("Failed to serialize rules")
}

/// Parse an export envelope or a bare array of rules. Rules are not validated here.
pub fn import_rules(json: &str) -> Result<Vec<Rule>> {
    let shape: ImportShape = serde_json::from_str(json).context("Failed to parse rule set")?;
    let rules = match shape {
        ImportShape::Envelope(export) => {
            debug!(
                "Importing {} rules exported by version {} at {}",
                export.rules.len(),
                export.version,
                export.exported_at
            );
            export.rules
        }
        ImportShape::Bare(rules) => rules,
    };
    Ok(rules)
}

/// Parse a rule set and merge it into `config`, appending or replacing.
///
/// Every imported rule is validated first; one bad rule refuses the whole
/// set and leaves `config` untouched. Returns the number of rules imported.
pub fn merge_imported_rules(config: &mut Config, json: &str, replace: bool) -> Result<usize> {
    let imported = import_rules(json)?;

    let problems: Vec<String> = imported
        .iter()
        .filter_map(|rule| {
            let result = validate_rule(rule);
            (!result.valid).then(|| format!("'{}': {}", rule.id, result.errors.join("; ")))
        })
        .collect();
    if !problems.is_empty() {
        for problem in &problems {
            warn!("Rejected rule {}", problem);
        }
        anyhow::bail!(
            "Refusing to import {} invalid rules: {}",
            problems.len(),
            problems.join(", ")
        );
    }

    let count = imported.len();
    if replace {
        config.rules = imported;
    } else {
        config.rules.extend(imported);
    }
    info!("Imported {} rules ({})", count, if replace { "replaced" } else { "appended" });
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Direction;

    #[test]
    fn test_export_then_import_preserves_order() {
        let rules = vec![
            Rule::new("z", "Zed", Direction::FolderToTag, 4).with_folder_pattern("Z/*"),
            Rule::new("a", "Ay", Direction::TagToFolder, 0).with_tag_pattern("a/*"),
        ];

        let json = export_rules(&rules).unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert_eq!(import_rules(&json).unwrap(), rules);
    }

    #[test]
    fn test_import_bare_array() {
        let json = r#"[{"id": "x", "name": "X", "priority": 0, "direction": "tag-to-folder", "tagPattern": "x/*"}]"#;
        let rules = import_rules(json).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].tag_pattern.as_deref(), Some("x/*"));
    }

    #[test]
    fn test_import_garbage_fails() {
        assert!(import_rules("{\"rules\": 3}").is_err());
        assert!(import_rules("not json").is_err());
    }

    #[test]
    fn test_merge_rejects_whole_set_on_one_bad_rule() {
        let mut config = Config {
            rules: vec![Rule::new("keep", "Keep", Direction::FolderToTag, 0).with_folder_pattern("K/*")],
            ..Default::default()
        };
        let json = r#"[
            {"id": "fine", "name": "Fine", "priority": 0, "direction": "folder-to-tag", "folderPattern": "F/*"},
            {"id": "nope", "name": "Nope", "priority": 0, "direction": "tag-to-folder"}
        ]"#;

        let err = merge_imported_rules(&mut config, json, true).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Refusing to import 1 invalid rules"));
        assert!(message.contains("'nope': Tag-to-folder rules must have a tag pattern"));
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].id, "keep");
    }
}
