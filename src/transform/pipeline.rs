//! Transform pipeline - fixed stage order over the four transformers
//!
//! Stages run in this order, each on the previous stage's output:
//!
//! 1. trim
//! 2. emoji handling
//! 3. number prefix handling
//! 4. case transform, per `/` segment
//! 5. custom regex rewrites, in configured order
//! 6. tag character sanitizing (tag output only)
//! 7. trim

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    CaseTransform, EmojiHandling, NumberPrefixHandling, TransformConfig,
    apply_case_transform_to_path, apply_regex_transforms, strip_emoji, strip_invalid_tag_chars,
    strip_number_prefix, try_apply_regex_transform,
};
use crate::pattern::PatternError;

/// Pipeline switches
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Output is a tag: strip characters tags cannot hold
    pub is_tag_transform: bool,

    /// On a stage failure return the untouched input instead of the partial result
    pub preserve_on_error: bool,

    /// Treat an invalid custom rewrite as a stage failure instead of skipping it
    pub strict_rewrites: bool,
}

/// Both counterparts of one input, each produced with its own config
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidirectionalMapping {
    pub folder: String,
    pub tag: String,
}

/// Whether a config's output can be turned back into its input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reversibility {
    pub reversible: bool,
    pub warnings: Vec<String>,
}

/// Run the full pipeline. Never fails; see [`TransformOptions::preserve_on_error`].
pub fn apply_transform_pipeline(
    text: &str,
    config: &TransformConfig,
    options: TransformOptions,
) -> String {
    let mut current = text.trim().to_string();

    match run_stages(&mut current, config, options) {
        Ok(()) => {
            debug!("Transformed '{}' -> '{}'", text, current);
            current
        }
        Err(e) => {
            warn!("Transform of '{}' aborted: {}", text, e);
            if options.preserve_on_error {
                text.to_string()
            } else {
                current
            }
        }
    }
}

/// Stages 2 to 7. On error `current` holds the output of the last completed stage.
fn run_stages(
    current: &mut String,
    config: &TransformConfig,
    options: TransformOptions,
) -> Result<(), PatternError> {
    if config.emoji_handling == Some(EmojiHandling::Strip) {
        *current = strip_emoji(current);
    }

    match config.number_prefix_handling {
        Some(NumberPrefixHandling::Strip) | Some(NumberPrefixHandling::Extract) => {
            *current = strip_number_prefix(current);
        }
        Some(NumberPrefixHandling::Keep) | None => {}
    }

    if let Some(case) = config.case_transform
        && case != CaseTransform::None
    {
        *current = apply_case_transform_to_path(current, case);
    }

    if options.strict_rewrites {
        for transform in &config.custom_transforms {
            *current = try_apply_regex_transform(current, transform)?;
        }
    } else {
        *current = apply_regex_transforms(current, &config.custom_transforms);
    }

    if options.is_tag_transform {
        *current = strip_invalid_tag_chars(current);
    }

    *current = current.trim().to_string();
    Ok(())
}

/// Turn a folder segment into a tag segment
pub fn folder_to_tag(folder_segment: &str, config: &TransformConfig) -> String {
    apply_transform_pipeline(
        folder_segment,
        config,
        TransformOptions {
            is_tag_transform: true,
            ..Default::default()
        },
    )
}

/// Turn a tag segment into a folder segment
pub fn tag_to_folder(tag_segment: &str, config: &TransformConfig) -> String {
    apply_transform_pipeline(tag_segment, config, TransformOptions::default())
}

/// Run both directions on the same input. Not a round trip.
pub fn create_bidirectional_mapping(
    input: &str,
    folder_config: &TransformConfig,
    tag_config: &TransformConfig,
) -> BidirectionalMapping {
    BidirectionalMapping {
        folder: tag_to_folder(input, folder_config),
        tag: folder_to_tag(input, tag_config),
    }
}

pub fn is_transform_reversible(config: &TransformConfig) -> Reversibility {
    let mut reversible = true;
    let mut warnings = Vec::new();

    if config.emoji_handling == Some(EmojiHandling::Strip) {
        reversible = false;
        warnings.push("Emoji stripping is not reversible".to_string());
    }

    match config.number_prefix_handling {
        Some(NumberPrefixHandling::Strip) => {
            reversible = false;
            warnings.push("Number prefix stripping is not reversible".to_string());
        }
        Some(NumberPrefixHandling::Extract) => {
            reversible = false;
            warnings.push("Number prefix extraction is not reversible".to_string());
        }
        Some(NumberPrefixHandling::Keep) | None => {}
    }

    // Title Case only loses casing, which still yields a readable folder name
    if let Some(case) = config.case_transform
        && !matches!(case, CaseTransform::None | CaseTransform::TitleCase)
    {
        warnings.push(format!(
            "Case transform '{}' may not preserve original casing",
            case.label()
        ));
    }

    if !config.custom_transforms.is_empty() {
        reversible = false;
        warnings.push("Custom regex transforms may not be reversible".to_string());
    }

    Reversibility {
        reversible,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::RegexTransform;

    fn rewrite(pattern: &str, replacement: &str, flags: Option<&str>) -> RegexTransform {
        RegexTransform {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            flags: flags.map(str::to_string),
        }
    }

    #[test]
    fn test_full_folder_to_tag() {
        let config = TransformConfig {
            emoji_handling: Some(EmojiHandling::Strip),
            number_prefix_handling: Some(NumberPrefixHandling::Strip),
            case_transform: Some(CaseTransform::KebabCase),
            custom_transforms: vec![rewrite("[^a-z0-9\\-]", "", Some("gi"))],
        };

        assert_eq!(
            folder_to_tag("📁 01 - My Cool Project!!!", &config),
            "my-cool-project"
        );
    }

    #[test]
    fn test_empty_config_only_trims() {
        let config = TransformConfig::default();
        assert_eq!(tag_to_folder("  Some/Path v1.2  ", &config), "Some/Path v1.2");
        assert_eq!(folder_to_tag("  Some/Path v1.2  ", &config), "Some/Path v12");
    }

    #[test]
    fn test_stage_order_number_before_case() {
        // Number prefix is removed before camel casing joins the words
        let config = TransformConfig {
            number_prefix_handling: Some(NumberPrefixHandling::Extract),
            case_transform: Some(CaseTransform::CamelCase),
            ..Default::default()
        };
        assert_eq!(folder_to_tag("02 - Reading List", &config), "readingList");
    }

    #[test]
    fn test_case_keeps_hierarchy() {
        let config = TransformConfig {
            case_transform: Some(CaseTransform::SnakeCase),
            ..Default::default()
        };
        assert_eq!(folder_to_tag("Big Work/Side Project", &config), "big_work/side_project");
    }

    #[test]
    fn test_tag_to_folder_keeps_punctuation() {
        let config = TransformConfig {
            case_transform: Some(CaseTransform::TitleCase),
            ..Default::default()
        };
        assert_eq!(tag_to_folder("q&a-notes!", &config), "Q&a Notes!");
    }

    #[test]
    fn test_invalid_rewrite_is_skipped_by_default() {
        let config = TransformConfig {
            case_transform: Some(CaseTransform::Lowercase),
            custom_transforms: vec![rewrite("(bad", "", None), rewrite(" ", "-", None)],
            ..Default::default()
        };
        assert_eq!(folder_to_tag("My Notes", &config), "my-notes");
    }

    #[test]
    fn test_strict_rewrite_failure_partial_or_preserved() {
        let config = TransformConfig {
            case_transform: Some(CaseTransform::Uppercase),
            custom_transforms: vec![rewrite("(bad", "", None)],
            ..Default::default()
        };

        let partial = apply_transform_pipeline(
            " notes. ",
            &config,
            TransformOptions {
                is_tag_transform: true,
                strict_rewrites: true,
                ..Default::default()
            },
        );
        // Aborted after case stage: tag sanitizing never ran
        assert_eq!(partial, "NOTES.");

        let preserved = apply_transform_pipeline(
            " notes. ",
            &config,
            TransformOptions {
                is_tag_transform: true,
                strict_rewrites: true,
                preserve_on_error: true,
            },
        );
        assert_eq!(preserved, " notes. ");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let config = TransformConfig {
            emoji_handling: Some(EmojiHandling::Strip),
            case_transform: Some(CaseTransform::KebabCase),
            ..Default::default()
        };
        let once = folder_to_tag("🚀 Launch Plans", &config);
        let twice = folder_to_tag(&once, &config);
        assert_eq!(once, "launch-plans");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_bidirectional_mapping_uses_each_config() {
        let folder_config = TransformConfig {
            case_transform: Some(CaseTransform::TitleCase),
            ..Default::default()
        };
        let tag_config = TransformConfig {
            case_transform: Some(CaseTransform::KebabCase),
            ..Default::default()
        };
        let mapping = create_bidirectional_mapping("reading_list", &folder_config, &tag_config);
        assert_eq!(mapping.folder, "Reading List");
        assert_eq!(mapping.tag, "reading-list");
    }

    #[test]
    fn test_reversibility_emoji() {
        let config = TransformConfig {
            emoji_handling: Some(EmojiHandling::Strip),
            ..Default::default()
        };
        assert_eq!(
            is_transform_reversible(&config),
            Reversibility {
                reversible: false,
                warnings: vec!["Emoji stripping is not reversible".to_string()],
            }
        );
    }

    #[test]
    fn test_reversibility_case_warns_only() {
        let kebab = TransformConfig {
            case_transform: Some(CaseTransform::KebabCase),
            ..Default::default()
        };
        let result = is_transform_reversible(&kebab);
        assert!(result.reversible);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("kebab-case"));

        let title = TransformConfig {
            case_transform: Some(CaseTransform::TitleCase),
            ..Default::default()
        };
        assert!(is_transform_reversible(&title).warnings.is_empty());
        assert!(is_transform_reversible(&TransformConfig::default()).reversible);
    }

    #[test]
    fn test_reversibility_lossy_stages() {
        let config = TransformConfig {
            number_prefix_handling: Some(NumberPrefixHandling::Extract),
            custom_transforms: vec![rewrite("a", "b", None)],
            ..Default::default()
        };
        let result = is_transform_reversible(&config);
        assert!(!result.reversible);
        assert_eq!(
            result.warnings,
            vec![
                "Number prefix extraction is not reversible".to_string(),
                "Custom regex transforms may not be reversible".to_string(),
            ]
        );
    }
}
