//! Text transformers and the pipeline that combines them

mod case;
mod emoji;
mod number;
mod pipeline;
mod rewrite;

pub use case::{
    apply_case_transform, apply_case_transform_to_path, to_camel_case, to_kebab_case,
    to_pascal_case, to_snake_case, to_title_case,
};
pub use emoji::{
    extract_emoji, has_emoji, is_emoji, normalize_unicode, strip_emoji, strip_invalid_tag_chars,
};
pub use number::{
    DEFAULT_PREFIX_WIDTH, NumberPrefix, PrefixFormat, add_number_prefix, extract_number_prefix,
    has_number_prefix, normalize_number_prefix, strip_number_prefix,
};
pub use pipeline::{
    BidirectionalMapping, Reversibility, TransformOptions, apply_transform_pipeline,
    create_bidirectional_mapping, folder_to_tag, is_transform_reversible, tag_to_folder,
};
pub use rewrite::{apply_regex_transform, apply_regex_transforms, try_apply_regex_transform};

use serde::{Deserialize, Serialize};

/// Naming style applied to each path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseTransform {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "Title Case")]
    TitleCase,
    #[serde(rename = "lowercase")]
    Lowercase,
    #[serde(rename = "UPPERCASE")]
    Uppercase,
}

impl CaseTransform {
    /// All styles, in display order
    pub fn all() -> &'static [CaseTransform] {
        &[
            CaseTransform::None,
            CaseTransform::SnakeCase,
            CaseTransform::KebabCase,
            CaseTransform::CamelCase,
            CaseTransform::PascalCase,
            CaseTransform::TitleCase,
            CaseTransform::Lowercase,
            CaseTransform::Uppercase,
        ]
    }

    /// The serialized spelling, also used in messages
    pub fn label(&self) -> &'static str {
        match self {
            CaseTransform::None => "none",
            CaseTransform::SnakeCase => "snake_case",
            CaseTransform::KebabCase => "kebab-case",
            CaseTransform::CamelCase => "camelCase",
            CaseTransform::PascalCase => "PascalCase",
            CaseTransform::TitleCase => "Title Case",
            CaseTransform::Lowercase => "lowercase",
            CaseTransform::Uppercase => "UPPERCASE",
        }
    }
}

impl std::str::FromStr for CaseTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaseTransform::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown case transform: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiHandling {
    #[default]
    Keep,
    Strip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberPrefixHandling {
    #[default]
    Keep,
    Strip,
    /// Split the numeral off; the pipeline keeps only the name
    Extract,
}

impl std::str::FromStr for NumberPrefixHandling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(NumberPrefixHandling::Keep),
            "strip" => Ok(NumberPrefixHandling::Strip),
            "extract" => Ok(NumberPrefixHandling::Extract),
            other => Err(format!("Unknown number prefix handling: {}", other)),
        }
    }
}

/// A regex rewrite; `replacement` may reference groups as `$1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexTransform {
    pub pattern: String,
    pub replacement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

/// Transformation applied when producing one side of a mapping
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_transform: Option<CaseTransform>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_handling: Option<EmojiHandling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_prefix_handling: Option<NumberPrefixHandling>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_transforms: Vec<RegexTransform>,
}
