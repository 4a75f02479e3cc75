//! Emoji detection and stripping, plus tag-name character hygiene

use std::ops::RangeInclusive;
use unicode_normalization::UnicodeNormalization;

/// Code point ranges treated as emoji
const EMOJI_RANGES: &[RangeInclusive<u32>] = &[
    0x1F600..=0x1F64F, // emoticons
    0x1F300..=0x1F5FF, // misc symbols and pictographs
    0x1F680..=0x1F6FF, // transport and map symbols
    0x1F1E0..=0x1F1FF, // regional indicator flags
    0x2600..=0x26FF,   // misc symbols
    0x2700..=0x27BF,   // dingbats
    0xFE00..=0xFE0F,   // variation selectors
    0x1F900..=0x1F9FF, // supplemental symbols and pictographs
    0x1FA00..=0x1FA6F, // chess symbols
    0x1FA70..=0x1FAFF, // symbols and pictographs extended-A
    0x1F000..=0x1F02F, // mahjong tiles
    0x1F0A0..=0x1F0FF, // playing cards
    0x20E3..=0x20E3,   // combining enclosing keycap
    0xE0020..=0xE007F, // tag sequences
];

const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Characters not allowed in tag names
const INVALID_TAG_CHARS: &[char] = &['.', ':', ';', ',', '?', '!', '@', '\\'];

pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|range| range.contains(&cp))
}

pub fn has_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// Per-char emoji membership. A joiner only counts when it touches an emoji,
/// so joiners inside scripts such as Devanagari survive.
fn emoji_mask(chars: &[char]) -> Vec<bool> {
    (0..chars.len())
        .map(|i| {
            if chars[i] == ZERO_WIDTH_JOINER {
                let before = i > 0 && is_emoji(chars[i - 1]);
                let after = chars.get(i + 1).is_some_and(|c| is_emoji(*c));
                before || after
            } else {
                is_emoji(chars[i])
            }
        })
        .collect()
}

/// Remove emoji, then collapse the whitespace left behind and trim
pub fn strip_emoji(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let stripped: String = chars
        .iter()
        .zip(emoji_mask(&chars))
        .filter_map(|(c, emoji)| (!emoji).then_some(*c))
        .collect();
    collapse_whitespace(&stripped)
}

/// Contiguous runs of emoji in order of appearance
pub fn extract_emoji(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut runs = Vec::new();
    let mut current = String::new();
    for (c, emoji) in chars.iter().zip(emoji_mask(&chars)) {
        if emoji {
            current.push(*c);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Remove characters that are invalid in tag names; emoji are left alone
pub fn strip_invalid_tag_chars(text: &str) -> String {
    text.chars().filter(|c| !INVALID_TAG_CHARS.contains(c)).collect()
}

/// Normalize to canonical composed form (NFC)
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_emoji() {
        assert_eq!(strip_emoji("📁 Projects"), "Projects");
        assert_eq!(strip_emoji("Work 🚀 Stuff"), "Work Stuff");
        assert_eq!(strip_emoji("\u{2600}\u{FE0F} Summer \u{2705}"), "Summer");
        assert_eq!(strip_emoji("🇫🇷 Trip"), "Trip");
        assert_eq!(strip_emoji("Plain"), "Plain");
    }

    #[test]
    fn test_zwj_sequences_are_removed_whole() {
        assert_eq!(strip_emoji("\u{1F468}\u{200D}\u{1F4BB} Code"), "Code");
        assert_eq!(
            extract_emoji("\u{1F468}\u{200D}\u{1F4BB} Code"),
            vec!["\u{1F468}\u{200D}\u{1F4BB}"]
        );
    }

    #[test]
    fn test_joiner_outside_emoji_is_kept() {
        let conjunct = "\u{0915}\u{094D}\u{200D}\u{0937}";
        assert_eq!(strip_emoji(conjunct), conjunct);
        assert!(!has_emoji(conjunct));
        assert!(extract_emoji(conjunct).is_empty());
        assert_eq!(
            strip_emoji("\u{1F4C1} \u{0915}\u{094D}\u{200D}\u{0937}"),
            conjunct
        );
    }

    #[test]
    fn test_detect_and_extract() {
        assert!(has_emoji("📁 Projects"));
        assert!(!has_emoji("Projects 2024"));
        assert_eq!(extract_emoji("📁 A 🚀🔥 B"), vec!["📁", "🚀🔥"]);
        assert!(extract_emoji("none").is_empty());
    }

    #[test]
    fn test_strip_invalid_tag_chars() {
        assert_eq!(strip_invalid_tag_chars("v1.2: notes, etc!"), "v12 notes etc");
        assert_eq!(strip_invalid_tag_chars(r"a@b\c?d;e"), "abcde");
        assert_eq!(strip_invalid_tag_chars("📁-keep/path_ok"), "📁-keep/path_ok");
    }

    #[test]
    fn test_normalize_unicode() {
        let decomposed = "Cafe\u{0301}";
        assert_eq!(normalize_unicode(decomposed), "Caf\u{00E9}");
        assert_eq!(normalize_unicode("Caf\u{00E9}"), "Caf\u{00E9}");
    }
}
