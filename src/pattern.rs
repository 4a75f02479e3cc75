//! Pattern compiler - unifies glob and regex syntax into one matcher

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

// Thread-local cache for compiled patterns, keyed by (pattern, flags).
// Capped at 1000 entries; cleared entirely when the cap is exceeded.
const CACHE_MAX_ENTRIES: usize = 1000;

std::thread_local! {
    static REGEX_CACHE: std::cell::RefCell<HashMap<(String, String), Regex>> =
        std::cell::RefCell::new(HashMap::new());
}

/// Errors raised while compiling a folder or tag pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid regex flag '{flag}'")]
    InvalidFlag { flag: char },
}

/// True if the pattern uses glob wildcards (`*` or `?`)
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Translate a glob into an anchored regex source.
///
/// - `/**/` in the middle of a path matches zero or more whole segments
/// - a trailing `/**` matches anything after the slash
/// - a leading `**/` matches zero or more leading segments
/// - any other `**` matches anything, `*` matches within one segment, `?` one character
pub fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let at = |i: usize, s: &str| -> bool {
        let needle: Vec<char> = s.chars().collect();
        chars.len() >= i + needle.len() && chars[i..i + needle.len()] == needle[..]
    };

    let mut i = 0;
    while i < chars.len() {
        if at(i, "/**/") {
            out.push_str("/(?:.*/)?");
            i += 4;
        } else if at(i, "/**") && i + 3 == chars.len() {
            out.push_str("/.*");
            i += 3;
        } else if i == 0 && at(i, "**/") {
            out.push_str("(?:.*/)?");
            i += 3;
        } else if at(i, "**") {
            out.push_str(".*");
            i += 2;
        } else {
            match chars[i] {
                '*' => out.push_str("[^/]*"),
                '?' => out.push('.'),
                c => {
                    let mut buf = [0u8; 4];
                    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                }
            }
            i += 1;
        }
    }

    out.push('$');
    out
}

/// Compile a pattern: globs go through [`glob_to_regex`], anything else is a raw regex.
pub fn pattern_to_regex(pattern: &str) -> Result<Regex, PatternError> {
    compile(pattern, "")
}

/// Compile a pattern with JS-style flags (`i`, `m`, `s`, `g`, `u`, `y`).
pub fn pattern_to_regex_with_flags(pattern: &str, flags: &str) -> Result<Regex, PatternError> {
    compile(pattern, flags)
}

/// Test `input` against `pattern`. Compilation failures count as no match.
pub fn matches_pattern(input: &str, pattern: &str, flags: Option<&str>) -> bool {
    match compile(pattern, flags.unwrap_or("")) {
        Ok(regex) => regex.is_match(input),
        Err(e) => {
            warn!("Treating pattern as non-matching: {}", e);
            false
        }
    }
}

fn compile(pattern: &str, flags: &str) -> Result<Regex, PatternError> {
    let key = (pattern.to_string(), flags.to_string());
    REGEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.len() >= CACHE_MAX_ENTRIES && !cache.contains_key(&key) {
            cache.clear();
        }
        if let Some(r) = cache.get(&key) {
            return Ok(r.clone());
        }

        let source = if is_glob_pattern(pattern) {
            glob_to_regex(pattern)
        } else {
            pattern.to_string()
        };
        let regex = build_regex(&source, flags).map_err(|e| match e {
            PatternError::InvalidPattern { message, .. } => PatternError::InvalidPattern {
                pattern: pattern.to_string(),
                message,
            },
            other => other,
        })?;
        cache.insert(key, regex.clone());
        Ok(regex)
    })
}

#[cfg(test)]
fn cached_patterns() -> usize {
    REGEX_CACHE.with(|cache| cache.borrow().len())
}

/// Build a raw regex (no glob translation) honoring JS-style flags.
pub(crate) fn build_regex(source: &str, flags: &str) -> Result<Regex, PatternError> {
    let mut builder = RegexBuilder::new(source);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            // Replace-mode and engine hints with no effect on matching
            'g' | 'u' | 'y' => {}
            other => return Err(PatternError::InvalidFlag { flag: other }),
        }
    }
    builder.build().map_err(|e| PatternError::InvalidPattern {
        pattern: source.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("Projects/*"));
        assert!(is_glob_pattern("Note?"));
        assert!(!is_glob_pattern("^Projects/(.+)$"));
        assert!(!is_glob_pattern("Projects/Test"));
    }

    #[test]
    fn test_double_star_suffix() {
        let regex = pattern_to_regex("Projects/**").unwrap();
        assert!(regex.is_match("Projects/file.md"));
        assert!(regex.is_match("Projects/sub/file.md"));
        assert!(regex.is_match("Projects/sub/deep/file.md"));
        assert!(!regex.is_match("Archive/file.md"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let regex = pattern_to_regex("Projects/*").unwrap();
        assert!(regex.is_match("Projects/file.md"));
        assert!(!regex.is_match("Projects/sub/file.md"));
        assert!(!regex.is_match("Projects/sub/deep/file.md"));
    }

    #[test]
    fn test_mid_path_double_star() {
        let regex = pattern_to_regex("Areas/**/notes").unwrap();
        assert!(regex.is_match("Areas/notes"));
        assert!(regex.is_match("Areas/health/notes"));
        assert!(regex.is_match("Areas/health/running/notes"));
        assert!(!regex.is_match("Areas/health/notes/extra"));
    }

    #[test]
    fn test_leading_double_star() {
        let regex = pattern_to_regex("**/Inbox").unwrap();
        assert!(regex.is_match("Inbox"));
        assert!(regex.is_match("Work/Inbox"));
        assert!(regex.is_match("Work/Team/Inbox"));
        assert!(!regex.is_match("Work/Inbox2"));
    }

    #[test]
    fn test_question_mark_and_escaping() {
        assert_eq!(glob_to_regex("v?.md"), r"^v.\.md$");
        let regex = pattern_to_regex("Q? (draft)*").unwrap();
        assert!(regex.is_match("Q1 (draft) notes"));
        assert!(!regex.is_match("Q12 draft notes"));
    }

    #[test]
    fn test_non_glob_is_raw_regex() {
        let regex = pattern_to_regex(r"^Projects/(\w+)$").unwrap();
        assert!(regex.is_match("Projects/Alpha"));
        let caps = regex.captures("Projects/Alpha").unwrap();
        assert_eq!(&caps[1], "Alpha");
        // Unanchored raw regex matches anywhere
        assert!(matches_pattern("Work/Projects", "Projects", None));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let err = pattern_to_regex("Projects/(unclosed").unwrap_err();
        match err {
            PatternError::InvalidPattern { pattern, message } => {
                assert_eq!(pattern, "Projects/(unclosed");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!matches_pattern("Projects/x", "Projects/(unclosed", None));
    }

    #[test]
    fn test_flags() {
        assert!(matches_pattern("PROJECTS", "^projects$", Some("i")));
        assert!(!matches_pattern("PROJECTS", "^projects$", None));
        assert!(matches_pattern("projects", "^projects$", Some("gu")));
        assert_eq!(
            pattern_to_regex_with_flags("a", "q").unwrap_err(),
            PatternError::InvalidFlag { flag: 'q' }
        );
        assert!(!matches_pattern("a", "a", Some("q")));
    }

    #[test]
    fn test_cache_returns_same_behavior() {
        for _ in 0..3 {
            assert!(matches_pattern("Projects/a", "Projects/*", None));
            assert!(!matches_pattern("Projects/a/b", "Projects/*", None));
        }
    }

    #[test]
    fn test_cache_cap_clears_and_stays_correct() {
        for i in 0..CACHE_MAX_ENTRIES + 50 {
            let pattern = format!("Area{}/*", i);
            assert!(matches_pattern(&format!("Area{}/notes", i), &pattern, None));
            assert!(!matches_pattern(&format!("Area{}/a/b", i), &pattern, None));
            assert!(cached_patterns() <= CACHE_MAX_ENTRIES);
        }

        // Wholesale clear: the cache restarted below the cap
        assert!(cached_patterns() < CACHE_MAX_ENTRIES);

        // Evicted patterns recompile to the same answers
        assert!(matches_pattern("Area0/notes", "Area0/*", None));
        assert!(!matches_pattern("Area1/notes", "Area0/*", None));
    }
}
