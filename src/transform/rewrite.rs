//! Custom regex rewrites with `$1`-style replacement templates

use regex::{Captures, Regex};
use tracing::warn;

use super::RegexTransform;
use crate::pattern::{PatternError, build_regex};

/// Apply one rewrite. An invalid pattern leaves the text unchanged.
pub fn apply_regex_transform(text: &str, transform: &RegexTransform) -> String {
    match try_apply_regex_transform(text, transform) {
        Ok(result) => result,
        Err(e) => {
            warn!("Skipping custom transform: {}", e);
            text.to_string()
        }
    }
}

/// Apply rewrites in order, each one seeing the previous output
pub fn apply_regex_transforms(text: &str, transforms: &[RegexTransform]) -> String {
    transforms
        .iter()
        .fold(text.to_string(), |acc, t| apply_regex_transform(&acc, t))
}

/// Apply one rewrite, surfacing compile errors.
///
/// Without flags the rewrite replaces every match; a flags string without `g`
/// replaces only the first.
pub fn try_apply_regex_transform(
    text: &str,
    transform: &RegexTransform,
) -> Result<String, PatternError> {
    let flags = transform.flags.as_deref().unwrap_or("g");
    let regex = build_regex(&transform.pattern, flags)?;
    let limit = if flags.contains('g') { 0 } else { 1 };
    Ok(replace(&regex, text, &transform.replacement, limit))
}

fn replace(regex: &Regex, text: &str, template: &str, limit: usize) -> String {
    regex
        .replacen(text, limit, |caps: &Captures| expand_template(caps, template))
        .into_owned()
}

/// Expand `$$`, `$&`, `$n`, `$nn` and `$<name>` against one match
fn expand_template(caps: &Captures, template: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '$' || i + 1 >= chars.len() {
            out.push(c);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        match next {
            '$' => {
                out.push('$');
                i += 2;
            }
            '&' => {
                out.push_str(caps.get(0).map_or("", |m| m.as_str()));
                i += 2;
            }
            '0'..='9' => {
                let one = next.to_digit(10).unwrap_or(0) as usize;
                let two = chars
                    .get(i + 2)
                    .and_then(|d| d.to_digit(10))
                    .map(|d| one * 10 + d as usize);

                match two {
                    Some(n) if n > 0 && n < caps.len() => {
                        out.push_str(caps.get(n).map_or("", |m| m.as_str()));
                        i += 3;
                    }
                    _ if one > 0 && one < caps.len() => {
                        out.push_str(caps.get(one).map_or("", |m| m.as_str()));
                        i += 2;
                    }
                    _ => {
                        out.push('$');
                        i += 1;
                    }
                }
            }
            '<' => {
                let rest: String = chars[i + 2..].iter().collect();
                match rest.find('>') {
                    Some(end) => {
                        let name = &rest[..end];
                        out.push_str(caps.name(name).map_or("", |m| m.as_str()));
                        i += 2 + name.chars().count() + 1;
                    }
                    None => {
                        out.push('$');
                        i += 1;
                    }
                }
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }

    out
}
