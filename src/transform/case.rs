//! Case conversions between naming styles

use super::CaseTransform;

/// Apply a case transform to a whole string
pub fn apply_case_transform(text: &str, case: CaseTransform) -> String {
    match case {
        CaseTransform::None => text.to_string(),
        CaseTransform::SnakeCase => to_snake_case(text),
        CaseTransform::KebabCase => to_kebab_case(text),
        CaseTransform::CamelCase => to_camel_case(text),
        CaseTransform::PascalCase => to_pascal_case(text),
        CaseTransform::TitleCase => to_title_case(text),
        CaseTransform::Lowercase => text.to_lowercase(),
        CaseTransform::Uppercase => text.to_uppercase(),
    }
}

/// Apply a case transform to each `/`-delimited segment so the hierarchy survives
pub fn apply_case_transform_to_path(path: &str, case: CaseTransform) -> String {
    if case == CaseTransform::None {
        return path.to_string();
    }
    path.split('/')
        .map(|segment| apply_case_transform(segment, case))
        .collect::<Vec<_>>()
        .join("/")
}

pub fn to_snake_case(text: &str) -> String {
    to_separated(text, '_')
}

pub fn to_kebab_case(text: &str) -> String {
    to_separated(text, '-')
}

/// Split camel humps with `sep`, lowercase, collapse separator runs, drop leading separators
fn to_separated(text: &str, sep: char) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut pending_sep = false;

    for c in text.chars() {
        if c.is_uppercase() {
            pending_sep = true;
        }
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push(sep);
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }

    if pending_sep && !out.is_empty() {
        out.push(sep);
    }
    out
}

pub fn to_camel_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut upper_next = false;

    for c in text.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        _ => out,
    }
}

pub fn to_pascal_case(text: &str) -> String {
    capitalize(&to_camel_case(text))
}

pub fn to_title_case(text: &str) -> String {
    text.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_and_kebab() {
        assert_eq!(to_snake_case("My Cool Project"), "my_cool_project");
        assert_eq!(to_snake_case("myCoolProject"), "my_cool_project");
        assert_eq!(to_snake_case("MyCoolProject"), "my_cool_project");
        assert_eq!(to_snake_case("my--cool  project"), "my_cool_project");
        assert_eq!(to_kebab_case("My Cool Project"), "my-cool-project");
        assert_eq!(to_kebab_case("__Leading"), "leading");
        assert_eq!(to_kebab_case("Project!!!"), "project!!!");
    }

    #[test]
    fn test_camel_and_pascal() {
        assert_eq!(to_camel_case("my cool project"), "myCoolProject");
        assert_eq!(to_camel_case("My_cool-project"), "myCoolProject");
        assert_eq!(to_pascal_case("my cool project"), "MyCoolProject");
        assert_eq!(to_pascal_case("my-cool_project"), "MyCoolProject");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("my_cool-project"), "My Cool Project");
        assert_eq!(to_title_case("  reading   list "), "Reading List");
        assert_eq!(to_title_case("iOS notes"), "IOS Notes");
    }

    #[test]
    fn test_snake_title_round_trip_is_stable() {
        for input in ["Hello World", "Reading List", "Projects"] {
            let mut text = input.to_string();
            for _ in 0..3 {
                text = to_title_case(&to_snake_case(&text));
                assert_eq!(text, input);
            }
        }
    }

    #[test]
    fn test_none_is_identity() {
        for input in ["", "Mixed Case/Path", "📁 01 - x"] {
            assert_eq!(apply_case_transform(input, CaseTransform::None), input);
        }
    }

    #[test]
    fn test_upper_and_lower() {
        assert_eq!(apply_case_transform("Ab c", CaseTransform::Uppercase), "AB C");
        assert_eq!(apply_case_transform("Ab C", CaseTransform::Lowercase), "ab c");
    }

    #[test]
    fn test_path_aware_case() {
        assert_eq!(
            apply_case_transform_to_path("Work Stuff/Big Project", CaseTransform::KebabCase),
            "work-stuff/big-project"
        );
        assert_eq!(
            apply_case_transform_to_path("work_stuff/big_project", CaseTransform::TitleCase),
            "Work Stuff/Big Project"
        );
    }
}
