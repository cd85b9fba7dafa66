//! Content rules of the column categories.

use crate::schema::ColumnCategory;

const INVALID_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
const INVALID_PATH_CHARS: &[char] = &['<', '>', '"', '|', '*', '?'];

/// Checks `value` against the rules of `category`, returning the reason on failure.
///
/// Categories without content rules accept everything.
pub(crate) fn check(category: ColumnCategory, value: &str) -> Option<&'static str> {
    let valid = match category {
        ColumnCategory::Identifier | ColumnCategory::CustomSource => is_identifier(value),
        ColumnCategory::Property => is_identifier(value.strip_prefix('%').unwrap_or(value)),
        ColumnCategory::UpperCase => !value.chars().any(char::is_lowercase),
        ColumnCategory::LowerCase => !value.chars().any(char::is_uppercase),
        ColumnCategory::Guid => is_guid(value),
        ColumnCategory::Version => is_version(value),
        ColumnCategory::Language => is_language(value),
        ColumnCategory::Filename => is_filename(value, false),
        ColumnCategory::WildCardFilename => is_filename(value, true),
        ColumnCategory::Path => is_path(value),
        ColumnCategory::Paths => value.split(';').all(is_path),
        ColumnCategory::AnyPath => !value.chars().any(char::is_control),
        ColumnCategory::RegPath => !value.starts_with('\\'),
        ColumnCategory::DefaultDir => is_default_dir(value),
        ColumnCategory::Cabinet => match value.strip_prefix('#') {
            Some(stream) => is_identifier(stream),
            None => is_filename(value, false),
        },
        ColumnCategory::Shortcut => {
            if value.contains('[') {
                is_formatted(value)
            } else {
                is_identifier(value)
            }
        }
        ColumnCategory::Formatted
        | ColumnCategory::FormattedSDDLText
        | ColumnCategory::Template => is_formatted(value),
        ColumnCategory::Condition => is_condition(value),
        ColumnCategory::Unknown
        | ColumnCategory::Text
        | ColumnCategory::Integer
        | ColumnCategory::DoubleInteger
        | ColumnCategory::TimeDate
        | ColumnCategory::Binary => true,
    };

    (!valid).then(|| reason(category))
}

fn reason(category: ColumnCategory) -> &'static str {
    match category {
        ColumnCategory::Identifier | ColumnCategory::CustomSource | ColumnCategory::Property => {
            "not a valid identifier"
        }
        ColumnCategory::UpperCase => "contains lowercase characters",
        ColumnCategory::LowerCase => "contains uppercase characters",
        ColumnCategory::Guid => "not an uppercase GUID in braces",
        ColumnCategory::Version => "not a version of up to four 16-bit parts",
        ColumnCategory::Language => "not a comma separated list of language ids",
        ColumnCategory::Filename | ColumnCategory::WildCardFilename | ColumnCategory::Cabinet => {
            "not a valid file name"
        }
        ColumnCategory::Path | ColumnCategory::Paths | ColumnCategory::AnyPath => {
            "not a valid path"
        }
        ColumnCategory::RegPath => "registry path starts with a backslash",
        ColumnCategory::DefaultDir => "not a valid default directory",
        ColumnCategory::Condition => "unbalanced quotes or parentheses",
        _ => "unbalanced brackets",
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

fn is_guid(value: &str) -> bool {
    let Some(inner) = value
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return false;
    };

    !inner.chars().any(char::is_lowercase) && inner.parse::<uguid::Guid>().is_ok()
}

fn is_version(value: &str) -> bool {
    let parts: Vec<_> = value.split('.').collect();
    (1..=4).contains(&parts.len())
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.parse::<u16>().is_ok())
}

fn is_language(value: &str) -> bool {
    value
        .split(',')
        .all(|language| language.trim().parse::<u16>().is_ok())
}

fn is_filename(value: &str, wildcards: bool) -> bool {
    let valid_part = |part: &str| {
        !part.is_empty()
            && !part.chars().any(|c| {
                c.is_control()
                    || (INVALID_FILENAME_CHARS.contains(&c) && !(wildcards && (c == '*' || c == '?')))
            })
    };

    match value.split_once('|') {
        Some((short, long)) => valid_part(short) && valid_part(long),
        None => valid_part(value),
    }
}

fn is_path(value: &str) -> bool {
    !value
        .chars()
        .any(|c| c.is_control() || INVALID_PATH_CHARS.contains(&c))
}

fn is_default_dir(value: &str) -> bool {
    let valid_part = |part: &str| part == "." || is_filename(part, false);

    match value.split_once(':') {
        Some((target, source)) => valid_part(target) && valid_part(source),
        None => valid_part(value),
    }
}

fn is_formatted(value: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '[' => depth += 1,
            ']' if depth == 0 => return false,
            ']' => depth -= 1,
            '\\' if depth > 0 => {
                chars.next();
            }
            _ => {}
        }
    }

    depth == 0
}

fn is_condition(value: &str) -> bool {
    let mut depth = 0usize;
    let mut quoted = false;

    for c in value.chars() {
        match c {
            '"' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted && depth == 0 => return false,
            ')' if !quoted => depth -= 1,
            _ => {}
        }
    }

    !quoted && depth == 0
}
