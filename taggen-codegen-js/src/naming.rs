//! JavaScript spelling of names, keys and module paths.

use std::collections::HashSet;

use taggen_core::to_kebab_case;

/// Single-quoted JavaScript string literal.
pub fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Whether `s` can be written as a bare identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(is_identifier_char)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Object literal key: bare when possible, quoted otherwise (`'@@typeName'`).
pub fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        js_string(key)
    }
}

/// Relative path of the module generated for `type_name`: `./line-item.js`.
pub fn module_path(type_name: &str) -> String {
    format!("./{}.js", to_kebab_case(type_name))
}

/// Identifiers that appear in `code` other than as a property name after `.`.
///
/// Words inside string literals and comments are included; callers only use
/// the set to decide whether an import is still needed, where a false
/// positive keeps an import that could have gone.
pub fn free_identifiers(code: &str) -> HashSet<&str> {
    let mut found = HashSet::new();
    let mut start: Option<usize> = None;
    let mut after_dot = false;
    let mut previous = ' ';

    for (i, c) in code.char_indices() {
        if is_identifier_char(c) {
            if start.is_none() {
                start = Some(i);
                after_dot = previous == '.';
            }
        } else if let Some(s) = start.take() {
            push_word(&mut found, &code[s..i], after_dot);
        }
        previous = c;
    }
    if let Some(s) = start {
        push_word(&mut found, &code[s..], after_dot);
    }
    found
}

fn push_word<'a>(found: &mut HashSet<&'a str>, word: &'a str, after_dot: bool) {
    let starts_with_digit = word.chars().next().is_some_and(|c| c.is_ascii_digit());
    if !after_dot && !starts_with_digit {
        found.insert(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("Coord(x, y)"), "'Coord(x, y)'");
        assert_eq!(js_string("it's"), "'it\\'s'");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key("toString"), "toString");
        assert_eq!(property_key("@@typeName"), "'@@typeName'");
        assert_eq!(property_key("$ref"), "$ref");
    }

    #[test]
    fn test_module_path() {
        assert_eq!(module_path("Coord"), "./coord.js");
        assert_eq!(module_path("LineItem"), "./line-item.js");
    }

    #[test]
    fn test_free_identifiers_skip_members() {
        let ids = free_identifiers("validateTag(name, 'centre', false, Coord, centre.Money)\n");
        assert!(ids.contains("Coord"));
        assert!(ids.contains("validateTag"));
        assert!(ids.contains("centre"));
        assert!(!ids.contains("Money"));
    }

    #[test]
    fn test_free_identifiers_skip_numbers() {
        let ids = free_identifiers("x = 1e3 + 42");
        assert!(ids.contains("x"));
        assert!(!ids.contains("1e3"));
        assert!(!ids.contains("42"));
    }
}
