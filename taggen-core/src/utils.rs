//! Shared naming utilities.

use std::path::Path;

/// Convert a string to PascalCase (e.g., "bank_account" -> "BankAccount")
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to kebab-case (e.g., "BankAccount" -> "bank-account").
///
/// Runs of capitals are kept together, so "HTTPRequest" becomes "http-request".
pub fn to_kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !result.ends_with('-') && !result.is_empty() {
                result.push('-');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('-') {
                result.push('-');
            }
        }

        result.extend(c.to_lowercase());
    }

    result
}

/// Whether a name is PascalCase: starts uppercase and contains no separators.
pub fn is_pascal_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// The module stem of a path: the file name up to its first dot.
///
/// `coord.type.js` and `coord.js` both have the stem `coord`.
pub fn module_stem(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.split('.').next().filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("coord"), "Coord");
        assert_eq!(to_pascal_case("bank_account"), "BankAccount");
        assert_eq!(to_pascal_case("bank-account"), "BankAccount");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("Coord"), "coord");
        assert_eq!(to_kebab_case("BankAccount"), "bank-account");
        assert_eq!(to_kebab_case("HTTPRequest"), "http-request");
        assert_eq!(to_kebab_case("Account2Fa"), "account2-fa");
        assert_eq!(to_kebab_case("field_types"), "field-types");
    }

    #[test]
    fn test_is_pascal_case() {
        assert!(is_pascal_case("Coord"));
        assert!(is_pascal_case("BankAccount2"));
        assert!(!is_pascal_case("coord"));
        assert!(!is_pascal_case("Bank_Account"));
        assert!(!is_pascal_case(""));
    }

    #[test]
    fn test_module_stem() {
        assert_eq!(module_stem(Path::new("types/coord.type.js")), Some("coord"));
        assert_eq!(module_stem(Path::new("coord.js")), Some("coord"));
        assert_eq!(module_stem(Path::new(".hidden")), None);
    }
}
