//! Name normalization utilities.
//!
//! Schema identifiers arrive as lower-snake-case SQL names (`user_roles`) and
//! leave as the class, attribute, and accessor names used in the generated
//! source (`UserRole`, `userRole`). This module provides the pure string
//! transforms for that mapping:
//!
//! - [`camelize`] / [`functionalize`] - snake case to camel case
//! - [`singularize`] - plural table name to singular class name
//! - [`quote`] - double-quoted string literals with escaping
//!
//! All functions are side-effect free and infallible.
//!
//! # Singularization caveat
//!
//! [`singularize`] is a fixed suffix-rewrite table covering only a handful of
//! English pluralization irregularities. Table names outside that vocabulary
//! may be singularized incorrectly; the rule set is kept as-is because
//! generated accessor names depend on its exact behavior.

/// Converts a lower-snake-case name to camel case.
///
/// The input is treated case-insensitively: every character is lower-cased,
/// then the first character and each character following a `_` separator is
/// upper-cased. Separators are removed.
///
/// # Examples
///
/// ```
/// use sa_core::naming::camelize;
///
/// assert_eq!(camelize("table_test"), "TableTest");
/// assert_eq!(camelize("USER_role"), "UserRole");
/// assert_eq!(camelize("id"), "Id");
/// ```
#[must_use]
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Converts a name to camel case with a lower-case first character.
///
/// Equivalent to [`camelize`] followed by [`lower_first`]. Used for
/// attribute-style accessor names in the generated source.
///
/// # Examples
///
/// ```
/// use sa_core::naming::functionalize;
///
/// assert_eq!(functionalize("user_roles"), "userRoles");
/// assert_eq!(functionalize("id"), "id");
/// ```
#[must_use]
pub fn functionalize(name: &str) -> String {
    lower_first(&camelize(name))
}

/// Lower-cases the first character of a name, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use sa_core::naming::lower_first;
///
/// assert_eq!(lower_first("UserRole"), "userRole");
/// assert_eq!(lower_first(""), "");
/// ```
#[must_use]
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrites a plural name to its singular form.
///
/// Applies an ordered suffix-rewrite table; the first matching rule wins:
///
/// | Suffix               | Rewrite          |
/// |----------------------|------------------|
/// | `indices`, `indexes` | `...index`       |
/// | `suffixes`           | `...suffix`      |
/// | `aliases`            | `...alias`       |
/// | `dresses`            | `...dress`       |
/// | `ies`                | `...y`           |
/// | `s`                  | stripped         |
///
/// Names matching no rule are returned unchanged, which makes the function
/// idempotent on already-singular words.
///
/// # Examples
///
/// ```
/// use sa_core::naming::singularize;
///
/// assert_eq!(singularize("indices"), "index");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("users"), "user");
/// assert_eq!(singularize("status"), "statu"); // heuristic, kept as-is
/// assert_eq!(singularize("index"), "index");
/// ```
#[must_use]
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name
        .strip_suffix("indices")
        .or_else(|| name.strip_suffix("indexes"))
    {
        return format!("{stem}index");
    }
    if let Some(stem) = name.strip_suffix("suffixes") {
        return format!("{stem}suffix");
    }
    if let Some(stem) = name.strip_suffix("aliases") {
        return format!("{stem}alias");
    }
    if let Some(stem) = name.strip_suffix("dresses") {
        return format!("{stem}dress");
    }
    if let Some(stem) = name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = name.strip_suffix('s') {
        return stem.to_owned();
    }
    name.to_owned()
}

/// Wraps a string in double quotes, escaping embedded double quotes.
///
/// # Examples
///
/// ```
/// use sa_core::naming::quote;
///
/// assert_eq!(quote("users.id"), "\"users.id\"");
/// assert_eq!(quote("a\"b"), "\"a\\\"b\"");
/// ```
#[must_use]
pub fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize_basic() {
        assert_eq!(camelize("table_test"), "TableTest");
        assert_eq!(camelize("user"), "User");
        assert_eq!(camelize("a_b_c"), "ABC");
    }

    #[test]
    fn test_camelize_case_insensitive() {
        assert_eq!(camelize("TABLE_TEST"), "TableTest");
        assert_eq!(camelize("Table_Test"), "TableTest");
    }

    #[test]
    fn test_camelize_edge_cases() {
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("_"), "");
        assert_eq!(camelize("_x"), "X");
        assert_eq!(camelize("x_"), "X");
    }

    #[test]
    fn test_functionalize_basic() {
        assert_eq!(functionalize("user_roles"), "userRoles");
        assert_eq!(functionalize("user"), "user");
    }

    #[test]
    fn test_functionalize_composition() {
        // functionalize differs from camelize only in the first character
        for word in ["table_test", "user", "a_b_c", "categories"] {
            let camel = camelize(word);
            let func = functionalize(word);
            assert_eq!(func[1..], camel[1..]);
            assert!(func.chars().next().is_none_or(char::is_lowercase));
        }
    }

    #[test]
    fn test_singularize_irregular_suffixes() {
        assert_eq!(singularize("indices"), "index");
        assert_eq!(singularize("indexes"), "index");
        assert_eq!(singularize("suffixes"), "suffix");
        assert_eq!(singularize("aliases"), "alias");
        assert_eq!(singularize("addresses"), "address");
    }

    #[test]
    fn test_singularize_regular_suffixes() {
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("user"), "user");
    }

    #[test]
    fn test_singularize_no_rule() {
        assert_eq!(singularize("data"), "data");
        assert_eq!(singularize("index"), "index");
    }

    #[test]
    fn test_singularize_idempotent() {
        for word in [
            "indices", "indexes", "suffixes", "aliases", "addresses", "categories", "users",
            "table_test",
        ] {
            let once = singularize(word);
            assert_eq!(singularize(&once), once, "not idempotent for {word}");
        }
    }

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("users"), "\"users\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_quote_escapes_embedded_quotes() {
        let quoted = quote("a\"b");
        assert!(quoted.starts_with('"'));
        assert!(quoted.ends_with('"'));
        assert!(quoted.contains("\\\""));
        assert_eq!(quoted, "\"a\\\"b\"");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("UserRole"), "userRole");
        assert_eq!(lower_first("u"), "u");
        assert_eq!(lower_first(""), "");
    }
}
