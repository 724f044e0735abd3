//! Identifier normalization: Go names to SQL table and column names.
//!
//! The rules are deliberately literal and must stay that way:
//!
//! - `to_snake_case` only splits where a lowercase letter is directly
//!   followed by an uppercase one, so `UserID` becomes `user_id` but
//!   `HTTPServer` becomes `httpserver`.
//! - `pluralize` only knows the `y` → `ies` rule, so `bus` becomes `buss`.

/// Convert `UpperCamelCase`/`lowerCamelCase` to `snake_case`.
///
/// # Example
///
/// ```
/// use insertgen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("InvitationCode"), "invitation_code");
/// assert_eq!(to_snake_case("ID"), "id");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c.is_uppercase() && prev.is_some_and(char::is_lowercase) {
            out.push('_');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    out
}

/// Naive English plural: trailing `y` becomes `ies`, anything else gets `s`.
pub fn pluralize(s: &str) -> String {
    match s.strip_suffix('y') {
        Some(stem) => format!("{}ies", stem),
        None => format!("{}s", s),
    }
}

/// Table name for a struct: snake_case first, then pluralize.
///
/// `User` → `users`, `ReviewPost` → `review_posts`, `Category` → `categories`.
pub fn normalize_table_name(name: &str) -> String {
    pluralize(&to_snake_case(name))
}

/// Column name for a field.
pub fn normalize_column_name(name: &str) -> String {
    to_snake_case(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_boundaries() {
        assert_eq!(to_snake_case("helloWorld"), "hello_world");
        assert_eq!(to_snake_case("ID"), "id");
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("InvitationCode"), "invitation_code");
        assert_eq!(to_snake_case("User"), "user");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_snake_case_keeps_acronym_runs_together() {
        assert_eq!(to_snake_case("HTTPServer"), "httpserver");
        assert_eq!(to_snake_case("userIDHash"), "user_idhash");
    }

    #[test]
    fn test_snake_case_ignores_digits() {
        assert_eq!(to_snake_case("Sha256Sum"), "sha256sum");
        assert_eq!(to_snake_case("v2Api"), "v2api");
    }

    #[test]
    fn test_snake_case_non_ascii() {
        assert_eq!(to_snake_case("ÉtéÀ"), "été_à");
    }

    #[test]
    fn test_snake_case_idempotent_without_uppercase() {
        for s in ["hello_world", "invitation_code", "id", "a_b_c", "x1_y2", ""] {
            let once = to_snake_case(s);
            assert_eq!(once, s);
            assert_eq!(to_snake_case(&once), once);
        }
    }

    #[test]
    fn test_pluralize_literal_rule() {
        assert_eq!(pluralize("cat"), "cats");
        assert_eq!(pluralize("city"), "cities");
        assert_eq!(pluralize("bus"), "buss");
        assert_eq!(pluralize("day"), "daies");
        assert_eq!(pluralize("y"), "ies");
        assert_eq!(pluralize(""), "s");
    }

    #[test]
    fn test_normalize_table_name() {
        assert_eq!(normalize_table_name("User"), "users");
        assert_eq!(normalize_table_name("PostCount"), "post_counts");
        assert_eq!(normalize_table_name("ReviewPost"), "review_posts");
        assert_eq!(normalize_table_name("Category"), "categories");
        assert_eq!(normalize_table_name("Y"), "ies");
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("CreatedAt"), "created_at");
        assert_eq!(normalize_column_name("ID"), "id");
    }
}
