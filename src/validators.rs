// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure form-field validators.
//!
//! These are total functions over arbitrary strings; they never panic and
//! depend only on ASCII character classes. The `validator`-derive custom
//! functions at the bottom wrap them for request payload structs.

use validator::ValidationError;

/// Maximum length of a trimmed name field.
const NAME_MAX: usize = 50;
/// Maximum length of a trimmed free-text field (address).
const TEXT_MAX: usize = 120;

/// Check that a string looks like `local@domain.tld`.
///
/// The input is trimmed and lowercased first. The local part and both
/// domain segments must be non-empty, contain no whitespace, and the
/// domain must contain at least one dot.
pub fn is_email(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    if v.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = v.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Password strength: at least 8 characters with at least one lowercase
/// letter, one uppercase letter, and one digit. No trimming.
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Human name: trimmed length in [2, 50], no digits.
pub fn is_name(value: &str) -> bool {
    let v = value.trim();
    let len = v.chars().count();
    (2..=NAME_MAX).contains(&len) && !v.chars().any(|c| c.is_ascii_digit())
}

/// Generic bounded text: trimmed length in (0, 120].
pub fn is_non_empty(value: &str) -> bool {
    let len = value.trim().chars().count();
    len > 0 && len <= TEXT_MAX
}

// ─── validator-derive custom functions ───────────────────────────

pub fn email_shape(value: &str) -> Result<(), ValidationError> {
    if is_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("invalid email address".into()))
    }
}

pub fn strong_password(value: &str) -> Result<(), ValidationError> {
    if is_strong_password(value) {
        Ok(())
    } else {
        Err(ValidationError::new("password").with_message(
            "must be at least 8 characters with an uppercase letter, a lowercase letter, and a digit"
                .into(),
        ))
    }
}

pub fn person_name(value: &str) -> Result<(), ValidationError> {
    if is_name(value) {
        Ok(())
    } else {
        Err(ValidationError::new("name")
            .with_message("must be 2-50 characters with no digits".into()))
    }
}

pub fn bounded_text(value: &str) -> Result<(), ValidationError> {
    if is_non_empty(value) {
        Ok(())
    } else {
        Err(ValidationError::new("text")
            .with_message("must be non-empty and at most 120 characters".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_plausible_addresses() {
        assert!(is_email("user@example.com"));
        assert!(is_email("  User@Example.COM  ")); // trimmed + lowercased
        assert!(is_email("a@b.c"));
        assert!(is_email("first.last@sub.domain.org"));
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        assert!(!is_email(""));
        assert!(!is_email("plainaddress"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@"));
        assert!(!is_email("user@domain")); // no dot in domain
        assert!(!is_email("user@domain.")); // empty TLD
        assert!(!is_email("user@.com")); // empty host
        assert!(!is_email("user name@example.com")); // embedded whitespace
        assert!(!is_email("user@exa mple.com"));
        assert!(!is_email("user@@example.com"));
    }

    #[test]
    fn test_strong_password_requires_all_classes() {
        assert!(is_strong_password("Abcdef12"));
        assert!(is_strong_password("xY3xY3xY3"));

        assert!(!is_strong_password("Abc12")); // too short
        assert!(!is_strong_password("abcdefg1")); // no uppercase
        assert!(!is_strong_password("ABCDEFG1")); // no lowercase
        assert!(!is_strong_password("Abcdefgh")); // no digit
        assert!(!is_strong_password(""));
    }

    #[test]
    fn test_strong_password_does_not_trim() {
        // Whitespace counts toward length and no stripping happens.
        assert!(is_strong_password("Abcdef1 "));
    }

    #[test]
    fn test_name_bounds_and_digits() {
        assert!(is_name("Jo"));
        assert!(is_name("  Ana  ")); // trimmed before measuring
        assert!(is_name(&"a".repeat(50)));

        assert!(!is_name("J"));
        assert!(!is_name(" J ")); // trims to a single char
        assert!(!is_name(&"a".repeat(51)));
        assert!(!is_name("Ana3"));
        assert!(!is_name(""));
    }

    #[test]
    fn test_non_empty_bounds() {
        assert!(is_non_empty("x"));
        assert!(is_non_empty(&"a".repeat(120)));

        assert!(!is_non_empty(""));
        assert!(!is_non_empty("   ")); // whitespace-only trims to empty
        assert!(!is_non_empty(&"a".repeat(121)));
    }

    #[test]
    fn test_custom_functions_mirror_predicates() {
        assert!(email_shape("user@example.com").is_ok());
        assert!(email_shape("nope").is_err());
        assert!(strong_password("Abcdef12").is_ok());
        assert!(strong_password("weak").is_err());
        assert!(person_name("Ana").is_ok());
        assert!(person_name("4na").is_err());
        assert!(bounded_text("somewhere 123").is_ok());
        assert!(bounded_text("  ").is_err());
    }
}
