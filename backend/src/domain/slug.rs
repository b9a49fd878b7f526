//! Slug validation predicates for group identifiers.
//!
//! Slugs are non-empty identifiers composed of lowercase ASCII letters,
//! digits, hyphens and underscores.

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_slug_char)
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_'
}
