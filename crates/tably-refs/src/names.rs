//! View name validation following git-style conventions.
//!
//! Valid view names:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` (double dot) or `@{`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - Components between slashes must be non-empty and not start with `.`
//! - Must not be a full 64-character hex string, which would be
//!   indistinguishable from a manifest hash when activating

use tably_types::ObjectId;

use crate::error::{RefError, RefResult};

/// Characters that are forbidden anywhere in a view name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

fn invalid(name: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidViewName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a view name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use tably_refs::validate_view_name;
///
/// assert!(validate_view_name("main").is_ok());
/// assert!(validate_view_name("experiment/q3").is_ok());
/// assert!(validate_view_name("").is_err());
/// assert!(validate_view_name("bad..name").is_err());
/// ```
pub fn validate_view_name(name: &str) -> RefResult<()> {
    if name.is_empty() {
        return Err(invalid(name, "view name must not be empty"));
    }

    if let Some(ch) = FORBIDDEN_CHARS.iter().find(|ch| name.contains(**ch)) {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid(name, "contains a control character"));
    }

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'"));
    }
    if name.contains("@{") {
        return Err(invalid(name, "must not contain '@{'"));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid(name, "must not start or end with '.'"));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid(name, "must not start or end with '/'"));
    }
    if name.ends_with(".lock") {
        return Err(invalid(name, "must not end with '.lock'"));
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid(name, "path components must not be empty"));
        }
        if component.starts_with('.') {
            return Err(invalid(
                name,
                format!("component must not start with '.': {component:?}"),
            ));
        }
    }

    if ObjectId::looks_like_hex(name) {
        return Err(invalid(name, "must not look like a manifest hash"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_view_name("main").is_ok());
        assert!(validate_view_name("my-view").is_ok());
        assert!(validate_view_name("v1.0").is_ok());
        assert!(validate_view_name("team/alice/cleanup").is_ok());
        assert!(validate_view_name("abc123").is_ok());
    }

    #[test]
    fn reject_empty_and_traversal() {
        assert!(validate_view_name("").is_err());
        assert!(validate_view_name("a..b").is_err());
        assert!(validate_view_name("../escape").is_err());
    }

    #[test]
    fn reject_forbidden_chars() {
        for bad in ["has space", "a~b", "a^b", "a:b", "a?b", "a*b", "a[b", "a\\b", "a\x07b"] {
            assert!(validate_view_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn reject_boundaries() {
        assert!(validate_view_name(".hidden").is_err());
        assert!(validate_view_name("trailing.").is_err());
        assert!(validate_view_name("/leading").is_err());
        assert!(validate_view_name("trailing/").is_err());
        assert!(validate_view_name("a//b").is_err());
        assert!(validate_view_name("feature/.hidden").is_err());
        assert!(validate_view_name("main.lock").is_err());
        assert!(validate_view_name("ref@{0}").is_err());
    }

    #[test]
    fn reject_hash_lookalike() {
        let hex = ObjectId::from_bytes(b"x").to_hex();
        assert!(matches!(
            validate_view_name(&hex),
            Err(RefError::InvalidViewName { .. })
        ));
    }
}
