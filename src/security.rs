use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check the caller's API key. Verification is off when no key is configured.
pub fn verify_api_key(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (None, _) => true,
        (Some(expected), Some(provided)) => constant_time_compare(expected, provided),
        (Some(_), None) => false,
    }
}

/// Check the envelope's application id against the configured skill id.
/// An envelope without one is rejected once a skill id is configured.
pub fn verify_skill_id(expected: Option<&str>, application_id: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => application_id == Some(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("secret123", "secret123"));
        assert!(!constant_time_compare("secret123", "secret124"));
        assert!(!constant_time_compare("secret123", "secret12"));
        assert!(!constant_time_compare("", "secret"));
    }

    #[test]
    fn test_verify_api_key() {
        assert!(verify_api_key(None, None));
        assert!(verify_api_key(None, Some("anything")));
        assert!(verify_api_key(Some("k3y"), Some("k3y")));
        assert!(!verify_api_key(Some("k3y"), Some("key")));
        assert!(!verify_api_key(Some("k3y"), None));
    }

    #[test]
    fn test_verify_skill_id() {
        assert!(verify_skill_id(None, None));
        assert!(verify_skill_id(Some("skill-1"), Some("skill-1")));
        assert!(!verify_skill_id(Some("skill-1"), Some("skill-2")));
        assert!(!verify_skill_id(Some("skill-1"), None));
    }
}
