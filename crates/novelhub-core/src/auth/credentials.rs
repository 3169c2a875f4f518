use serde::{Deserialize, Serialize};

/// Username the demo deployment accepts.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password the demo deployment accepts.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The single username/password pair the admin area accepts.
///
/// There is no user database behind this; the pair is compared verbatim.
/// Deployments can override the defaults through `Config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when both fields match exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair_verifies() {
        let credentials = AdminCredentials::default();
        assert!(credentials.verify("admin", "admin123"));
    }

    #[test]
    fn test_rejects_partial_matches() {
        let credentials = AdminCredentials::default();
        assert!(!credentials.verify("admin", "wrong"));
        assert!(!credentials.verify("Admin", "admin123"));
        assert!(!credentials.verify("", ""));
    }

    #[test]
    fn test_custom_pair() {
        let credentials = AdminCredentials::new("editor", "s3cret");
        assert!(credentials.verify("editor", "s3cret"));
        assert!(!credentials.verify("admin", "admin123"));
    }
}
