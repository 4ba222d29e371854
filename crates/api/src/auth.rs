//! Authorization capability for mutating operations.
//!
//! Handlers never compare secrets inline; they ask the [`Authorizer`] held in
//! application state. Swapping the authorization scheme (e.g., per-client
//! keys) is a state change, not a handler change.

use secrecy::{ExposeSecret, SecretString};

/// Decides whether a presented credential may perform mutating operations.
pub trait Authorizer: Send + Sync {
    /// Returns `true` if the presented key authorizes the request.
    ///
    /// `None` means the client sent no key at all; that is never authorized.
    fn authorize(&self, presented: Option<&str>) -> bool;
}

/// Authorizer backed by a single static shared secret.
pub struct StaticKeyAuthorizer {
    key: SecretString,
}

impl StaticKeyAuthorizer {
    /// Create an authorizer from the configured shared secret.
    #[must_use]
    pub const fn new(key: SecretString) -> Self {
        Self { key }
    }
}

impl Authorizer for StaticKeyAuthorizer {
    fn authorize(&self, presented: Option<&str>) -> bool {
        presented.is_some_and(|key| key == self.key.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_the_configured_key() {
        let authorizer = StaticKeyAuthorizer::new(SecretString::from("s3cret"));
        assert!(authorizer.authorize(Some("s3cret")));
    }

    #[test]
    fn test_rejects_a_wrong_key() {
        let authorizer = StaticKeyAuthorizer::new(SecretString::from("s3cret"));
        assert!(!authorizer.authorize(Some("guess")));
        assert!(!authorizer.authorize(Some("")));
    }

    #[test]
    fn test_rejects_a_missing_key() {
        let authorizer = StaticKeyAuthorizer::new(SecretString::from("s3cret"));
        assert!(!authorizer.authorize(None));
    }
}
