//! Static bearer-token validation for the shortcut endpoint.
//!
//! This is a trivial string comparison against a configured secret, not a
//! credential system. The expected token is passed in explicitly; the secret is
//! resolved from the environment once at startup, never inside handlers.

/// Why a request failed authentication. The display strings are the wire-level
/// error messages the shortcut integration expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// No `Authorization` header was sent.
    #[error("缺少Authorization header")]
    MissingHeader,
    /// The presented token does not match the configured secret.
    #[error("无效的认证Token")]
    InvalidToken,
}

/// Validates an `Authorization` header against the configured secret.
///
/// Accepts `Bearer <token>` (the scheme prefix is optional, matching the original
/// integration, which stripped the prefix and compared whatever remained).
pub fn validate_bearer(header: Option<&str>, expected: &str) -> Result<(), AuthFailure> {
    let header = header.ok_or(AuthFailure::MissingHeader)?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header);
    if token == expected {
        Ok(())
    } else {
        Err(AuthFailure::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_distinguished_from_a_bad_token() {
        assert_eq!(
            validate_bearer(None, "secret"),
            Err(AuthFailure::MissingHeader)
        );
        assert_eq!(
            validate_bearer(Some("Bearer wrong"), "secret"),
            Err(AuthFailure::InvalidToken)
        );
    }

    #[test]
    fn accepts_the_configured_token_with_or_without_the_scheme() {
        assert_eq!(validate_bearer(Some("Bearer secret"), "secret"), Ok(()));
        assert_eq!(validate_bearer(Some("secret"), "secret"), Ok(()));
    }

    #[test]
    fn token_comparison_is_exact() {
        assert_eq!(
            validate_bearer(Some("Bearer secret "), "secret"),
            Err(AuthFailure::InvalidToken)
        );
        assert_eq!(
            validate_bearer(Some("Bearer SECRET"), "secret"),
            Err(AuthFailure::InvalidToken)
        );
    }
}
