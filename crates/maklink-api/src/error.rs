use thiserror::Error;

/// Top-level error type for the `maklink-api` crate.
///
/// Covers every failure mode the MAK Mobile service can produce:
/// authentication, transport, session expiry, and payload decoding.
/// `maklink-core` maps these into cycle-level degradation.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session cookie no longer accepted — the service redirected an
    /// authenticated call back to the login page.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or client-builder error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success HTTP status from the service.
    #[error("MAK Mobile error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates auth has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Returns `true` if this is a transient error worth retrying
    /// on the next poll cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::SessionExpired => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_is_auth_expired_and_transient() {
        let err = Error::SessionExpired;
        assert!(err.is_auth_expired());
        assert!(err.is_transient());
    }

    #[test]
    fn rejected_credentials_are_not_transient() {
        let err = Error::Authentication {
            message: "login page re-rendered".to_owned(),
        };
        assert!(err.is_auth_expired());
        assert!(!err.is_transient());
    }

    #[test]
    fn service_and_decode_errors_are_neither() {
        let api = Error::Api {
            status: 500,
            message: "boom".to_owned(),
        };
        let decode = Error::Deserialization {
            message: "expected value".to_owned(),
            body: "<html>".to_owned(),
        };
        for err in [api, decode] {
            assert!(!err.is_auth_expired());
            assert!(!err.is_transient());
        }
    }
}
