//! CLI error types with miette diagnostics.
//!
//! Maps api/config errors into user-facing errors with actionable help.

use miette::Diagnostic;
use thiserror::Error;

use maklink_config::ConfigError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication with the MAK Mobile service failed")]
    #[diagnostic(
        code(maklink::auth_failed),
        help(
            "Verify your account credentials.\n\
             They are the same ones the MAK Mobile app uses."
        )
    )]
    AuthFailed,

    #[error("No account credentials configured")]
    #[diagnostic(
        code(maklink::no_credentials),
        help(
            "Set username/password in the config file (maklink config init)\n\
             or export MAKLINK_USERNAME and MAKLINK_PASSWORD."
        )
    )]
    NoCredentials,

    // ── Resources ────────────────────────────────────────────────────

    #[error("Grill '{identifier}' not found on this account")]
    #[diagnostic(
        code(maklink::grill_not_found),
        help("Run: maklink grills to see the grills on the account")
    )]
    GrillNotFound { identifier: String },

    // ── Connection / API ─────────────────────────────────────────────

    #[error("Could not reach the MAK Mobile service")]
    #[diagnostic(
        code(maklink::connection_failed),
        help("Check your network connection and the configured base_url.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("The MAK Mobile service rejected the request (HTTP {status})")]
    #[diagnostic(code(maklink::api_error))]
    ApiError { status: u16, message: String },

    #[error("Could not understand the service's response")]
    #[diagnostic(
        code(maklink::bad_response),
        help("The cloud service may have changed; re-run with -vv for the raw body.")
    )]
    BadResponse { message: String },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(maklink::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(maklink::config))]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed | Self::NoCredentials => exit_code::AUTH,
            Self::GrillNotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Error mappings ───────────────────────────────────────────────────

impl From<maklink_api::Error> for CliError {
    fn from(err: maklink_api::Error) -> Self {
        if err.is_auth_expired() {
            return Self::AuthFailed;
        }
        match err {
            maklink_api::Error::Transport(e) => Self::ConnectionFailed { source: e.into() },
            maklink_api::Error::Api { status, message } => Self::ApiError { status, message },
            maklink_api::Error::Deserialization { message, .. } => Self::BadResponse { message },
            other => Self::Config(other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials => Self::NoCredentials,
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_maps_to_auth_failed() {
        let err = CliError::from(maklink_api::Error::SessionExpired);
        assert!(matches!(err, CliError::AuthFailed));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn rejected_login_maps_to_auth_failed() {
        let err = CliError::from(maklink_api::Error::Authentication {
            message: "login page re-rendered".to_owned(),
        });
        assert!(matches!(err, CliError::AuthFailed));
    }

    #[test]
    fn service_error_keeps_status_and_message() {
        let err = CliError::from(maklink_api::Error::Api {
            status: 503,
            message: "maintenance".to_owned(),
        });
        assert!(matches!(
            err,
            CliError::ApiError { status: 503, ref message } if message == "maintenance"
        ));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn undecodable_body_maps_to_bad_response() {
        let err = CliError::from(maklink_api::Error::Deserialization {
            message: "expected value".to_owned(),
            body: "<html>".to_owned(),
        });
        assert!(matches!(err, CliError::BadResponse { .. }));
    }
}
