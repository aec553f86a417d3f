// ── Core error types ──
//
// User-facing errors from aamp-core. Consumers see these rather than raw
// HTTP statuses; the `From<aamp_api::Error>` impl translates transport-layer
// failures into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to AAMP server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to AAMP server timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation} (requires {required})")]
    Unsupported { operation: String, required: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn web_api_required(operation: &str) -> Self {
        Self::Unsupported {
            operation: operation.to_owned(),
            required: "web API credentials".into(),
        }
    }

    pub(crate) fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aamp_api::Error> for CoreError {
    fn from(err: aamp_api::Error) -> Self {
        match err {
            aamp_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            aamp_api::Error::Challenge(challenge) => CoreError::AuthenticationFailed {
                message: format!("server sent an unsupported challenge: {challenge}"),
            },
            aamp_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            aamp_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            aamp_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            aamp_api::Error::Api { status, message }
            | aamp_api::Error::WebApi { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            aamp_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            aamp_api::Error::InvalidArgument(message) => CoreError::ValidationFailed { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_status() {
        let err = CoreError::from(aamp_api::Error::WebApi {
            status: 409,
            message: "busy".into(),
        });
        assert!(matches!(
            err,
            CoreError::Api {
                status: Some(409),
                ..
            }
        ));
    }

    #[test]
    fn invalid_argument_is_validation() {
        let err = CoreError::from(aamp_api::Error::InvalidArgument("level".into()));
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn auth_failure_maps_to_authentication() {
        let err = CoreError::from(aamp_api::Error::Authentication {
            message: "nope".into(),
        });
        assert_eq!(err.to_string(), "Authentication failed: nope");
    }
}
