use thiserror::Error;

/// Top-level error type for the `aamp-api` crate.
///
/// Covers every failure mode across both API surfaces:
/// authentication, transport, the documented API and the web API.
/// `aamp-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected (digest challenge failed, token refused, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The server sent a `WWW-Authenticate` header we could not answer.
    #[error("Unsupported authentication challenge: {0}")]
    Challenge(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Documented API ──────────────────────────────────────────────
    /// Non-success response from the documented `api/v1.1` surface.
    #[error("AAMP API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Web API ─────────────────────────────────────────────────────
    /// Non-success response from the undocumented `webapi/v1` surface.
    #[error("AAMP web API error (HTTP {status}): {message}")]
    WebApi { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request argument the server would reject (e.g. an unknown priority).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if the server refused our credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } | Self::WebApi { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } | Self::WebApi { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::WebApi { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Trim a response body for inclusion in an error message.
pub(crate) fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::WebApi {
            status: 503,
            message: "busy".into(),
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn not_found_covers_both_surfaces() {
        assert!(
            Error::Api {
                status: 404,
                message: String::new()
            }
            .is_not_found()
        );
        assert!(
            !Error::WebApi {
                status: 400,
                message: String::new()
            }
            .is_not_found()
        );
    }

    #[test]
    fn body_preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let preview = body_preview(&body);
        assert!(preview.len() <= 200);
        assert!(preview.chars().all(|c| c == 'é'));
    }
}
