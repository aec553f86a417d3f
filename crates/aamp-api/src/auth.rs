use digest_auth::{AuthContext, HttpMethod, WwwAuthenticateHeader};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// A username/password pair for one AAMP surface.
///
/// The documented API and the web interface use separate accounts,
/// both configured in the AAMP admin UI.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

// ── Digest challenge handling ───────────────────────────────────────

/// Parse a `WWW-Authenticate` header into a digest challenge.
pub(crate) fn parse_challenge(header: &str) -> Result<WwwAuthenticateHeader, Error> {
    digest_auth::parse(header).map_err(|e| Error::Challenge(format!("{e} ({header})")))
}

/// Compute the `Authorization` header value answering `challenge`.
///
/// `uri` is the request path plus query, exactly as sent on the wire.
/// Each answer bumps the challenge's nonce count, so one parsed challenge
/// can authorize a sequence of requests until the server marks it stale.
pub(crate) fn answer_challenge(
    challenge: &mut WwwAuthenticateHeader,
    credentials: &Credentials,
    method: &reqwest::Method,
    uri: &str,
) -> Result<String, Error> {
    let context = AuthContext::new_with_method(
        credentials.username.as_str(),
        credentials.password.expose_secret(),
        uri,
        None::<&[u8]>,
        HttpMethod::from(method.as_str()),
    );
    let answer = challenge
        .respond(&context)
        .map_err(|e| Error::Challenge(e.to_string()))?;
    Ok(answer.to_header_string())
}
