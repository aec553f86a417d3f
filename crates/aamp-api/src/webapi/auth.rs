// Web API authentication
//
// OAuth2 password grant against /oauth/token. The web UI authenticates as
// the fixed OAuth client `client:secret`; the user's web account goes in
// the form body. The returned bearer token is valid for `expires_in` seconds.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::Error;
use crate::webapi::client::{WebApiClient, decode};
use crate::webapi::models::TokenResponse;

const OAUTH_CLIENT_ID: &str = "client";
const OAUTH_CLIENT_SECRET: &str = "secret";

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct AccessToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Lifetimes too large to represent saturate at `DateTime::MAX_UTC`.
    pub(crate) fn new(token: String, expires_in_secs: i64) -> Self {
        let expires_at = Duration::try_seconds(expires_in_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            token: SecretString::from(token),
            expires_at,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub(crate) fn bearer(&self) -> String {
        self.token.expose_secret().to_owned()
    }
}

impl WebApiClient {
    /// Request a new access token with the configured web account.
    ///
    /// `POST /oauth/token` with `grant_type=password`. Any status other
    /// than 200 is an authentication failure.
    pub async fn fetch_access_token(&self) -> Result<AccessToken, Error> {
        let url = self.base_url().join("oauth/token")?;
        debug!("requesting access token at {}", url);

        let credentials = self.credentials();
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.expose_secret()),
            ("grant_type", "password"),
        ];

        let resp = self
            .http()
            .post(url)
            .basic_auth(OAUTH_CLIENT_ID, Some(OAUTH_CLIENT_SECRET))
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!(
                    "unable to retrieve an access token (HTTP {status}): {}",
                    crate::error::body_preview(&body)
                ),
            });
        }

        let token: TokenResponse = decode(resp).await?;
        debug!(expires_in = token.expires_in, "access token granted");
        Ok(AccessToken::new(token.access_token, token.expires_in))
    }
}
