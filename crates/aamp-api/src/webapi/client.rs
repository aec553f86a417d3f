// Web API HTTP client
//
// Wraps `reqwest::Client` with bearer-token injection, URL construction
// under /webapi/v1/ and status checking. Endpoint groups (devices, zones,
// volumes) are inherent methods in sibling files so this module stays
// focused on transport mechanics.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::{Error, body_preview};
use crate::transport::{TransportConfig, normalize_base_url};
use crate::webapi::auth::AccessToken;

/// Raw HTTP client for the AAMP web interface's API.
///
/// Obtains an OAuth access token with the web account on first use and
/// renews it once it expires. Every method maps to a single endpoint.
pub struct WebApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    token: Mutex<Option<AccessToken>>,
}

impl WebApiClient {
    /// Create a web API client from the server URL and web account.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, credentials)
    }

    /// Create a web API client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            credentials,
            token: Mutex::new(None),
        })
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a web API path: `{base}/webapi/v1/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("webapi/v1/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Current bearer token, fetching a new one when absent or expired.
    async fn bearer(&self) -> Result<String, Error> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref().filter(|t| !t.is_expired()) {
            return Ok(token.bearer());
        }
        let token = self.fetch_access_token().await?;
        let bearer = token.bearer();
        *guard = Some(token);
        Ok(bearer)
    }

    /// Forget the held token so the next call logs in again.
    pub async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// Send an authenticated request with an optional JSON body.
    pub(crate) async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error> {
        let bearer = self.bearer().await?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url).bearer_auth(bearer);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            return Err(Error::Authentication {
                message: "web API rejected the access token".into(),
            });
        }
        Ok(resp)
    }

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self.send::<()>(Method::GET, url, None).await?;
        let resp = expect_status(resp, StatusCode::OK).await?;
        decode(resp).await
    }

    /// Send a request with a JSON body and require `expected` back.
    pub(crate) async fn call<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        expected: StatusCode,
    ) -> Result<reqwest::Response, Error> {
        let resp = self.send(method, url, Some(body)).await?;
        expect_status(resp, expected).await
    }
}

/// Turn any status other than `expected` into `Error::WebApi`.
pub(crate) async fn expect_status(
    resp: reqwest::Response,
    expected: StatusCode,
) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status == expected {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::WebApi {
        status: status.as_u16(),
        message: if body.is_empty() {
            format!("expected {expected}, got {status}")
        } else {
            body_preview(&body).to_owned()
        },
    })
}

/// Decode a JSON response body, keeping the raw text on failure.
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview = body_preview(&body);
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}
