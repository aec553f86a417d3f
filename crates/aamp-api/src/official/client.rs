// Hand-crafted async HTTP client for the documented AAMP API.
//
// Base path: /api/v1.1/
// Auth: HTTP Digest with the API account configured in AAMP.

use std::sync::{Mutex, MutexGuard, PoisonError};

use digest_auth::WwwAuthenticateHeader;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use super::types;
use crate::auth::{self, Credentials};
use crate::error::{Error, body_preview};
use crate::transport::{TransportConfig, normalize_base_url};

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the documented AAMP API.
///
/// Answers the server's digest challenge on the first `401` and keeps the
/// challenge so later requests authenticate up front. A second `401` right
/// after answering a fresh challenge means the credentials are wrong.
pub struct OfficialClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    challenge: Mutex<Option<WwwAuthenticateHeader>>,
}

impl OfficialClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from the server URL, API account, and transport config.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            credentials,
            challenge: Mutex::new(None),
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("api/v1.1/{path}"))?)
    }

    // ── Digest state ─────────────────────────────────────────────────

    fn challenge(&self) -> MutexGuard<'_, Option<WwwAuthenticateHeader>> {
        self.challenge.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Authorization for the next request from the stored challenge, if any.
    fn preemptive_authorization(&self, method: &Method, uri: &str) -> Option<String> {
        let mut guard = self.challenge();
        let challenge = guard.as_mut()?;
        match auth::answer_challenge(challenge, &self.credentials, method, uri) {
            Ok(header) => Some(header),
            Err(e) => {
                trace!(error = %e, "dropping stored digest challenge");
                *guard = None;
                None
            }
        }
    }

    // ── Request execution ────────────────────────────────────────────

    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<&[u8]>,
        authorization: Option<&str>,
    ) -> Result<reqwest::Response, Error> {
        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }
        if let Some(authorization) = authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        Ok(builder.send().await?)
    }

    /// Send a request, answering the digest challenge if the server asks.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path)?;
        let uri = request_uri(&url);
        debug!("{method} {url}");

        let authorization = self.preemptive_authorization(&method, &uri);
        let resp = self
            .dispatch(
                method.clone(),
                url.clone(),
                body.as_deref(),
                authorization.as_deref(),
            )
            .await?;

        if resp.status() != StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        let header = resp
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Authentication {
                message: "server answered 401 without a digest challenge".into(),
            })?;
        let mut challenge = auth::parse_challenge(header)?;
        let authorization =
            auth::answer_challenge(&mut challenge, &self.credentials, &method, &uri)?;
        trace!("answering fresh digest challenge");
        *self.challenge() = Some(challenge);

        let resp = self
            .dispatch(method, url, body.as_deref(), Some(&authorization))
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            *self.challenge() = None;
            return Err(Error::Authentication {
                message: format!(
                    "digest authentication rejected for API user '{}'",
                    self.credentials.username
                ),
            });
        }

        Ok(resp)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.send(Method::GET, path, None).await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_vec(body).map_err(|e| Error::InvalidArgument(e.to_string()))?;
        let resp = self.send(Method::POST, path, Some(body)).await?;
        handle_response(resp).await
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Targets ──────────────────────────────────────────────────────

    /// List every audio target known to the server.
    pub async fn list_targets(&self) -> Result<Vec<types::TargetResponse>, Error> {
        self.get("targets").await
    }

    /// Fetch one target. A `404` yields `None`.
    pub async fn get_target(&self, id: &str) -> Result<Option<types::TargetResponse>, Error> {
        let resp = self.send(Method::GET, &format!("targets/{id}"), None).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!(id, "target not found");
            return Ok(None);
        }
        handle_response(resp).await.map(Some)
    }

    /// List the physical zones (targets typed `physicalZone`).
    pub async fn list_zones(&self) -> Result<Vec<types::TargetResponse>, Error> {
        let targets = self.list_targets().await?;
        Ok(targets
            .into_iter()
            .filter(types::TargetResponse::is_physical_zone)
            .collect())
    }

    // ── Audio files ──────────────────────────────────────────────────

    pub async fn list_audio_files(&self) -> Result<Vec<types::AudioFileResponse>, Error> {
        self.get("audioFiles").await
    }

    // ── Audio sessions ───────────────────────────────────────────────

    /// Start a one-shot session playing `files` on `targets`.
    ///
    /// Nothing is sent when either list is empty; the result is `None`.
    pub async fn play_audio_files(
        &self,
        targets: &[String],
        files: &[String],
        repeat: u32,
        priority: types::Priority,
    ) -> Result<Option<types::AudioSessionResponse>, Error> {
        if targets.is_empty() || files.is_empty() {
            debug!("empty one-shot session request, nothing to play");
            return Ok(None);
        }

        let body = types::OneshotPlayRequest {
            file_ids: files,
            prio: priority,
            repeat,
            targets,
        };
        self.post("audioSessions/oneshotPlayAudioFiles", &body)
            .await
            .map(Some)
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(api_error(status, resp).await);
    }
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", body_preview(&body)),
        body: body.clone(),
    })
}

async fn api_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    Error::Api {
        status: status.as_u16(),
        message: if raw.is_empty() {
            status.to_string()
        } else {
            body_preview(&raw).to_owned()
        },
    }
}

/// Path plus query, as the digest `uri` parameter expects.
fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    }
}
