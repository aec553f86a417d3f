// ── Runtime connection configuration ──
//
// Describes how to reach one AAMP server. Carries credentials and transport
// tuning but never touches disk; the CLI builds a `ManagerConfig` from its
// profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use aamp_api::{Credentials, TlsMode, TransportConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. AAMP installs ship a self-signed certificate.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for one AAMP server.
///
/// The documented API account is mandatory; the web account is only needed
/// for sink assignment, test tones, volume calibration and hardware details.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Server URL (e.g. `https://aamp.local`).
    pub url: Url,
    /// Account for the documented API (HTTP Digest).
    pub api: Credentials,
    /// Account for the web interface (OAuth password grant).
    pub web: Option<Credentials>,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ManagerConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: Url, api: Credentials) -> Self {
        Self {
            url,
            api,
            web: None,
            tls: TlsVerification::default(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Enable the web API features with the given account.
    #[must_use]
    pub fn with_web(mut self, web: Credentials) -> Self {
        self.web = Some(web);
        self
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_self_signed_and_skip_web() {
        let config = ManagerConfig::new(
            "https://aamp.local".parse().unwrap(),
            Credentials::new("api", "pw"),
        );
        assert!(config.web.is_none());
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.transport().timeout, Duration::from_secs(30));
        assert!(matches!(
            config.transport().tls,
            TlsMode::DangerAcceptInvalid
        ));
    }

    #[test]
    fn builder_sets_web_and_tls() {
        let config = ManagerConfig::new(
            "https://aamp.local".parse().unwrap(),
            Credentials::new("api", "pw"),
        )
        .with_web(Credentials::new("web", "pw"))
        .with_tls(TlsVerification::CustomCa("/etc/aamp/ca.pem".into()))
        .with_timeout(Duration::from_secs(5));

        assert_eq!(config.web.as_ref().map(|c| c.username.as_str()), Some("web"));
        assert!(matches!(config.transport().tls, TlsMode::CustomCa(_)));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
