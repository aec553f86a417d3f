//! Shared configuration for aamp tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `aamp_core::ManagerConfig`. The CLI layers its
//! flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aamp_core::{Credentials, ManagerConfig, TlsVerification};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service name under which passwords are stored in the system keyring.
pub const KEYRING_SERVICE: &str = "aamp";

/// Prefix of environment variables that override config values.
pub const ENV_PREFIX: &str = "AAMP_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {account} credentials configured for profile '{profile}'")]
    NoCredentials { profile: String, account: Account },

    #[error("profile '{0}' not found")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// The two AAMP accounts a profile can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    /// Documented API account (HTTP Digest).
    Api,
    /// Web interface account (OAuth).
    Web,
}

impl Account {
    fn keyring_key(self, profile_name: &str) -> String {
        match self {
            Self::Api => format!("{profile_name}/api-password"),
            Self::Web => format!("{profile_name}/web-password"),
        }
    }

    fn env_username(self) -> String {
        match self {
            Self::Api => format!("{ENV_PREFIX}API_USERNAME"),
            Self::Web => format!("{ENV_PREFIX}WEB_USERNAME"),
        }
    }

    fn env_password(self) -> String {
        match self {
            Self::Api => format!("{ENV_PREFIX}API_PASSWORD"),
            Self::Web => format!("{ENV_PREFIX}WEB_PASSWORD"),
        }
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Api => "API",
            Self::Web => "web",
        })
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile name to use when none is given.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named AAMP server profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://aamp.local").
    pub server: String,

    /// Documented API username.
    pub api_username: Option<String>,

    /// Documented API password (plaintext; prefer keyring or env var).
    pub api_password: Option<String>,

    /// Environment variable name containing the API password.
    pub api_password_env: Option<String>,

    /// Web interface username. Enables zone assignment, test tones, and
    /// volume calibration.
    pub web_username: Option<String>,

    /// Web interface password (plaintext; prefer keyring).
    pub web_password: Option<String>,

    /// Environment variable name containing the web password.
    pub web_password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Verify TLS against the system store instead of accepting any
    /// certificate. Ignored when `ca_cert` is set.
    pub verify_tls: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Profile {
    fn username(&self, account: Account) -> Option<&String> {
        match account {
            Account::Api => self.api_username.as_ref(),
            Account::Web => self.web_username.as_ref(),
        }
    }

    fn password(&self, account: Account) -> Option<&String> {
        match account {
            Account::Api => self.api_password.as_ref(),
            Account::Web => self.web_password.as_ref(),
        }
    }

    fn password_env(&self, account: Account) -> Option<&String> {
        match account {
            Account::Api => self.api_password_env.as_ref(),
            Account::Web => self.web_password_env.as_ref(),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "aamp", "aamp").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("aamp");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, then `AAMP_` environment overrides.
///
/// Nested keys use a double underscore: `AAMP_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Store a password for `account` of `profile_name` in the system keyring.
pub fn store_password(
    profile_name: &str,
    account: Account,
    password: &str,
) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &account.keyring_key(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the password of `account`: profile env var, `AAMP_*_PASSWORD`,
/// keyring, then plaintext.
fn resolve_password(
    profile: &Profile,
    profile_name: &str,
    account: Account,
) -> Option<SecretString> {
    // 1. Profile's *_password_env → env var lookup
    if let Some(env_name) = profile.password_env(account) {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Well-known env var
    if let Ok(val) = std::env::var(account.env_password()) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &account.keyring_key(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    profile.password(account).cloned().map(SecretString::from)
}

fn resolve_username(profile: &Profile, account: Account) -> Option<String> {
    profile
        .username(account)
        .cloned()
        .or_else(|| std::env::var(account.env_username()).ok())
}

/// Resolve the documented API account. Required for every profile.
pub fn resolve_api_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    let missing = || ConfigError::NoCredentials {
        profile: profile_name.into(),
        account: Account::Api,
    };
    let username = resolve_username(profile, Account::Api).ok_or_else(missing)?;
    let password = resolve_password(profile, profile_name, Account::Api).ok_or_else(missing)?;
    Ok(Credentials { username, password })
}

/// Resolve the web account. `None` when no web username is configured.
pub fn resolve_web_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<Credentials>, ConfigError> {
    let Some(username) = resolve_username(profile, Account::Web) else {
        return Ok(None);
    };
    let password = resolve_password(profile, profile_name, Account::Web).ok_or_else(|| {
        ConfigError::NoCredentials {
            profile: profile_name.into(),
            account: Account::Web,
        }
    })?;
    Ok(Some(Credentials { username, password }))
}

/// TLS mode for a profile: custom CA if given, system store when
/// `verify_tls`, otherwise accept the server's self-signed certificate.
pub fn resolve_tls(profile: &Profile) -> TlsVerification {
    if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else if profile.verify_tls.unwrap_or(false) {
        TlsVerification::SystemDefaults
    } else {
        TlsVerification::DangerAcceptInvalid
    }
}

/// Parse a server URL, adding `https://` when no scheme is given.
pub fn parse_server_url(raw: &str) -> Result<url::Url, ConfigError> {
    let candidate = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    };
    candidate.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build a `ManagerConfig` from a profile and already resolved accounts.
///
/// TLS comes from `resolve_tls`, downgraded to accept-any when
/// `defaults.insecure` is set and no CA is configured. The profile timeout
/// wins over the default one.
pub fn profile_to_manager_config(
    profile: &Profile,
    defaults: &Defaults,
    api: Credentials,
    web: Option<Credentials>,
) -> Result<ManagerConfig, ConfigError> {
    let url = parse_server_url(&profile.server)?;

    let mut tls = resolve_tls(profile);
    if defaults.insecure && profile.ca_cert.is_none() {
        tls = TlsVerification::DangerAcceptInvalid;
    }
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let mut config = ManagerConfig::new(url, api)
        .with_tls(tls)
        .with_timeout(timeout);
    config.web = web;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile() -> Profile {
        Profile {
            server: "aamp.example.test".into(),
            api_username: Some("api".into()),
            api_password: Some("api-secret".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn loads_profiles_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "hq"

                [defaults]
                output = "json"

                [profiles.hq]
                server = "https://aamp.hq.test"
                api_username = "api"
                web_username = "operator"
                timeout = 10
                "#,
            )?;

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.active_profile_name(), "hq");
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.timeout, 30);
            let hq = &cfg.profiles["hq"];
            assert_eq!(hq.server, "https://aamp.hq.test");
            assert_eq!(hq.web_username.as_deref(), Some("operator"));
            assert_eq!(hq.timeout, Some(10));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "default_profile = \"hq\"")?;
            jail.set_env("AAMP_DEFAULT_PROFILE", "branch");
            jail.set_env("AAMP_DEFAULTS__TIMEOUT", "5");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.active_profile_name(), "branch");
            assert_eq!(cfg.defaults.timeout, 5);
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.active_profile_name(), "default");
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.lab\nserver = 1").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), profile());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].server, "aamp.example.test");
    }

    #[test]
    fn profile_env_var_supplies_password() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AAMP_TEST_API_PW", "from-env");
            let mut p = profile();
            p.api_password = None;
            p.api_password_env = Some("AAMP_TEST_API_PW".into());

            let creds = resolve_api_credentials(&p, "env-test").unwrap();
            assert_eq!(creds.username, "api");
            assert_eq!(secrecy::ExposeSecret::expose_secret(&creds.password), "from-env");
            Ok(())
        });
    }

    #[test]
    fn missing_api_username_is_error() {
        let p = Profile {
            server: "aamp.example.test".into(),
            ..Profile::default()
        };
        figment::Jail::expect_with(|_| {
            let err = resolve_api_credentials(&p, "empty").unwrap_err();
            assert!(matches!(
                err,
                ConfigError::NoCredentials {
                    account: Account::Api,
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn web_account_is_optional() {
        figment::Jail::expect_with(|_| {
            assert!(resolve_web_credentials(&profile(), "no-web").unwrap().is_none());
            Ok(())
        });
    }

    #[test]
    fn tls_modes() {
        let mut p = profile();
        assert_eq!(resolve_tls(&p), TlsVerification::DangerAcceptInvalid);
        p.verify_tls = Some(true);
        assert_eq!(resolve_tls(&p), TlsVerification::SystemDefaults);
        p.ca_cert = Some("/etc/aamp/ca.pem".into());
        assert_eq!(
            resolve_tls(&p),
            TlsVerification::CustomCa("/etc/aamp/ca.pem".into())
        );
    }

    #[test]
    fn server_url_gets_scheme() {
        assert_eq!(
            parse_server_url("aamp.local").unwrap().as_str(),
            "https://aamp.local/"
        );
        assert_eq!(
            parse_server_url("http://10.0.0.2:8080").unwrap().as_str(),
            "http://10.0.0.2:8080/"
        );
    }

    #[test]
    fn manager_config_uses_profile_timeout() {
        figment::Jail::expect_with(|_| {
            let mut p = profile();
            p.timeout = Some(12);
            let api = resolve_api_credentials(&p, "timeout-test").unwrap();
            let cfg = profile_to_manager_config(&p, &Defaults::default(), api, None).unwrap();
            assert_eq!(cfg.timeout, Duration::from_secs(12));
            assert!(cfg.web.is_none());
            Ok(())
        });
    }

    #[test]
    fn insecure_default_yields_to_custom_ca() {
        let defaults = Defaults {
            insecure: true,
            ..Defaults::default()
        };
        let mut p = profile();
        p.verify_tls = Some(true);
        let api = Credentials::new("api", "pw");

        let cfg = profile_to_manager_config(&p, &defaults, api.clone(), None).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Duration::from_secs(30));

        p.ca_cert = Some("/etc/aamp/ca.pem".into());
        let cfg = profile_to_manager_config(&p, &defaults, api, None).unwrap();
        assert_eq!(cfg.tls, TlsVerification::CustomCa("/etc/aamp/ca.pem".into()));
    }
}
