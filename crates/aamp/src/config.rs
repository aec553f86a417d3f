//! Merges the TOML profile with CLI flags into a `ManagerConfig`.
//!
//! Flags win over everything the profile resolves: a password passed on the
//! command line is used as-is, without consulting env vars or the keyring.

use aamp_config::{Config, Profile};
use aamp_core::{Credentials, ManagerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use aamp_config::config_path;

/// Load the config file. A missing file yields defaults; a malformed one is
/// an error.
pub fn load() -> Result<Config, CliError> {
    Ok(aamp_config::load_config()?)
}

/// Profile selected by `--profile`, falling back to the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| cfg.active_profile_name().to_owned())
}

/// Build a `ManagerConfig` from the config file, profile, and CLI overrides.
pub fn build_manager_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ManagerConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly requested profile must exist
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            if global.server.is_none() {
                return Err(CliError::NoConfig {
                    path: config_path().display().to_string(),
                });
            }
            Profile::default()
        }
    };

    resolve_profile(profile, &profile_name, cfg, global)
}

fn resolve_profile(
    mut profile: Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ManagerConfig, CliError> {
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if let Some(ref username) = global.api_username {
        profile.api_username = Some(username.clone());
    }
    if let Some(ref username) = global.web_username {
        profile.web_username = Some(username.clone());
    }

    profile.timeout = global.timeout.or(profile.timeout);

    let api = match global.api_password {
        Some(ref password) => {
            let username = flag_username(profile.api_username.as_ref(), "--api-password")?;
            Credentials::new(username, password.clone())
        }
        None => aamp_config::resolve_api_credentials(&profile, profile_name)?,
    };

    let web = match global.web_password {
        Some(ref password) => {
            let username = flag_username(profile.web_username.as_ref(), "--web-password")?;
            Some(Credentials::new(username, password.clone()))
        }
        None => aamp_config::resolve_web_credentials(&profile, profile_name)?,
    };

    let config = aamp_config::profile_to_manager_config(&profile, &cfg.defaults, api, web)?;
    if global.insecure {
        return Ok(config.with_tls(TlsVerification::DangerAcceptInvalid));
    }
    Ok(config)
}

fn flag_username(username: Option<&String>, flag: &str) -> Result<String, CliError> {
    username.cloned().ok_or_else(|| CliError::Validation {
        field: flag.into(),
        reason: "a password was given without a username".into(),
    })
}

/// Comma-separated, sorted profile names for help text.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let argv = ["aamp"].iter().chain(args).chain(&["zones", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn lab_config() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "https://aamp.lab".into(),
                api_username: Some("api".into()),
                ca_cert: Some("/etc/aamp/ca.pem".into()),
                timeout: Some(12),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn profile_settings_apply_without_flags() {
        let config =
            build_manager_config(&global(&["--api-password", "pw"]), &lab_config()).unwrap();
        assert_eq!(config.url.as_str(), "https://aamp.lab/");
        assert_eq!(config.api.username, "api");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(
            config.tls,
            TlsVerification::CustomCa("/etc/aamp/ca.pem".into())
        );
        assert!(config.web.is_none());
    }

    #[test]
    fn flags_override_profile() {
        let opts = global(&[
            "--api-password",
            "pw",
            "--web-username",
            "operator",
            "--web-password",
            "web-pw",
            "--timeout",
            "3",
            "-k",
        ]);
        let config = build_manager_config(&opts, &lab_config()).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(
            config.web.as_ref().map(|c| c.username.as_str()),
            Some("operator")
        );
    }

    #[test]
    fn password_flag_needs_username() {
        let mut cfg = lab_config();
        if let Some(p) = cfg.profiles.get_mut("default") {
            p.api_username = None;
        }
        let err = build_manager_config(&global(&["--api-password", "pw"]), &cfg).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
