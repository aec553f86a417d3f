//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input, Select};
use serde::Serialize;
use tabled::Tabled;

use aamp_config::{Account, Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with every plaintext password masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.api_password.is_some() {
            profile.api_password = Some(MASK.into());
        }
        if profile.web_password.is_some() {
            profile.web_password = Some(MASK.into());
        }
    }
    cfg
}

/// TOML-like rendering of an already redacted config.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        let optional = [
            ("api_username", p.api_username.as_ref()),
            ("api_password", p.api_password.as_ref()),
            ("api_password_env", p.api_password_env.as_ref()),
            ("web_username", p.web_username.as_ref()),
            ("web_password", p.web_password.as_ref()),
            ("web_password_env", p.web_password_env.as_ref()),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(verify) = p.verify_tls {
            let _ = writeln!(out, "verify_tls = {verify}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn prompt_password(prompt: &str) -> Result<String, CliError> {
    let password = rpassword::prompt_password(prompt)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(password)
}

/// Store `password` in the keyring, or hand it back for the config file.
fn store_or_keep(
    profile_name: &str,
    account: Account,
    password: String,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {account} password?"))
        .items(choices)
        .default(0)
        .interact()?;

    if selection == 0 {
        aamp_config::store_password(profile_name, account, &password)?;
        eprintln!("   {account} password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

fn save(cfg: &Config) -> Result<(), CliError> {
    aamp_config::save_config(cfg)?;
    Ok(())
}

// ── Profiles listing ────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileEntry {
    name: String,
    server: String,
    web: bool,
    default: bool,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Web account")]
    web: &'static str,
}

impl From<&ProfileEntry> for ProfileRow {
    fn from(e: &ProfileEntry) -> Self {
        Self {
            marker: if e.default { "*" } else { "" },
            name: e.name.clone(),
            server: e.server.clone(),
            web: if e.web { "yes" } else { "no" },
        }
    }
}

fn profile_entries(cfg: &Config) -> Vec<ProfileEntry> {
    let active = cfg.active_profile_name();
    let mut entries: Vec<ProfileEntry> = cfg
        .profiles
        .iter()
        .map(|(name, p)| ProfileEntry {
            name: name.clone(),
            server: p.server.clone(),
            web: p.web_username.is_some(),
            default: name == active,
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

// ── Init wizard ─────────────────────────────────────────────────────

fn init(cfg: &mut Config) -> Result<String, CliError> {
    eprintln!("aamp configuration wizard");
    eprintln!("   Config path: {}\n", config::config_path().display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()?;

    let server: String = Input::new().with_prompt("Server URL").interact_text()?;
    aamp_config::parse_server_url(&server)?;

    let api_username: String = Input::new().with_prompt("API username").interact_text()?;
    let api_password = prompt_password("API password: ")?;
    let api_password = store_or_keep(&profile_name, Account::Api, api_password)?;

    let mut profile = Profile {
        server,
        api_username: Some(api_username),
        api_password,
        ..Profile::default()
    };

    let add_web = Confirm::new()
        .with_prompt("Add a web interface account (hardware, ding, zones, volume)?")
        .default(false)
        .interact()?;
    if add_web {
        let web_username: String = Input::new().with_prompt("Web username").interact_text()?;
        let web_password = prompt_password("Web password: ")?;
        profile.web_username = Some(web_username);
        profile.web_password = store_or_keep(&profile_name, Account::Web, web_password)?;
    }

    let verify = Confirm::new()
        .with_prompt("Verify the server's TLS certificate against the system store?")
        .default(false)
        .interact()?;
    if verify {
        profile.verify_tls = Some(true);
    }

    if cfg.profiles.is_empty() {
        cfg.default_profile = Some(profile_name.clone());
    }
    cfg.profiles.insert(profile_name.clone(), profile);
    Ok(profile_name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let mut cfg = config::load()?;
            let name = init(&mut cfg)?;
            save(&cfg)?;
            if !global.quiet {
                eprintln!("\nProfile '{name}' saved to {}", config::config_path().display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&config::load()?);
            let out = output::render_single(&global.output, &cfg, format_config, |c| {
                c.active_profile_name().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load()?;
            let entries = profile_entries(&cfg);
            let out = output::render_list(
                &global.output,
                &entries,
                |e| ProfileRow::from(e),
                |e| e.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            save(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::SetPassword { profile, web } => {
            let cfg = config::load()?;
            let name = profile
                .or_else(|| global.profile.clone())
                .unwrap_or_else(|| cfg.active_profile_name().to_owned());
            let account = if web { Account::Web } else { Account::Api };

            let password = prompt_password(&format!("{account} password for '{name}': "))?;
            aamp_config::store_password(&name, account, &password)?;
            if !global.quiet {
                eprintln!("{account} password for '{name}' stored in system keyring");
            }
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "office".into(),
            Profile {
                server: "https://aamp.office".into(),
                api_username: Some("api".into()),
                api_password: Some("hunter2".into()),
                web_username: Some("admin".into()),
                web_password: Some("s3cret".into()),
                ..Profile::default()
            },
        );
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "10.0.0.5".into(),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn show_never_prints_passwords() {
        let out = format_config(&redacted(&sample()));
        assert!(out.contains("api_password = \"****\""));
        assert!(out.contains("web_password = \"****\""));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("s3cret"));
    }

    #[test]
    fn profiles_sorted_with_default_marked() {
        let entries = profile_entries(&sample());
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["default", "office"]);
        assert!(entries[0].default);
        assert!(!entries[0].web);
        assert!(entries[1].web);
    }
}
