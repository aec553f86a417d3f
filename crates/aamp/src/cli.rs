//! Clap derive structures for the `aamp` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Only
//! depends on clap so `build.rs` can include it to render man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// aamp -- control Axis Audio Manager Pro from the command line
#[derive(Debug, Parser)]
#[command(
    name = "aamp",
    version,
    about = "Control Axis Audio Manager Pro servers from the command line",
    long_about = "List zones, sites, and speakers, play audio files, and manage\n\
        test tones, zone membership, and volume calibration on an\n\
        Axis Audio Manager Pro server.\n\n\
        Uses the documented API for targets and playback. Hardware details,\n\
        zone assignment, test tones, and volume calibration need a web\n\
        interface account as well.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "AAMP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 'S', env = "AAMP_SERVER", global = true)]
    pub server: Option<String>,

    /// Documented API username
    #[arg(long, env = "AAMP_API_USERNAME", global = true)]
    pub api_username: Option<String>,

    /// Documented API password
    #[arg(long, env = "AAMP_API_PASSWORD", global = true, hide_env_values = true)]
    pub api_password: Option<String>,

    /// Web interface username (enables hardware, ding, assign, volume)
    #[arg(long, env = "AAMP_WEB_USERNAME", global = true)]
    pub web_username: Option<String>,

    /// Web interface password
    #[arg(long, env = "AAMP_WEB_PASSWORD", global = true, hide_env_values = true)]
    pub web_password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AAMP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept any TLS certificate, even with a CA configured
    #[arg(long, short = 'k', env = "AAMP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "AAMP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

/// Playback priority of a one-shot session.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

/// Volume category selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VolumeCategoryArg {
    /// PAGING, ANNOUNCEMENT and MUSIC
    All,
    Music,
    Announcement,
    Paging,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse all audio targets (sites, zones, devices)
    #[command(alias = "t")]
    Targets(TargetsArgs),

    /// List physical zones
    #[command(alias = "z")]
    Zones(ZonesArgs),

    /// List sites
    Sites(SitesArgs),

    /// Inspect and control audio devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List uploaded audio files
    Files(FilesArgs),

    /// Play audio files on one or more targets
    Play(PlayArgs),

    /// Read or set volume calibration of a zone or site
    #[command(alias = "vol")]
    Volume(VolumeArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Targets ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TargetsArgs {
    #[command(subcommand)]
    pub command: TargetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TargetsCommand {
    /// List every audio target
    #[command(alias = "ls")]
    List,

    /// Show one target
    Get {
        /// Target ID (e.g. zon_3, sit_1, dev_12)
        target: String,
    },

    /// List the children of a target (zones of a site, devices of a zone)
    Children {
        /// Target ID
        target: String,
    },
}

// ── Zones / Sites / Files ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ZonesArgs {
    #[command(subcommand)]
    pub command: ZonesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ZonesCommand {
    /// List physical zones
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites
    #[command(alias = "ls")]
    List,
}

#[derive(Debug, Args)]
pub struct FilesArgs {
    #[command(subcommand)]
    pub command: FilesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List uploaded audio files
    #[command(alias = "ls")]
    List,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List audio devices
    #[command(alias = "ls")]
    List,

    /// Show one device
    Get {
        /// Device ID (dev_12) or sink number (12)
        device: String,
    },

    /// Show hardware details (web account required)
    Hardware {
        /// Device ID or sink number; lists every device when omitted
        device: Option<String>,
    },

    /// Play the test tone on a device (web account required)
    Ding {
        /// Device ID or sink number
        device: String,

        /// Tone length in seconds
        #[arg(long, short = 'l', default_value = "2")]
        length: u32,
    },

    /// Move a device into another zone (web account required)
    Assign {
        /// Device ID or sink number
        device: String,

        /// Zone ID (zon_3) or zone number (3)
        zone: String,
    },

    /// Show the zone a device plays in (web account required)
    ParentZone {
        /// Device ID or sink number
        device: String,
    },
}

// ── Play ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Target IDs to play on
    #[arg(required = true, num_args = 1..)]
    pub targets: Vec<String>,

    /// Audio file ID (repeatable)
    #[arg(long = "file", short = 'f', required = true)]
    pub files: Vec<String>,

    /// Number of times to play the files
    #[arg(long, short = 'r', default_value = "1")]
    pub repeat: u32,

    /// Session priority
    #[arg(long, value_enum, default_value = "high")]
    pub priority: PriorityArg,
}

// ── Volume ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VolumeArgs {
    #[command(subcommand)]
    pub command: VolumeCommand,
}

#[derive(Debug, Subcommand)]
pub enum VolumeCommand {
    /// Show calibration levels (web account required)
    Get {
        /// Zone or site ID
        target: String,

        /// Category to show
        #[arg(long, short = 'c', value_enum, default_value = "all")]
        category: VolumeCategoryArg,
    },

    /// Set a calibration level (web account required)
    Set {
        /// Zone or site ID
        target: String,

        /// Gain offset, -100000 to 100000
        #[arg(
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i32).range(-100_000..=100_000)
        )]
        level: i32,

        /// Category to set
        #[arg(long, short = 'c', value_enum, default_value = "all")]
        category: VolumeCategoryArg,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (passwords masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,

        /// Store the web interface password instead of the API password
        #[arg(long)]
        web: bool,
    },

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
