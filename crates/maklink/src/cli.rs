//! Clap derive structures for the `maklink` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// maklink -- bridge MAK 2 Star cloud-connected grills to your network
#[derive(Debug, Parser)]
#[command(
    name = "maklink",
    version,
    about = "Mirror and control MAK 2 Star grills via the MAK Mobile cloud",
    long_about = "Maintains a live local mirror of the grills on a MAK Mobile\n\
        account and pushes setpoint changes back to the cloud service.\n\n\
        Run `maklink run` for the long-lived bridge, or use the one-shot\n\
        commands (grills, status, set-temp) for scripting.",
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
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// MAK Mobile base URL
    #[arg(long, env = "MAKLINK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Account username
    #[arg(long, short = 'u', env = "MAKLINK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Account password
    #[arg(long, env = "MAKLINK_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Reconciliation cadence in seconds
    #[arg(long, env = "MAKLINK_POLL_INTERVAL", global = true)]
    pub poll_interval: Option<u64>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "MAKLINK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the long-lived bridge (poll, reconcile, apply setpoints)
    Run,

    /// List the grills on the account
    #[command(alias = "ls")]
    Grills,

    /// Show the interpreted state of one grill
    Status(GrillArg),

    /// Push a new setpoint to one grill
    #[command(name = "set-temp")]
    SetTemp(SetTempArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct GrillArg {
    /// Grill id or display name
    pub grill: String,
}

#[derive(Debug, Args)]
pub struct SetTempArgs {
    /// Grill id or display name
    pub grill: String,

    /// Target temperature in °F (175 and below reads as SMOKE, 450 and
    /// above as HIGH)
    pub temperature: i64,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective configuration (password redacted)
    Show,

    /// Write a starter config file
    Init,
}
