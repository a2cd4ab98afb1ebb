use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "aliasync",
    about = "Keep OWNERS_ALIASES files in sync with team membership",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable more verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Determine which branches need an updated aliases file
    Plan(PlanArgs),
    /// Check a local aliases file against the roster
    Check(CheckArgs),
    /// Print or write the regenerated aliases file
    Render(RenderArgs),
}

/// Options shared by every command that compares against the roster.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Team roster (YAML, or JSON with a .json extension)
    #[arg(long)]
    pub roster: PathBuf,
    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Compare aliases files byte by byte
    #[arg(short, long)]
    pub strict: bool,
    /// Keep aliases that have no matching team
    #[arg(short, long)]
    pub keep: bool,
    /// File whose content is placed above the generated aliases
    #[arg(long)]
    pub header_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub sync: SyncArgs,
    /// Repository and branch inventory (YAML, or JSON with a .json extension)
    #[arg(long)]
    pub inventory: PathBuf,
    /// Branch to update (glob expression supported) (can be given multiple times)
    #[arg(short, long = "branch")]
    pub branches: Vec<String>,
    /// Ignore branches without activity in this many days
    #[arg(long)]
    pub max_age_days: Option<u64>,
    /// Do not count commits by this user as branch activity (can be given multiple times)
    #[arg(long = "ignore-user")]
    pub ignored_users: Vec<String>,
    /// Push directly into the target branches instead of opening pull requests
    #[arg(short, long)]
    pub update: bool,
    /// Show a unified diff for every changed branch
    #[arg(long)]
    pub show_diff: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub sync: SyncArgs,
    /// Path to the aliases file
    #[arg(default_value = "OWNERS_ALIASES")]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub sync: SyncArgs,
    /// Path to the aliases file
    #[arg(default_value = "OWNERS_ALIASES")]
    pub file: PathBuf,
    /// Overwrite the file instead of printing the result
    #[arg(short, long)]
    pub write: bool,
}
