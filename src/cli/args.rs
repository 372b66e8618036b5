//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, config::ConfigCommands, delete::DeleteArgs,
    export::ExportArgs, list::ListArgs, set_status::SetStatusArgs, show::ShowArgs,
    watch::WatchArgs,
};

#[derive(Parser)]
#[command(name = "fleetdash")]
#[command(author, version, about = "Fleet dashboard for vehicle records")]
#[command(long_about = "Browse, search, filter and manage the vehicles of a fleet through its REST API.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Fleet API base URL (default: from config, then http://localhost/api)
    #[arg(long, global = true, value_name = "URL", env = "FLEETDASH_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List vehicles with search, status filter and sorting
    List(ListArgs),

    /// Show one vehicle
    Show(ShowArgs),

    /// Show fleet statistics
    Stats,

    /// Add a vehicle
    Add(AddArgs),

    /// Delete a vehicle
    Delete(DeleteArgs),

    /// Change the status of a vehicle
    SetStatus(SetStatusArgs),

    /// Keep the dashboard on screen, refreshing periodically
    Watch(WatchArgs),

    /// Export the dashboard as an HTML page
    Export(ExportArgs),

    /// Check backend health
    Health,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (cards on a terminal, tsv when piped)
    #[default]
    Auto,
    /// Boxed vehicle cards
    Cards,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Just IDs, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `Auto` using the configured default, then the terminal
    pub fn resolve(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        if let Some(f) = configured.and_then(|s| OutputFormat::from_str(s, true).ok()) {
            if f != OutputFormat::Auto {
                return f;
            }
        }
        if console::Term::stdout().is_term() {
            OutputFormat::Cards
        } else {
            OutputFormat::Tsv
        }
    }
}
