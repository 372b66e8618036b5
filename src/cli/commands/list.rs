//! `fleetdash list` command - vehicle list with search, filter and sort

use console::style;
use miette::Result;

use crate::cli::commands::utils::Session;
use crate::cli::table::{format_vehicles, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dashboard::{SortKey, StatusFilter, ViewQuery};
use crate::core::Config;

/// Search, filter and sort options shared by `list`, `watch` and `export`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Search in model and license plate (case-insensitive substring)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by status
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Sort order (default: from config, else API order)
    #[arg(long)]
    pub sort: Option<SortKey>,
}

impl ViewArgs {
    pub fn to_query(&self, config: &Config) -> ViewQuery {
        ViewQuery::new(
            self.search.clone().unwrap_or_default(),
            self.status,
            self.sort.unwrap_or_else(|| config.default_sort()),
        )
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Limit output to N vehicles
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only, not the vehicles
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let dashboard = session.load(args.view.to_query(&session.config))?;

    let mut view = dashboard.view();
    if let Some(limit) = args.limit {
        view.truncate(limit);
    }

    if args.count {
        println!("{}", view.len());
        return Ok(());
    }

    let format = global.format.resolve(session.config.default_format.as_deref());

    if view.is_empty() && matches!(format, OutputFormat::Tsv | OutputFormat::Cards) {
        println!("No vehicles found.");
        if !dashboard.query().is_identity() && !global.quiet {
            println!();
            println!(
                "{} vehicle(s) in the fleet; try a different {} or {}.",
                style(dashboard.vehicles().len()).cyan(),
                style("--search").yellow(),
                style("--status").yellow()
            );
        }
        return Ok(());
    }

    let table_config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    print!("{}", format_vehicles(&view, format, &table_config)?);
    Ok(())
}
