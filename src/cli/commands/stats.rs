//! `fleetdash stats` command - fleet statistics panel

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dashboard::ViewQuery;
use crate::core::vehicle::VehicleStatus;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let dashboard = session.load(ViewQuery::default())?;
    let stats = dashboard.stats();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&stats).into_diagnostic()?);
        }
        _ => {
            let width = 40;
            println!("{}", style("Fleet Status").bold().underlined());
            println!("{}", "═".repeat(width));
            println!("{:<24} {}", "Total vehicles", style(stats.total).cyan().bold());
            println!(
                "{:<24} {}",
                VehicleStatus::Active.label(),
                style(stats.active).green()
            );
            println!(
                "{:<24} {}",
                VehicleStatus::Maintenance.label(),
                style(stats.maintenance).yellow()
            );
            println!(
                "{:<24} {}",
                VehicleStatus::Inactive.label(),
                style(stats.inactive).dim()
            );
            let unknown = stats.total - stats.active - stats.maintenance - stats.inactive;
            if unknown > 0 {
                println!("{:<24} {}", "Unknown status", style(unknown).red());
            }
            println!("{}", "═".repeat(width));
        }
    }
    Ok(())
}
