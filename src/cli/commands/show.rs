//! `fleetdash show` command - one vehicle's card

use miette::Result;

use crate::cli::commands::utils::Session;
use crate::cli::table::{format_vehicles, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dashboard::ViewQuery;
use crate::render::text::render_card;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Vehicle ID
    pub id: i64,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let dashboard = session.load(ViewQuery::default())?;

    let vehicle = dashboard
        .find(args.id)
        .ok_or_else(|| miette::miette!("No vehicle found with id {}", args.id))?;

    match global.format {
        OutputFormat::Auto | OutputFormat::Cards => println!("{}", render_card(vehicle)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(vehicle).map_err(|e| miette::miette!("{}", e))?;
            println!("{}", json);
        }
        format => print!(
            "{}",
            format_vehicles(&[vehicle], format, &TableConfig::for_pipe())?
        ),
    }
    Ok(())
}
