//! `fleetdash set-status` command - change a vehicle's status

use miette::Result;
use tracing::info;

use crate::cli::commands::utils::Session;
use crate::cli::notify::Toast;
use crate::cli::prompt;
use crate::cli::GlobalOpts;
use crate::core::dashboard::ViewQuery;
use crate::core::dialog::StatusDialog;
use crate::core::vehicle::VehicleStatus;
use crate::render::text::render_card;

#[derive(clap::Args, Debug)]
pub struct SetStatusArgs {
    /// Vehicle ID
    pub id: i64,

    /// New status (omit to pick interactively)
    #[arg(value_enum)]
    pub status: Option<VehicleStatus>,
}

pub fn run(args: SetStatusArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let dashboard = session.load(ViewQuery::default())?;
    let mut dialog = StatusDialog::open(&dashboard, args.id)?;

    let chosen = match args.status {
        Some(status) => {
            if dialog.choose(&session.client, status) {
                Some(status)
            } else {
                let message = dialog.error().unwrap_or("Failed to change status");
                return Err(miette::miette!(help = "Check the API connection", "{}", message));
            }
        }
        None => {
            if !prompt::is_interactive() {
                return Err(miette::miette!(
                    "No status given; pass one of: active, maintenance, inactive"
                ));
            }
            prompt::run_status_dialog(&session.client, &mut dialog)?
        }
    };

    let Some(status) = chosen else {
        Toast::info("Cancelled").show(global.quiet);
        return Ok(());
    };

    info!(id = args.id, %status, "status changed");
    Toast::success("Status updated").show(global.quiet);

    let dashboard = session.load(ViewQuery::default())?;
    if !global.quiet {
        let vehicle = dashboard.find(args.id).unwrap_or(dialog.vehicle());
        println!("{}", render_card(vehicle));
    }
    Ok(())
}
