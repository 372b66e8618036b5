//! `fleetdash delete` command - remove a vehicle

use miette::Result;
use tracing::info;

use crate::cli::commands::utils::Session;
use crate::cli::notify::Toast;
use crate::cli::prompt;
use crate::cli::GlobalOpts;
use crate::core::client::FleetApi;
use crate::core::dashboard::ViewQuery;

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Vehicle ID
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let dashboard = session.load(ViewQuery::default())?;
    let name = dashboard.display_name(args.id);

    if !args.yes {
        if !prompt::is_interactive() {
            return Err(miette::miette!(
                "Refusing to delete {} without confirmation; pass --yes",
                name
            ));
        }
        if !prompt::confirm(&format!("Are you sure you want to delete {}?", name))? {
            Toast::info("Cancelled").show(global.quiet);
            return Ok(());
        }
    }

    session.client.delete_vehicle(args.id)?;
    info!(id = args.id, "vehicle deleted");
    Toast::success("Vehicle deleted").show(global.quiet);

    let dashboard = session.load(ViewQuery::default())?;
    if !global.quiet {
        eprintln!("{} vehicle(s) remaining", dashboard.vehicles().len());
    }
    Ok(())
}
