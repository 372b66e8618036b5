//! `fleetdash add` command - create a vehicle

use miette::Result;
use tracing::info;

use crate::cli::commands::utils::Session;
use crate::cli::notify::Toast;
use crate::cli::prompt;
use crate::cli::GlobalOpts;
use crate::core::client::Created;
use crate::core::dashboard::ViewQuery;
use crate::core::dialog::CreateDialog;
use crate::core::vehicle::VehicleForm;
use crate::render::text::render_card;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// License plate (required)
    #[arg(long, short = 'p')]
    pub plate: Option<String>,

    /// Model (required)
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Model year
    #[arg(long, short = 'y')]
    pub year: Option<String>,

    /// Fuel type (e.g. diesel, petrol, electric)
    #[arg(long)]
    pub fuel: Option<String>,

    /// Fill in the fields interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl AddArgs {
    fn form(&self) -> VehicleForm {
        VehicleForm {
            license_plate: self.plate.clone().unwrap_or_default(),
            model: self.model.clone().unwrap_or_default(),
            year: self.year.clone().unwrap_or_default(),
            fuel_type: self.fuel.clone().unwrap_or_default(),
        }
    }
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;

    let created = if args.interactive {
        if !prompt::is_interactive() {
            return Err(miette::miette!(
                "--interactive needs a terminal; pass --plate and --model instead"
            ));
        }
        match prompt::run_create_dialog(&session.client, args.form())? {
            Some(created) => created,
            None => {
                Toast::info("Cancelled").show(global.quiet);
                return Ok(());
            }
        }
    } else {
        submit_once(&session, args.form())?
    };

    info!(id = ?created.id, "vehicle created");
    Toast::success("Vehicle added").show(global.quiet);

    // Mutations are followed by a refresh of the list
    let dashboard = session.load(ViewQuery::default())?;
    if let Some(vehicle) = created.id.and_then(|id| dashboard.find(id)) {
        if !global.quiet {
            println!("{}", render_card(vehicle));
        }
    } else if let Some(id) = created.id {
        println!("{}", id);
    }
    Ok(())
}

fn submit_once(session: &Session, form: VehicleForm) -> Result<Created> {
    let mut dialog = CreateDialog::new();
    dialog.open();
    dialog.form = form;
    match dialog.submit(&session.client) {
        Some(created) => Ok(created),
        None => {
            let message = dialog.error().unwrap_or("Failed to create vehicle");
            Err(miette::miette!("{}", message))
        }
    }
}
