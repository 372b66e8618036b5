//! Interactive dialogs on top of the dialog state in `core::dialog`

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::notify::Toast;
use crate::core::client::{Created, FleetApi};
use crate::core::dialog::{CreateDialog, StatusDialog};
use crate::core::vehicle::{VehicleForm, VehicleStatus};
use crate::render::text::render_status_option;

/// True when prompts can be shown
pub fn is_interactive() -> bool {
    console::Term::stderr().is_term()
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()
}

/// Run the "add vehicle" dialog until it succeeds or the user gives up
///
/// A failed submit keeps the dialog open: the error is shown and the form
/// is offered again with the previous input. Returns `None` on cancel.
pub fn run_create_dialog<A: FleetApi + ?Sized>(
    api: &A,
    initial: VehicleForm,
) -> Result<Option<Created>> {
    let theme = ColorfulTheme::default();
    let mut dialog = CreateDialog::new();
    dialog.open();
    dialog.form = initial;

    eprintln!();
    eprintln!("{} Add vehicle", style("◆").cyan());
    eprintln!("{}", style("─".repeat(50)).dim());

    while dialog.is_open() {
        let form = VehicleForm {
            license_plate: prompt_text(&theme, "License plate *", &dialog.form.license_plate)?,
            model: prompt_text(&theme, "Model *", &dialog.form.model)?,
            year: prompt_text(&theme, "Year", &dialog.form.year)?,
            fuel_type: prompt_text(&theme, "Fuel type", &dialog.form.fuel_type)?,
        };
        dialog.form = form;

        if let Some(created) = dialog.submit(api) {
            return Ok(Some(created));
        }

        if let Some(err) = dialog.error() {
            Toast::error(err).show(false);
        }
        let retry = Confirm::with_theme(&theme)
            .with_prompt("Edit and try again?")
            .default(true)
            .interact()
            .into_diagnostic()?;
        if !retry {
            dialog.close();
        }
    }

    Ok(None)
}

/// Run the status dialog; returns the chosen status once the change succeeded
///
/// Escape cancels. A failed request leaves the dialog open for another pick.
pub fn run_status_dialog<A: FleetApi + ?Sized>(
    api: &A,
    dialog: &mut StatusDialog,
) -> Result<Option<VehicleStatus>> {
    let theme = ColorfulTheme::default();

    while dialog.is_open() {
        let options = dialog.options();
        let items: Vec<String> = options.iter().map(render_status_option).collect();

        let prompt = format!("Change status: {}", dialog.vehicle().display_name());
        let mut select = Select::with_theme(&theme).with_prompt(prompt).items(&items);
        if let Some(current) = dialog.current_index() {
            select = select.default(current);
        }

        let Some(index) = select.interact_opt().into_diagnostic()? else {
            dialog.close();
            return Ok(None);
        };

        let chosen = options[index].status;
        if dialog.choose(api, chosen) {
            return Ok(Some(chosen));
        }
        if let Some(err) = dialog.error() {
            Toast::error(err).show(false);
        }
    }

    Ok(None)
}

/// Ask for confirmation before a destructive action
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}
