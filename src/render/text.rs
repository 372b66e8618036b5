//! Terminal cards, stats panel and error panel

use console::{pad_str, style, Alignment};

use crate::core::dashboard::FleetStats;
use crate::core::dialog::StatusOption;
use crate::core::vehicle::{Vehicle, VehicleStatus};
use crate::render::CardView;

/// Inner width of a card, between the borders
const CARD_WIDTH: usize = 44;

fn card_line(content: &str) -> String {
    format!(
        "{} {} {}",
        style("│").dim(),
        pad_str(content, CARD_WIDTH - 2, Alignment::Left, Some("...")),
        style("│").dim()
    )
}

fn status_badge(card: &CardView) -> String {
    let badge = format!("[{}]", card.status_label);
    match card.status_class {
        "active" => style(badge).green().bold().to_string(),
        "maintenance" => style(badge).yellow().bold().to_string(),
        _ => style(badge).dim().to_string(),
    }
}

/// Render one vehicle as a boxed card
pub fn render_card(vehicle: &Vehicle) -> String {
    let card = CardView::from_vehicle(vehicle);
    let mut lines = Vec::new();

    lines.push(style(format!("┌{}┐", "─".repeat(CARD_WIDTH))).dim().to_string());

    let heading = format!("{} {}", card.icon, style(&card.model).bold());
    let plate = style(&card.plate).cyan().to_string();
    let plate_width = console::measure_text_width(&plate);
    let heading = pad_str(
        &heading,
        (CARD_WIDTH - 2).saturating_sub(plate_width + 1),
        Alignment::Left,
        Some("..."),
    );
    lines.push(card_line(&format!("{} {}", heading, plate)));
    lines.push(card_line(&style(format!("#{}", card.id)).dim().to_string()));
    lines.push(card_line(&format!("{:<11} {}", "Year:", card.year)));
    lines.push(card_line(&format!("{:<11} {}", "Fuel type:", card.fuel_type)));
    if let Some(ref added) = card.added {
        lines.push(card_line(&format!("{:<11} {}", "Added:", added)));
    }
    lines.push(card_line(&status_badge(&card)));

    lines.push(style(format!("└{}┘", "─".repeat(CARD_WIDTH))).dim().to_string());
    lines.join("\n")
}

/// Render a list of cards, or the empty-state message
pub fn render_cards(vehicles: &[&Vehicle]) -> String {
    if vehicles.is_empty() {
        return style("No vehicles found").dim().to_string();
    }
    vehicles
        .iter()
        .map(|v| render_card(v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The counters panel above the cards
pub fn render_stats(stats: &FleetStats) -> String {
    format!(
        "{} {}   {} {}   {} {}   {} {}",
        style("Total:").bold(),
        style(stats.total).cyan(),
        style(VehicleStatus::Active.label()).bold(),
        style(stats.active).green(),
        style(VehicleStatus::Maintenance.label()).bold(),
        style(stats.maintenance).yellow(),
        style(VehicleStatus::Inactive.label()).bold(),
        style(stats.inactive).dim(),
    )
}

/// Inline panel shown when loading the list fails
pub fn render_error_panel(message: &str) -> String {
    let width = CARD_WIDTH + 2;
    [
        style("═".repeat(width)).red().to_string(),
        style("Failed to load data").red().bold().to_string(),
        message.to_string(),
        style("Check the API connection").dim().to_string(),
        style("═".repeat(width)).red().to_string(),
    ]
    .join("\n")
}

/// One entry of the status-change dialog
pub fn render_status_option(option: &StatusOption) -> String {
    if option.current {
        format!("{} {} {}", option.icon, option.label, style("(current)").dim())
    } else {
        format!("{} {}", option.icon, option.label)
    }
}
