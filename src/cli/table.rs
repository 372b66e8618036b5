//! Table formatting for vehicle lists
//!
//! One place renders a list of vehicles in every output format, so `list`,
//! `show` and `watch` print identical rows.

use chrono::{DateTime, Utc};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_date, truncate_str};
use crate::cli::OutputFormat;
use crate::core::vehicle::{status_label, Vehicle, VehicleStatus};
use crate::render::text::render_cards;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 vehicle(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Create config optimized for piping (no summary)
    pub fn for_pipe() -> Self {
        Self {
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Vehicle id (cyan)
    Id(i64),
    /// Plain text, truncated to the column width
    Text(Option<String>),
    /// Status with color coding
    Status(Option<VehicleStatus>),
    /// Model year
    Year(Option<i32>),
    /// Timestamp displayed as local date
    Date(Option<DateTime<Utc>>),
}

impl CellValue {
    /// Unstyled value, used by CSV and Markdown
    pub fn plain(&self) -> String {
        match self {
            CellValue::Id(id) => id.to_string(),
            CellValue::Text(s) => s.clone().unwrap_or_default(),
            CellValue::Status(status) => status.map(|s| s.to_string()).unwrap_or_default(),
            CellValue::Year(year) => year.map(|y| y.to_string()).unwrap_or_default(),
            CellValue::Date(None) => String::new(),
            CellValue::Date(date) => format_date(*date),
        }
    }

    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => style(format!("{:<width$}", id, width = width))
                .cyan()
                .to_string(),
            CellValue::Text(s) => {
                let text = s.as_deref().unwrap_or("-");
                let truncated = truncate_str(text, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Status(status) => {
                let padded = format!("{:<width$}", status_label(*status), width = width);
                match status {
                    Some(VehicleStatus::Active) => style(padded).green().to_string(),
                    Some(VehicleStatus::Maintenance) => style(padded).yellow().to_string(),
                    Some(VehicleStatus::Inactive) => style(padded).dim().to_string(),
                    None => style(padded).red().dim().to_string(),
                }
            }
            CellValue::Year(year) => {
                let s = year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
                format!("{:<width$}", s, width = width)
            }
            CellValue::Date(date) => format!("{:<width$}", format_date(*date), width = width),
        }
    }
}

/// Column headers and TSV widths
const COLUMNS: [(&str, usize); 7] = [
    ("ID", 6),
    ("PLATE", 12),
    ("MODEL", 24),
    ("YEAR", 6),
    ("FUEL", 10),
    ("STATUS", 19),
    ("ADDED", 10),
];

fn row(vehicle: &Vehicle) -> [CellValue; 7] {
    [
        CellValue::Id(vehicle.id),
        CellValue::Text(vehicle.license_plate.clone()),
        CellValue::Text(vehicle.model.clone()),
        CellValue::Year(vehicle.year),
        CellValue::Text(vehicle.fuel_type.clone()),
        CellValue::Status(vehicle.status),
        CellValue::Date(vehicle.created_at),
    ]
}

/// Render vehicles in the requested format
pub fn format_vehicles(
    vehicles: &[&Vehicle],
    format: OutputFormat,
    config: &TableConfig,
) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(vehicles).into_diagnostic()?;
            out.push('\n');
        }
        OutputFormat::Yaml => {
            out = serde_yml::to_string(vehicles).into_diagnostic()?;
        }
        OutputFormat::Id => {
            for v in vehicles {
                out.push_str(&format!("{}\n", v.id));
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["id", "license_plate", "model", "year", "fuel_type", "status", "created_at"])
                .into_diagnostic()?;
            for v in vehicles {
                let created = v.created_at.map(|c| c.to_rfc3339()).unwrap_or_default();
                let cells = row(v);
                writer
                    .write_record([
                        cells[0].plain(),
                        cells[1].plain(),
                        cells[2].plain(),
                        cells[3].plain(),
                        cells[4].plain(),
                        cells[5].plain(),
                        created,
                    ])
                    .into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            out = String::from_utf8(bytes).into_diagnostic()?;
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(COLUMNS.iter().map(|(h, _)| h.to_string()));
            for v in vehicles {
                builder.push_record(row(v).iter().map(|c| c.plain()));
            }
            out.push_str(&builder.build().with(Style::markdown()).to_string());
            out.push('\n');
        }
        OutputFormat::Cards => {
            out.push_str(&render_cards(vehicles));
            out.push('\n');
            if config.show_summary && !vehicles.is_empty() {
                out.push_str(&format!("\n{} vehicle(s) found\n", style(vehicles.len()).cyan()));
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            let header: Vec<String> = COLUMNS
                .iter()
                .map(|(h, w)| style(format!("{:<width$}", h, width = *w)).bold().to_string())
                .collect();
            out.push_str(header.join(" ").trim_end());
            out.push('\n');
            let total_width: usize = COLUMNS.iter().map(|(_, w)| w + 1).sum();
            out.push_str(&"-".repeat(total_width - 1));
            out.push('\n');

            for v in vehicles {
                let cells: Vec<String> = row(v)
                    .iter()
                    .zip(COLUMNS.iter())
                    .map(|(cell, (_, w))| cell.format_tsv(*w))
                    .collect();
                out.push_str(cells.join(" ").trim_end());
                out.push('\n');
            }

            if config.show_summary {
                out.push('\n');
                out.push_str(&format!("{} vehicle(s) found\n", style(vehicles.len()).cyan()));
            }
        }
    }

    Ok(out)
}
