//! Rendering vehicle records as cards
//!
//! `text` draws boxed cards for the terminal; `html` renders the same
//! card data through embedded tera templates.

pub mod html;
pub mod text;

use chrono::Local;
use serde::Serialize;

use crate::core::vehicle::{status_label, Vehicle};

pub use html::{HtmlRenderer, RenderError};

/// Placeholder for missing text fields
pub const NOT_SPECIFIED: &str = "Not specified";

/// Display-ready fields of one card, shared by both renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: i64,
    pub icon: &'static str,
    pub model: String,
    pub plate: String,
    pub year: String,
    pub fuel_type: String,
    pub added: Option<String>,
    pub status_class: &'static str,
    pub status_label: &'static str,
}

impl CardView {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            icon: vehicle.status.map(|s| s.icon()).unwrap_or("🚗"),
            model: non_empty(vehicle.model.as_deref()).unwrap_or(NOT_SPECIFIED).to_string(),
            plate: non_empty(vehicle.license_plate.as_deref()).unwrap_or("N/A").to_string(),
            year: vehicle
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            fuel_type: non_empty(vehicle.fuel_type.as_deref())
                .unwrap_or(NOT_SPECIFIED)
                .to_string(),
            added: vehicle
                .created_at
                .map(|c| c.with_timezone(&Local).format("%Y-%m-%d").to_string()),
            status_class: vehicle.status.map(|s| s.as_str()).unwrap_or("inactive"),
            status_label: status_label(vehicle.status),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
