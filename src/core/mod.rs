//! Core module - vehicle model, dashboard state and the API client

pub mod client;
pub mod config;
pub mod dashboard;
pub mod dialog;
pub mod logging;
pub mod vehicle;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiError, Created, FleetApi, HttpFleetClient};
pub use config::Config;
pub use dashboard::{Dashboard, FleetStats, SortKey, StatusFilter, ViewQuery};
pub use dialog::{CreateDialog, DialogError, StatusDialog, StatusOption};
pub use logging::init_logging;
pub use vehicle::{NewVehicle, Vehicle, VehicleForm, VehicleStatus};
