//! fleetdash: fleet dashboard for vehicle records
//!
//! Lists, searches, filters and sorts the vehicles served by a fleet REST
//! API, and adds, deletes or changes the status of individual vehicles.

pub mod cli;
pub mod core;
pub mod render;
