//! CLI command implementations

pub mod utils;

pub mod add;
pub mod completions;
pub mod config;
pub mod delete;
pub mod export;
pub mod health;
pub mod list;
pub mod set_status;
pub mod show;
pub mod stats;
pub mod watch;
