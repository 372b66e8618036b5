//! Shared utilities for CLI commands

use miette::{IntoDiagnostic, Result};
use std::time::Duration;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::core::client::HttpFleetClient;
use crate::core::dashboard::{Dashboard, ViewQuery};
use crate::core::Config;

/// Effective configuration plus a connected client for one command run
pub struct Session {
    pub config: Config,
    pub client: HttpFleetClient,
}

impl Session {
    /// Load config, apply command-line overrides and build the HTTP client
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let mut config = Config::load();
        if let Some(ref url) = global.api_url {
            config.api_url = Some(url.clone());
        }
        if let Some(secs) = global.timeout {
            config.timeout_secs = Some(secs);
        }
        debug!(api_url = config.api_url(), "opening session");

        let client = HttpFleetClient::new(config.api_url(), config.timeout())?;
        Ok(Self { config, client })
    }

    /// Fetch the vehicle list into a fresh dashboard
    pub fn load(&self, query: ViewQuery) -> Result<Dashboard> {
        let mut dashboard = Dashboard::new(query);
        dashboard.refresh(&self.client)?;
        Ok(dashboard)
    }

    pub fn refresh_interval(&self, override_secs: Option<u64>) -> Duration {
        override_secs
            .map(|s| Duration::from_secs(s.max(1)))
            .unwrap_or_else(|| self.config.refresh_interval())
    }
}

/// Write output to a file or stdout
pub fn write_output(content: &str, path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, content).into_diagnostic(),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
