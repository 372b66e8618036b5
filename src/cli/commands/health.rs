//! `fleetdash health` command - backend health check

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::Session;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::client::FleetApi;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let health = session.client.health()?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&health).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&health).into_diagnostic()?);
        }
        _ => print!("{}", format_health(&health, session.client.base_url())),
    }
    Ok(())
}

/// Status line plus a table of the reported services, if any
pub fn format_health(health: &Value, base_url: &str) -> String {
    let status = health
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let styled = if status.eq_ignore_ascii_case("healthy") || status.eq_ignore_ascii_case("ok") {
        style(status).green().bold()
    } else {
        style(status).red().bold()
    };

    let mut out = format!("{} {}  {}\n", style("Status:").bold(), styled, style(base_url).dim());

    let services = health.get("services").and_then(Value::as_object);
    if let Some(services) = services.filter(|s| !s.is_empty()) {
        let mut builder = Builder::default();
        builder.push_record(["SERVICE", "STATUS"]);
        for (name, value) in services {
            let state = match value {
                Value::String(s) => s.clone(),
                other => other
                    .get("status")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| other.to_string()),
            };
            builder.push_record([name.clone(), state]);
        }
        out.push('\n');
        out.push_str(&builder.build().with(Style::rounded()).to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_health_with_services() {
        let health = json!({
            "status": "healthy",
            "services": {"database": "connected", "cache": {"status": "degraded"}}
        });
        let out = console::strip_ansi_codes(&format_health(&health, "http://x/api")).to_string();
        assert!(out.starts_with("Status: healthy"));
        assert!(out.contains("database"));
        assert!(out.contains("connected"));
        assert!(out.contains("degraded"));
    }

    #[test]
    fn test_format_health_without_services() {
        let out = console::strip_ansi_codes(&format_health(&json!({}), "http://x/api")).to_string();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("unknown"));
    }
}
