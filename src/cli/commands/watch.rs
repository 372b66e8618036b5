//! `fleetdash watch` command - live dashboard with periodic refresh

use chrono::Local;
use console::{style, Term};
use miette::{IntoDiagnostic, Result};
use std::thread;
use tracing::{debug, warn};

use crate::cli::commands::list::ViewArgs;
use crate::cli::commands::utils::Session;
use crate::cli::GlobalOpts;
use crate::core::client::ApiError;
use crate::core::dashboard::Dashboard;
use crate::render::text::{render_cards, render_error_panel, render_stats};

#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Seconds between refreshes (default: from config, else 30)
    #[arg(long, short = 'n', value_name = "SECS")]
    pub interval: Option<u64>,

    /// Stop after N refreshes
    #[arg(long, value_name = "N")]
    pub iterations: Option<usize>,
}

pub fn run(args: WatchArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let interval = session.refresh_interval(args.interval);
    let mut dashboard = Dashboard::new(args.view.to_query(&session.config));

    let term = Term::stdout();
    let redraw = term.is_term();
    let mut tick = 0usize;

    loop {
        tick += 1;
        let outcome = dashboard.refresh(&session.client);
        if let Err(ref e) = outcome {
            warn!(error = %e, "refresh failed");
        }

        if redraw {
            term.clear_screen().into_diagnostic()?;
        }
        let header = format!(
            "Fleet dashboard  {}  {}",
            style(session.client.base_url()).dim(),
            style(format!(
                "updated {} (every {}s)",
                Local::now().format("%H:%M:%S"),
                interval.as_secs()
            ))
            .dim()
        );
        println!("{}", render_frame(&header, &dashboard, outcome.as_ref().err()));

        if args.iterations.is_some_and(|n| tick >= n) {
            break;
        }
        debug!(secs = interval.as_secs(), "sleeping until next refresh");
        thread::sleep(interval);
    }
    Ok(())
}

/// One screenful: header, then stats and cards, or the error panel
pub fn render_frame(header: &str, dashboard: &Dashboard, error: Option<&ApiError>) -> String {
    let mut out = vec![style(header).bold().to_string(), String::new()];
    match error {
        Some(e) => out.push(render_error_panel(&e.to_string())),
        None => {
            out.push(render_stats(&dashboard.stats()));
            out.push(String::new());
            out.push(render_cards(&dashboard.view()));
        }
    }
    out.join("\n")
}
