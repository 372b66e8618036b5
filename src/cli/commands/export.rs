//! `fleetdash export` command - standalone HTML dashboard page

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::list::ViewArgs;
use crate::cli::commands::utils::{write_output, Session};
use crate::cli::GlobalOpts;
use crate::render::HtmlRenderer;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Page title
    #[arg(long, default_value = "Fleet dashboard")]
    pub title: String,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let dashboard = session.load(args.view.to_query(&session.config))?;

    let renderer = HtmlRenderer::new().map_err(|e| miette::miette!("{}", e))?;
    let view = dashboard.view();
    let html = renderer
        .render_dashboard(&args.title, &dashboard.stats(), dashboard.query(), &view)
        .map_err(|e| miette::miette!("{}", e))?;

    write_output(&html, args.output.as_deref())?;

    if let Some(ref path) = args.output {
        if !global.quiet {
            eprintln!(
                "{} Exported {} vehicle(s) to {}",
                style("✓").green(),
                view.len(),
                style(path.display()).cyan()
            );
        }
    }
    Ok(())
}
