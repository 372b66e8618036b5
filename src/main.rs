use clap::Parser;
use fleetdash::cli::commands;
use fleetdash::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    fleetdash::core::init_logging(global.verbose);

    match cli.command {
        Commands::List(args) => commands::list::run(args, &global),
        Commands::Show(args) => commands::show::run(args, &global),
        Commands::Stats => commands::stats::run(&global),
        Commands::Add(args) => commands::add::run(args, &global),
        Commands::Delete(args) => commands::delete::run(args, &global),
        Commands::SetStatus(args) => commands::set_status::run(args, &global),
        Commands::Watch(args) => commands::watch::run(args, &global),
        Commands::Export(args) => commands::export::run(args, &global),
        Commands::Health => commands::health::run(&global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
