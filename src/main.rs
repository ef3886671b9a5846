use clap::Parser;
use goalbuckets::cli::commands::Cli;
use goalbuckets::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => handlers::resolve_dir(cli.dashboard_dir.as_deref())
            .and_then(|dir| goalbuckets::tui::run(dir.as_deref())),
        Some(_) => {
            goalbuckets::logging::init_stderr();
            handlers::dispatch(cli)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
