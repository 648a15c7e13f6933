use clap::Parser;
use tracing_subscriber::EnvFilter;

use kolek::cli::{self, Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            previous,
            current,
            output,
            no_view,
        } => cli::compare::run(&previous, &current, output, no_view),
        Commands::Filter {
            file,
            output,
            no_view,
        } => cli::filter::run(&file, output, no_view),
        Commands::Config { export_dir } => cli::config::run(export_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
