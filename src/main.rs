mod aggregator;
mod browser;
mod cli;
mod dataset;
mod error;
mod export;
mod filter;
mod fmt;
mod models;
mod parser;
mod settings;
mod tui;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

/// Initializes the tracing subscriber. RUST_LOG wins when present; otherwise
/// `level` applies to this crate only.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("log level set to {}", cli.log_level.to_string().to_lowercase());

    let data = cli.data.as_deref();
    let result = match cli.command {
        Commands::Init {
            data_file,
            export_dir,
        } => cli::init::run(data_file, export_dir),
        Commands::Status => cli::status::run(data),
        Commands::Sums { text } => cli::sums::run(data, text),
        Commands::Data { filters, text } => cli::data::run(data, &filters, text),
        Commands::Options { section, street } => cli::options::run(data, section, street),
        Commands::Check => cli::check::run(data),
        Commands::Export { output, format } => cli::export::run(data, output, format),
        Commands::Browse { filters } => cli::browse::run(data, &filters),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cartir", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
