pub mod browse;
pub mod check;
pub mod data;
pub mod export;
pub mod init;
pub mod options;
pub mod status;
pub mod sums;
pub mod text;
pub mod view;

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use crate::export::ExportFormat;

#[derive(Parser)]
#[command(
    name = "cartir",
    version,
    about = "Filter, total, and export cartir field survey records."
)]
pub struct Cli {
    /// Path to the cartir JSON document (default: the `data_file` setting)
    #[arg(long, global = true, env = "CARTIR_DATA")]
    pub data: Option<String>,

    /// Logging verbosity: off, error, warn, info, debug, trace.
    /// RUST_LOG takes precedence when set.
    #[arg(long = "log-level", global = true, default_value_t = LevelFilter::WARN)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save default paths to ~/.config/cartir/settings.json.
    Init {
        /// Default JSON document to load
        #[arg(long = "data-file")]
        data_file: Option<String>,
        /// Default directory for exports
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
    },
    /// Show settings and a summary of the current dataset.
    Status,
    /// Totals per macro bloque and calle.
    Sums {
        /// Print a plain table even on a terminal
        #[arg(long)]
        text: bool,
    },
    /// List records, optionally filtered.
    Data {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print a plain table even on a terminal
        #[arg(long)]
        text: bool,
    },
    /// List the values each filter can take.
    Options {
        /// Scope calle/zanja choices to this macro bloque
        #[arg(long)]
        section: Option<String>,
        /// Scope zanja choices to this calle
        #[arg(long)]
        street: Option<String>,
    },
    /// Report records that do not match the expected layout.
    Check,
    /// Write the sums and the full record list to a spreadsheet.
    Export {
        /// Output file (default: <export_dir>/data.xlsx)
        #[arg(long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
    },
    /// Interactively filter records.
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print a shell completion script.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Turno, e.g. "Turno Dia"
    #[arg(long)]
    pub shift: Option<String>,
    /// Macro bloque
    #[arg(long)]
    pub section: Option<String>,
    /// Calle (requires --section)
    #[arg(long)]
    pub street: Option<String>,
    /// Zanja (requires --street)
    #[arg(long)]
    pub trench: Option<String>,
}

/// Whether to open an interactive view instead of printing text.
pub(crate) fn interactive(force_text: bool) -> bool {
    !force_text && std::io::stdout().is_terminal()
}
