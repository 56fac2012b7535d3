//! DLC import CLI
//!
//! - `dlc-import types` lists the supported import types
//! - `dlc-import convert <input.csv>` converts a DLC export into a JSON import batch

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::Level;

mod convert;

#[derive(Parser)]
#[command(name = "dlc-import")]
#[command(
    author,
    version,
    about = "Convert Digital Library Collections CSV exports into archival import batches"
)]
struct Cli {
    /// More log output (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported import types
    Types,
    /// Convert a CSV export into a JSON import batch
    Convert(convert::ConvertArgs),
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_types() {
    println!("{}", dlc_ingest_csv::profile().bold());
    for import_type in dlc_ingest_csv::import_types() {
        println!(
            "  {} {}  {}",
            "→".cyan(),
            import_type.name.green(),
            import_type.description
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Types => cmd_types(),
        Commands::Convert(args) => convert::cmd_convert(&args)?,
    }
    Ok(())
}
