#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::{Parser, Subcommand};
use glassbook::*;
use tracing::Level;

mod commands;

/// Most verbose level printed with `--debug`
const DEBUG_LOG_LEVEL: Level = Level::DEBUG;

use commands::calc::CalcCommands;
use commands::compare::CompareArgs;
use commands::export::ExportArgs;
use commands::list::ListArgs;
use commands::show::ShowArgs;
use commands::teleconverter::TeleconverterArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.glassbook/glassbook.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv, csv
    #[clap(short, long, global = true)]
    format: Option<OutputFormat>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lenses, optionally filtered by manufacturer, mount, format, or teleconverter support
    #[clap(visible_alias = "filter")]
    List(ListArgs),

    /// Show the full specification of one lens
    Show(ShowArgs),

    /// Compare lenses side by side
    Compare(CompareArgs),

    /// List the distinct manufacturers and mounts in the catalog
    Facets,

    /// Show effective specifications with teleconverters attached
    Teleconverter(TeleconverterArgs),

    /// Optical calculators that do not need the catalog
    Calc {
        #[clap(subcommand)]
        commands: CalcCommands,
    },

    /// Export lenses to a CSV or JSON file
    Export(ExportArgs),

    /// List values that could not be derived from the lens datasets
    Quality,

    /// Show the current configuration
    Config,
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            // show per-lens resolution details along with build summaries
            .with_max_level(DEBUG_LOG_LEVEL)
            .init();
    }

    let config = match GlassbookConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let output_format = cli.format.unwrap_or(config.default_format);

    // calculators and config do not need the lens data
    let command = match cli.command {
        Commands::Calc { commands: calc } => {
            commands::calc::run(calc, output_format);
            return;
        }
        Commands::Config => {
            commands::config::run(&config, output_format);
            return;
        }
        command => command,
    };

    let catalog = match commands::load_catalog(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            std::process::exit(1);
        }
    };

    match command {
        Commands::List(args) => commands::list::run(&catalog, args, output_format),
        Commands::Show(args) => commands::show::run(&catalog, args, output_format),
        Commands::Compare(args) => commands::compare::run(&catalog, args, output_format),
        Commands::Facets => commands::facets::run(&catalog, output_format),
        Commands::Teleconverter(args) => {
            commands::teleconverter::run(&catalog, args, output_format)
        }
        Commands::Export(args) => commands::export::run(&catalog, args),
        Commands::Quality => commands::quality::run(&catalog, output_format),
        Commands::Calc { .. } | Commands::Config => {}
    }
}
