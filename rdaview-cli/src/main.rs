//! rdaview CLI - Command-line interface
//!
//! Builds RDA strip graphs and resolves IDAHO parts for WorldView catalog ids.
//!
//! ```text
//! rdaview graph --sensor wv02 --cat-id 1030010076B8F500 --dtype uint8
//! rdaview parts --sensor wv03-swir --cat-id 104A010010C29F00
//! rdaview bands --sensor wv04
//! ```

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rdaview::config::{default_config_path, ClientConfig};
use rdaview::logging;

use commands::common::{ImageArgs, SensorArg};
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "rdaview", version, about = "WorldView RDA graphs and IDAHO parts")]
struct Cli {
    /// Configuration file (defaults to ~/.rdaview/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the strip graph for a catalog id as JSON
    Graph {
        #[command(flatten)]
        image: ImageArgs,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// List the IDAHO tiles making up a catalog id
    Parts {
        #[command(flatten)]
        image: ImageArgs,

        /// Also print each tile's read graph
        #[arg(long)]
        graphs: bool,
    },

    /// Show RGB, NDVI and NDWI band indices for a sensor
    Bands {
        #[arg(long, value_enum, ignore_case = true, default_value = "wv02")]
        sensor: SensorArg,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.or_else(default_config_path);
    let mut config = match &config_path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    let _guard = logging::init_logging(&config.logging)?;
    tracing::debug!(config = ?config_path, "Loaded configuration");

    match cli.command {
        Command::Graph { image, compact } => commands::graph::run(&image, &config, compact),
        Command::Parts { image, graphs } => commands::parts::run(&image, &config, graphs),
        Command::Bands { sensor } => {
            commands::bands::run(sensor);
            Ok(())
        }
        Command::Config(command) => {
            commands::config::run(command, config_path.as_deref(), &config);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
