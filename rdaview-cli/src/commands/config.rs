//! Configuration CLI commands.
//!
//! Provides `config path` and `config show` for inspecting the settings the
//! other commands run with.

use std::path::Path;

use clap::Subcommand;
use rdaview::config::ClientConfig;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: Option<&Path>, config: &ClientConfig) {
    match command {
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Path => run_path(path),
    }
}

fn run_show(config: &ClientConfig) {
    for (key, value) in settings(config) {
        println!("{} = {}", key, value);
    }
}

fn run_path(path: Option<&Path>) {
    match path {
        Some(p) => println!("{}", p.display()),
        None => println!("(no home directory; using defaults)"),
    }
}

/// Effective settings as `section.key` pairs.
fn settings(config: &ClientConfig) -> Vec<(&'static str, String)> {
    vec![
        ("catalog.url", config.catalog.url.clone()),
        ("catalog.page_size", config.catalog.page_size.to_string()),
        ("catalog.timeout_secs", config.catalog.timeout_secs.to_string()),
        ("image.projection", config.default_projection.clone()),
        ("logging.level", config.logging.level.clone()),
        (
            "logging.file",
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(stderr)".to_string()),
        ),
    ]
}
