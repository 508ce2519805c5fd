//! Graphclone CLI - Clone an entity subgraph in a JSON graph document

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use config::{config_file_path, Config};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "graphclone")]
#[command(author, version, about = "Clone an entity and everything reachable from it")]
pub struct Cli {
    /// Input file containing the graph document ("-" reads stdin)
    pub input: PathBuf,

    /// Entity to clone together with its related entities
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub entity_id: u64,

    /// Emit entities and links in ascending id order
    #[arg(long, overrides_with = "no_sort")]
    pub sort: bool,

    /// Keep registration and link order in the output
    #[arg(long, overrides_with = "sort")]
    pub no_sort: bool,

    /// Print the document on a single line
    #[arg(long)]
    pub compact: bool,

    /// Config file
    #[arg(short, long, env = "GRAPHCLONE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    /// Flags win over the config file
    pub fn sort_links(&self, config: &Config) -> bool {
        if self.sort {
            true
        } else if self.no_sort {
            false
        } else {
            config.sort_links
        }
    }

    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if self.compact {
            OutputFormat::Compact
        } else {
            OutputFormat::from_pretty(config.pretty)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the document, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting graphclone CLI");

    let config_path = cli.config_path();
    let config = Config::load_from(&config_path)?;
    for key in Config::keys() {
        tracing::debug!(
            "config {} = {}",
            key,
            config.get(key).unwrap_or_else(|| "(not set)".to_string())
        );
    }

    commands::clone::run(&cli, &config)
}
