//! WMSBridge CLI - command-line interface
//!
//! Inspection tooling for WMS overlay endpoints: print the GetMap tile URL
//! template a surface would use, or probe GetFeatureInfo directly.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "wmsbridge", version, about = "WMS overlay inspection tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the GetMap tile URL template for a layer
    Template(commands::template::TemplateArgs),
    /// Issue a GetFeatureInfo request and print the feature properties
    Probe(commands::probe::ProbeArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Template(args) => commands::template::run(args),
        Commands::Probe(args) => commands::probe::run(args).await,
    };

    if let Err(error) = result {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
