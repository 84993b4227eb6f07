//! metasync CLI
//!
//! Keeps a local metadata document in sync with a remote engine.
//!
//! # Commands
//!
//! - `export` - Write the engine's metadata to a file or stdout
//! - `reset` - Clear all metadata on the engine
//! - `reload` - Make the engine recompute its metadata
//! - `apply` - Replace the engine's metadata with a local document
//! - `query` - Run a JSON array of queries as one bulk request

mod commands;
mod http;

use clap::{Parser, Subcommand};
use http::ReqwestClient;
use metasync_client::{ClientConfig, Invocation, MetadataClient, DEFAULT_QUERY_PATH};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// metasync command-line metadata tools.
#[derive(Parser)]
#[command(name = "metasync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server URL of the remote engine
    #[arg(
        global = true,
        short,
        long,
        env = "METASYNC_ENDPOINT",
        default_value = "http://localhost:8080"
    )]
    endpoint: String,

    /// Path of the query endpoint
    #[arg(global = true, long, default_value = DEFAULT_QUERY_PATH)]
    query_path: String,

    /// Request timeout in seconds
    #[arg(global = true, long)]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the engine's metadata
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear all metadata on the engine
    Reset,

    /// Reload metadata on the engine
    Reload,

    /// Replace the engine's metadata with a local JSON document
    Apply {
        /// Metadata document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Run a JSON array of queries as one bulk request
    Query {
        /// File holding the queries
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Version = cli.command {
        println!("metasync CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("metasync client v{}", metasync_client::VERSION);
        return Ok(());
    }

    let config = ClientConfig::new(cli.endpoint)
        .with_query_path(cli.query_path)
        .with_invocation(Invocation::Cli);
    let http = ReqwestClient::new(cli.timeout.map(Duration::from_secs))?;
    let client = MetadataClient::new(config, http);

    match cli.command {
        Commands::Export { output } => commands::export::run(&client, output.as_deref())?,
        Commands::Reset => commands::reset::run(&client)?,
        Commands::Reload => commands::reload::run(&client)?,
        Commands::Apply { file } => commands::apply::run(&client, &file)?,
        Commands::Query { file } => commands::query::run(&client, &file)?,
        Commands::Version => {}
    }

    Ok(())
}
