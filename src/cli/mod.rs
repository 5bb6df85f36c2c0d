pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio CLI - inspect collections and run lookups against Supabase")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List configured collections, tables and search columns")]
    Collections,

    #[command(about = "Run a collection lookup directly against the backend")]
    Query(commands::query::QueryArgs),

    #[command(about = "Health check a running Portfolio API server")]
    Ping {
        #[arg(long, default_value = "http://127.0.0.1:7071", help = "Server base URL")]
        url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Collections => commands::collections::handle(output_format),
        Commands::Query(args) => commands::query::handle(args, output_format).await,
        Commands::Ping { url } => commands::ping::handle(&url, output_format).await,
    }
}
