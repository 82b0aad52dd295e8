pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "walk")]
#[command(about = "Walk CLI - distances, headings and track replay for GPS walks")]
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
    #[command(about = "Great-circle distance between two coordinates")]
    Distance(commands::distance::DistanceArgs),

    #[command(about = "Heading from one coordinate toward another")]
    Heading(commands::heading::HeadingArgs),

    #[command(about = "Replay a JSON file of position samples as a recorded track")]
    Replay(commands::replay::ReplayArgs),

    #[command(about = "Show the effective configuration")]
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
        Commands::Distance(args) => commands::distance::handle(args, output_format),
        Commands::Heading(args) => commands::heading::handle(args, output_format),
        Commands::Replay(args) => commands::replay::handle(args, output_format).await,
        Commands::Config => commands::config::handle(output_format),
    }
}
