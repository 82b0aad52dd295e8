use clap::Parser;
use walk_track::cli::utils::output_error;
use walk_track::cli::{Cli, OutputFormat};
use walk_track::TrackError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so WALK_* settings apply without exporting them
    let _ = dotenvy::dotenv();

    let config = walk_track::config::config();
    walk_track::logging::init(&config.logging);
    tracing::debug!("Starting walk in {:?} mode", config.environment);

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = walk_track::cli::run(cli).await {
        let code = e.downcast_ref::<TrackError>().map(TrackError::error_code);
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => output_error(&output_format, &format!("{e:?}"), code)?,
            _ => output_error(&output_format, &format!("{e:#}"), code)?,
        }
        std::process::exit(1);
    }

    Ok(())
}
