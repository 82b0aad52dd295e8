use crate::cli::OutputFormat;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = crate::config::config();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            println!("Environment:   {:?}", config.environment);
            println!("Default unit:  {}", config.track.default_unit);
            println!("Notify policy: {}", config.track.notify_policy);
            println!("Log filter:    {}", config.logging.filter);
            println!("Replay speed:  {}x", config.replay.speedup);
        }
    }
    Ok(())
}
