use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use serde_json::json;
use tokio::io::AsyncReadExt;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::TrackConfig;
use crate::geodesy::Unit;
use crate::observer::{NotifyReport, SnapshotLogger};
use crate::track::{TrackState, TrackUpdate};
use crate::types::{parse_samples, PositionSample};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    #[arg(help = "JSON array of position samples, or - for stdin")]
    pub input: String,

    #[arg(long, help = "Track name")]
    pub name: Option<String>,

    #[arg(long, help = "Free-text location label")]
    pub location: Option<String>,

    #[arg(long, help = "Unit: metric|meters, km, miles|mi|imperial (default: configured unit)")]
    pub unit: Option<String>,

    #[arg(long, help = "Pace samples by their recorded timestamps")]
    pub realtime: bool,
}

/// Knobs for one replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub name: Option<String>,
    pub location: Option<String>,
    pub unit: Option<Unit>,
    /// Sleep between samples for their recorded gap divided by `speedup`
    pub realtime: bool,
    pub speedup: f64,
}

pub async fn handle(args: ReplayArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = crate::config::config();
    let raw = read_input(&args.input).await?;
    let samples = parse_samples(&raw).with_context(|| format!("failed to parse samples from {}", args.input))?;

    let options = ReplayOptions {
        name: args.name,
        location: args.location,
        unit: args.unit.as_deref().map(|u| Unit::resolve(Some(u))),
        realtime: args.realtime,
        speedup: config.replay.speedup,
    };
    let state = replay(samples, config.track, &options).await?;
    let summary = state.summary();

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Track replayed",
            Some(json!({ "summary": summary })),
        ),
        OutputFormat::Text => {
            output_success(&output_format, "Track replayed", None)?;
            if let Some(name) = &summary.name {
                println!("Name:      {}", name);
            }
            println!("Waypoints: {}", summary.waypoint_count);
            println!("Distance:  {:.1} {}", summary.total_distance, summary.unit);
            if let Some(ms) = summary.duration_ms {
                println!("Duration:  {}s", ms / 1000);
            }
            if let Some(speed) = summary.average_speed {
                println!("Avg speed: {:.2} {}/h", speed, summary.unit);
            }
            Ok(())
        }
    }
}

/// Drive a fresh `TrackState` through a recorded sequence of samples.
///
/// The first sample starts the track and the last one finishes it; samples in
/// between become waypoints. Intermediate samples with invalid coordinates
/// are skipped with a warning, an invalid first or last sample fails the run.
pub async fn replay(
    samples: Vec<PositionSample>,
    config: TrackConfig,
    options: &ReplayOptions,
) -> anyhow::Result<TrackState> {
    let (first, rest) = samples
        .split_first()
        .context("no position samples in input")?;

    let mut state = TrackState::with_config(config);
    if let Some(unit) = options.unit {
        state.set_unit(unit);
    }
    state.register_observer(Arc::new(SnapshotLogger));

    if let Some(location) = &options.location {
        log_failures(state.update(TrackUpdate::new().with_location(location.clone()))?);
    }
    log_failures(
        state
            .begin(options.name.clone(), first.clone())
            .context("failed to start track")?,
    );

    let (last, middle) = match rest.split_last() {
        Some((last, middle)) => (last, middle),
        None => (first, rest),
    };

    let mut previous = first.timestamp();
    let mut skipped = 0usize;
    for sample in middle {
        pace(options, previous, sample.timestamp()).await;

        if let Err(e) = state.add_point(sample.clone()) {
            tracing::warn!("Skipping sample: {}", e);
            skipped += 1;
            continue;
        }
        previous = sample.timestamp().or(previous);
        state.set_current_position(sample.clone())?;
        log_failures(state.notify()?);
    }

    pace(options, previous, last.timestamp()).await;
    log_failures(state.finish(last.clone()).context("failed to finish track")?);

    if skipped > 0 {
        tracing::warn!("{} of {} samples skipped", skipped, samples.len());
    }
    Ok(state)
}

async fn pace(options: &ReplayOptions, previous: Option<i64>, next: Option<i64>) {
    if !options.realtime || options.speedup <= 0.0 {
        return;
    }
    let Some(gap_ms) = previous.zip(next).and_then(|(previous, next)| next.checked_sub(previous)) else {
        return;
    };
    if gap_ms <= 0 {
        return;
    }
    match Duration::try_from_secs_f64(gap_ms as f64 / 1000.0 / options.speedup) {
        Ok(delay) => tokio::time::sleep(delay).await,
        Err(e) => tracing::warn!("Not pacing a {} ms gap: {}", gap_ms, e),
    }
}

fn log_failures(report: NotifyReport) {
    for failure in &report.failures {
        tracing::warn!("Observer '{}' failed: {}", failure.observer, failure.error);
    }
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("failed to read samples from stdin")?;
        Ok(raw)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("failed to read {}", input))
    }
}
