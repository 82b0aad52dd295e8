mod common;

use anyhow::Result;
use common::{assert_close, T0};
use serde_json::json;
use walk_track::cli::commands::replay::{replay, ReplayOptions};
use walk_track::config::TrackConfig;
use walk_track::types::parse_samples;
use walk_track::{TrackPhase, Unit};

fn recorded_walk() -> serde_json::Value {
    json!([
        { "coords": { "latitude": 42.5907, "longitude": -88.4427, "accuracy": 6.0 }, "timestamp": T0 },
        { "latitude": 42.5910, "longitude": -88.4430, "timestamp": T0 + 20 },
        { "latitude": 95.0, "longitude": -88.4435, "timestamp": T0 + 30 },
        { "coords": { "latitude": 42.5915, "longitude": -88.4440, "accuracy": 4.0, "speed": 1.2 }, "timestamp": T0 + 60 }
    ])
}

#[tokio::test]
async fn replay_builds_a_finished_track() -> Result<()> {
    let samples = parse_samples(&recorded_walk().to_string())?;
    let options = ReplayOptions {
        name: Some("Replayed".to_string()),
        location: Some("Big Foot Beach".to_string()),
        ..Default::default()
    };

    let state = replay(samples, TrackConfig::default(), &options).await?;

    assert_eq!(state.phase(), TrackPhase::Finished);
    // The out-of-range fix is skipped
    assert_eq!(state.points().len(), 3);
    assert_close(state.total_distance(), 140.38, 0.02);

    let summary = state.summary();
    assert_eq!(summary.name.as_deref(), Some("Replayed"));
    assert_eq!(summary.location.as_deref(), Some("Big Foot Beach"));
    assert_eq!(summary.duration_ms, Some(60));
    Ok(())
}

#[tokio::test]
async fn replay_honours_unit_and_pacing() -> Result<()> {
    let samples = parse_samples(&recorded_walk().to_string())?;
    let options = ReplayOptions {
        unit: Some(Unit::Kilometers),
        realtime: true,
        speedup: 2.0,
        ..Default::default()
    };

    let started = std::time::Instant::now();
    let state = replay(samples, TrackConfig::default(), &options).await?;

    // 60 ms of recorded gaps at 2x
    assert!(started.elapsed() >= std::time::Duration::from_millis(25));
    assert_eq!(state.unit(), Unit::Kilometers);
    assert_close(state.total_distance(), 0.14038, 0.00002);
    Ok(())
}

#[tokio::test]
async fn single_sample_replay_has_zero_duration() -> Result<()> {
    let samples = parse_samples(&json!([{ "latitude": 1.0, "longitude": 2.0, "timestamp": T0 }]).to_string())?;

    let state = replay(samples, TrackConfig::default(), &ReplayOptions::default()).await?;

    assert_eq!(state.points().len(), 2);
    assert_eq!(state.total_distance(), 0.0);
    assert_eq!(state.summary().duration_ms, Some(0));
    assert_eq!(state.summary().average_speed, None);
    Ok(())
}

#[tokio::test]
async fn empty_input_is_an_error() {
    let result = replay(Vec::new(), TrackConfig::default(), &ReplayOptions::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn invalid_first_sample_fails_the_run() {
    let samples = parse_samples(&json!([
        { "latitude": 100.0, "longitude": 2.0 },
        { "latitude": 1.0, "longitude": 2.0 }
    ]).to_string())
    .unwrap();

    let err = replay(samples, TrackConfig::default(), &ReplayOptions::default())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("failed to start track"));
}

#[tokio::test]
async fn unrepresentable_timestamp_is_skipped_while_pacing() -> Result<()> {
    let samples = parse_samples(&json!([
        { "latitude": 42.5907, "longitude": -88.4427, "timestamp": T0 },
        { "latitude": 42.5910, "longitude": -88.4430, "timestamp": i64::MIN },
        { "latitude": 42.5915, "longitude": -88.4440, "timestamp": T0 + 10 }
    ]).to_string())?;
    let options = ReplayOptions {
        realtime: true,
        speedup: 1.0,
        ..Default::default()
    };

    let state = replay(samples, TrackConfig::default(), &options).await?;

    assert_eq!(state.phase(), TrackPhase::Finished);
    assert_eq!(state.points().len(), 2);
    assert_eq!(state.summary().duration_ms, Some(10));
    Ok(())
}

#[tokio::test]
async fn oversized_delay_is_not_slept() -> Result<()> {
    let samples = parse_samples(&json!([
        { "latitude": 42.5907, "longitude": -88.4427, "timestamp": T0 },
        { "latitude": 42.5915, "longitude": -88.4440, "timestamp": T0 + 10 }
    ]).to_string())?;
    let options = ReplayOptions {
        realtime: true,
        speedup: 1e-300,
        ..Default::default()
    };

    let started = std::time::Instant::now();
    let state = replay(samples, TrackConfig::default(), &options).await?;

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(state.phase(), TrackPhase::Finished);
    Ok(())
}
