mod common;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use common::{init_tracing, trail_a, trail_b, Recorder, T0};
use walk_track::config::TrackConfig;
use walk_track::observer::{FnObserver, SnapshotLogger};
use walk_track::{
    NotifyPolicy, Observer, ObserverError, TrackError, TrackSnapshot, TrackState, TrackUpdate, Unit,
};

fn state_with(policy: NotifyPolicy) -> TrackState {
    TrackState::with_config(TrackConfig {
        default_unit: Unit::Meters,
        notify_policy: policy,
    })
}

#[test]
fn two_observers_called_once_in_order() -> Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let first = Recorder::new("first", &calls);
    let second = Recorder::new("second", &calls);

    let mut state = TrackState::new();
    state.register_observer(first.clone());
    state.register_observer(second.clone());

    let report = state.update(TrackUpdate::new().with_name("Ridge"))?;

    assert_eq!(report.delivered, 2);
    assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 1);
    assert_eq!(first.last().and_then(|s| s.name), Some("Ridge".to_string()));
    Ok(())
}

#[test]
fn observers_see_the_merged_snapshot() -> Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder::new("recorder", &calls);

    let mut state = TrackState::new();
    state.register_observer(recorder.clone());
    state.add_point(trail_a())?;
    state.add_point(trail_b())?;
    state.update(TrackUpdate::new().with_active(true).with_current_position(trail_b()))?;

    let snapshot = recorder.last().unwrap();
    assert!(snapshot.active);
    assert_eq!(snapshot.way_points.len(), 2);
    assert_eq!(snapshot.total_distance, state.total_distance());
    assert_eq!(snapshot.current_position, Some(trail_b()));
    assert_eq!(snapshot.track_id, state.track_id());
    Ok(())
}

#[test]
fn setters_and_add_point_do_not_notify() -> Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder::new("recorder", &calls);

    let mut state = TrackState::new();
    state.register_observer(recorder.clone());
    state.add_point(trail_a())?;
    state.set_current_position(trail_a())?;
    state.clear();

    assert_eq!(recorder.count(), 0);
    state.notify()?;
    assert_eq!(recorder.count(), 1);
    Ok(())
}

#[test]
fn clear_keeps_observers() -> Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder::new("recorder", &calls);

    let mut state = TrackState::new();
    state.register_observer(recorder.clone());
    state.clear();

    assert_eq!(state.observer_count(), 1);
    state.update(TrackUpdate::new().with_active(false))?;
    assert_eq!(recorder.count(), 1);
    Ok(())
}

#[test]
fn isolated_failure_does_not_block_later_observers() -> Result<()> {
    init_tracing();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let broken = Recorder::failing("broken", &calls);
    let healthy = Recorder::new("healthy", &calls);

    let mut state = state_with(NotifyPolicy::Isolate);
    state.register_observer(broken.clone());
    state.register_observer(healthy.clone());

    let report = state.begin(Some("Isolated".to_string()), trail_a().with_timestamp(T0))?;

    assert_eq!(report.delivered, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].observer, "broken");
    assert_eq!(healthy.count(), 1);
    assert!(state.is_active());
    Ok(())
}

#[test]
fn fail_fast_stops_but_keeps_the_merge() -> Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let broken = Recorder::failing("broken", &calls);
    let never = Recorder::new("never", &calls);

    let mut state = state_with(NotifyPolicy::FailFast);
    state.register_observer(broken.clone());
    state.register_observer(never.clone());

    let err = state.update(TrackUpdate::new().with_name("Kept")).unwrap_err();

    assert!(matches!(
        err,
        TrackError::Observer(ObserverError::Aborted { ref observer, delivered: 0, .. }) if observer == "broken"
    ));
    assert_eq!(never.count(), 0);
    assert_eq!(state.name(), Some("Kept"));
    Ok(())
}

#[test]
fn duplicate_registration_and_removal() -> Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder::new("twice", &calls);
    let handle: Arc<dyn Observer<TrackSnapshot>> = recorder.clone();

    let mut state = TrackState::new();
    state.register_observer(handle.clone());
    state.register_observer(handle.clone());
    state.notify()?;
    assert_eq!(recorder.count(), 2);

    assert!(state.remove_observer(&handle));
    state.notify()?;
    assert_eq!(recorder.count(), 3);

    assert!(state.remove_observer(&handle));
    assert!(!state.remove_observer(&handle));
    assert_eq!(state.observer_count(), 0);
    Ok(())
}

#[test]
fn bundled_observers_plug_in() -> Result<()> {
    init_tracing();
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = names.clone();

    let mut state = TrackState::new();
    state.register_observer(Arc::new(SnapshotLogger));
    state.register_observer(Arc::new(FnObserver::new("names", move |s: &TrackSnapshot| {
        sink.lock().unwrap().push(s.name.clone());
        Ok(())
    })));

    let report = state.update(TrackUpdate::new().with_name("Bluff"))?;
    assert_eq!(report.delivered, 2);
    assert_eq!(*names.lock().unwrap(), vec![Some("Bluff".to_string())]);
    Ok(())
}
