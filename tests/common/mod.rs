#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use walk_track::{GeoPoint, Observer, ObserverError, TrackSnapshot};

/// 2024-05-01T07:30:00Z
pub const T0: i64 = 1_714_548_600_000;

// Three consecutive fixes along a trail in southern Wisconsin
pub fn trail_a() -> GeoPoint {
    GeoPoint::new(42.5907, -88.4427)
}

pub fn trail_b() -> GeoPoint {
    GeoPoint::new(42.5910, -88.4430)
}

pub fn trail_c() -> GeoPoint {
    GeoPoint::new(42.5915, -88.4440)
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Observer that keeps every snapshot it receives and appends its label to a
/// shared call log, so tests can check delivery order across observers.
pub struct Recorder {
    pub label: String,
    pub snapshots: Mutex<Vec<TrackSnapshot>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl Recorder {
    pub fn new(label: &str, calls: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Self::build(label, calls, false)
    }

    pub fn failing(label: &str, calls: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Self::build(label, calls, true)
    }

    fn build(label: &str, calls: &Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            snapshots: Mutex::new(Vec::new()),
            calls: calls.clone(),
            fail,
        })
    }

    pub fn count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<TrackSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }
}

impl Observer<TrackSnapshot> for Recorder {
    fn name(&self) -> &str {
        &self.label
    }

    fn update(&self, snapshot: &TrackSnapshot) -> Result<(), ObserverError> {
        self.calls.lock().unwrap().push(self.label.clone());
        self.snapshots.lock().unwrap().push(snapshot.clone());
        if self.fail {
            return Err(ObserverError::Failed(format!("{} is broken", self.label)));
        }
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("walk_track=debug")
        .with_test_writer()
        .try_init();
}
