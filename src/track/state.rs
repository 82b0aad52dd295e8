use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TrackConfig;
use crate::error::TrackError;
use crate::geodesy::{heading, point_distance, Unit};
use crate::observer::{NotifyReport, Observer, ObserverError, Subject};
use crate::track::snapshot::{TrackSnapshot, TrackSummary};
use crate::track::update::TrackUpdate;
use crate::types::{GeoPoint, PositionSample};

/// Where a track is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackPhase {
    Idle,
    Active,
    /// End fields are set but the track has not been cleared yet
    Finished,
}

/// Observable aggregate for the track currently being recorded.
///
/// The state owns its waypoints and positions outright; callers read them
/// through borrowed slices or owned snapshots. Access is not synchronized, so
/// a state shared between tasks must sit behind the caller's own lock.
#[derive(Debug)]
pub struct TrackState {
    track_id: Option<Uuid>,
    active: bool,
    name: Option<String>,
    location: Option<String>,
    date: Option<NaiveDate>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    start_position: Option<GeoPoint>,
    current_position: Option<GeoPoint>,
    end_position: Option<GeoPoint>,
    way_points: Vec<GeoPoint>,
    segment_distances: Vec<f64>,
    duration: Option<Duration>,
    unit: Unit,
    subject: Subject<TrackSnapshot>,
}

impl TrackState {
    pub fn new() -> Self {
        Self::with_config(TrackConfig::default())
    }

    pub fn with_config(config: TrackConfig) -> Self {
        Self {
            track_id: None,
            active: false,
            name: None,
            location: None,
            date: None,
            start_time: None,
            end_time: None,
            start_position: None,
            current_position: None,
            end_position: None,
            way_points: Vec::new(),
            segment_distances: Vec::new(),
            duration: None,
            unit: config.default_unit,
            subject: Subject::with_policy(config.notify_policy),
        }
    }

    // ========================================
    // Observers
    // ========================================

    pub fn register_observer(&mut self, observer: Arc<dyn Observer<TrackSnapshot>>) {
        self.subject.register(observer);
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn Observer<TrackSnapshot>>) -> bool {
        self.subject.remove(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.subject.len()
    }

    /// Push the current snapshot to every observer
    pub fn notify(&self) -> Result<NotifyReport, ObserverError> {
        self.subject.notify(&self.get())
    }

    // ========================================
    // Mutation
    // ========================================

    /// Shallow-merge `changes` into the state, then notify observers.
    ///
    /// Positions in the update are normalized and validated before anything
    /// is written. The merge stands even if a fail-fast notification aborts.
    pub fn update(&mut self, changes: TrackUpdate) -> Result<NotifyReport, TrackError> {
        let start_position = normalize(changes.start_position, "startPosition")?;
        let current_position = normalize(changes.current_position, "currentPosition")?;
        let end_position = normalize(changes.end_position, "endPosition")?;

        if let Some(active) = changes.active {
            self.set_active(active);
        }
        if changes.name.is_some() {
            self.name = changes.name;
        }
        if changes.location.is_some() {
            self.location = changes.location;
        }
        if changes.date.is_some() {
            self.date = changes.date;
        }
        if changes.start_time.is_some() {
            self.start_time = changes.start_time;
        }
        if changes.end_time.is_some() {
            self.end_time = changes.end_time;
        }
        if start_position.is_some() {
            self.start_position = start_position;
        }
        if current_position.is_some() {
            self.current_position = current_position;
        }
        if end_position.is_some() {
            self.end_position = end_position;
        }

        Ok(self.notify()?)
    }

    /// Reset every per-track field, ready for the next walk.
    ///
    /// The current position, the location label, the unit and the observer
    /// list survive: a live position feed may still be running.
    pub fn clear(&mut self) {
        self.track_id = None;
        self.active = false;
        self.date = None;
        self.name = None;
        self.start_time = None;
        self.start_position = None;
        self.end_position = None;
        self.end_time = None;
        self.way_points.clear();
        self.segment_distances.clear();
        self.duration = None;
    }

    /// Append a waypoint using the state's configured unit
    pub fn add_point(&mut self, sample: impl Into<PositionSample>) -> Result<&GeoPoint, TrackError> {
        self.add_point_in(sample, self.unit)
    }

    /// Append a waypoint, measuring its distance in `unit`.
    ///
    /// The first waypoint of a track always gets distance 0. Any `distance`
    /// already on the incoming sample is overwritten. A finished track takes
    /// no more waypoints, so its distance stays the one its duration covers.
    pub fn add_point_in(
        &mut self,
        sample: impl Into<PositionSample>,
        unit: Unit,
    ) -> Result<&GeoPoint, TrackError> {
        if self.phase() == TrackPhase::Finished {
            return Err(TrackError::AlreadyFinished);
        }
        let point = sample.into().into_point();
        point.validate("waypoint")?;
        if let Some(ms) = point.timestamp {
            timestamp_to_utc(ms)?;
        }
        Ok(self.push_waypoint(point, unit))
    }

    fn push_waypoint(&mut self, mut point: GeoPoint, unit: Unit) -> &GeoPoint {
        point.distance = match self.way_points.last() {
            Some(previous) => point_distance(previous, &point, unit),
            None => 0.0,
        };
        self.segment_distances.push(point.distance);
        self.way_points.push(point);
        tracing::trace!(
            "Waypoint {} added: {:.3} {}",
            self.way_points.len(),
            point.distance,
            unit
        );
        &self.way_points[self.way_points.len() - 1]
    }

    pub fn set_start_position(&mut self, sample: impl Into<PositionSample>) -> Result<(), TrackError> {
        self.start_position = normalize(Some(sample.into()), "startPosition")?;
        Ok(())
    }

    pub fn set_current_position(&mut self, sample: impl Into<PositionSample>) -> Result<(), TrackError> {
        self.current_position = normalize(Some(sample.into()), "currentPosition")?;
        Ok(())
    }

    pub fn set_end_position(&mut self, sample: impl Into<PositionSample>) -> Result<(), TrackError> {
        self.end_position = normalize(Some(sample.into()), "endPosition")?;
        Ok(())
    }

    /// Commit the duration as `end_time - start_time`.
    ///
    /// `commit == false` does nothing, and in particular never clears a
    /// duration that was already computed.
    pub fn set_duration(&mut self, commit: bool) -> Result<(), TrackError> {
        if !commit {
            return Ok(());
        }
        let start = self
            .start_time
            .ok_or(TrackError::OutOfOrderFinalization { missing: "startTime" })?;
        let end = self
            .end_time
            .ok_or(TrackError::OutOfOrderFinalization { missing: "endTime" })?;
        if end < start {
            return Err(TrackError::EndBeforeStart { start, end });
        }
        self.duration = Some(end - start);
        Ok(())
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    fn set_active(&mut self, active: bool) {
        if active && !self.active && self.track_id.is_none() {
            self.track_id = Some(Uuid::new_v4());
        }
        self.active = active;
    }

    // ========================================
    // Lifecycle helpers
    // ========================================

    /// Start a new track at `sample` and notify observers.
    ///
    /// Leftovers from an earlier, idle track are cleared first. The start
    /// time comes from the sample's timestamp, or now if it has none.
    pub fn begin(
        &mut self,
        name: Option<String>,
        sample: impl Into<PositionSample>,
    ) -> Result<NotifyReport, TrackError> {
        if self.active {
            return Err(TrackError::AlreadyActive);
        }
        let point = sample.into().into_point();
        point.validate("startPosition")?;
        let start_time = sample_time(&point)?;

        self.clear();
        self.set_active(true);
        self.name = name;
        self.date = Some(start_time.date_naive());
        self.start_time = Some(start_time);
        self.start_position = Some(point);
        self.current_position = Some(point);
        self.push_waypoint(point, self.unit);

        tracing::info!(
            "Track {:?} started at {} ({:.6}, {:.6})",
            self.track_id,
            start_time,
            point.latitude,
            point.longitude
        );

        Ok(self.notify()?)
    }

    /// Close the active track at `sample`, commit its duration and notify.
    pub fn finish(&mut self, sample: impl Into<PositionSample>) -> Result<NotifyReport, TrackError> {
        match self.phase() {
            TrackPhase::Idle => return Err(TrackError::NotActive),
            TrackPhase::Finished => return Err(TrackError::AlreadyFinished),
            TrackPhase::Active => {}
        }
        let point = sample.into().into_point();
        point.validate("endPosition")?;
        let end_time = sample_time(&point)?;
        let start = self
            .start_time
            .ok_or(TrackError::OutOfOrderFinalization { missing: "startTime" })?;
        if end_time < start {
            return Err(TrackError::EndBeforeStart { start, end: end_time });
        }

        self.end_time = Some(end_time);
        self.end_position = Some(point);
        self.current_position = Some(point);
        self.push_waypoint(point, self.unit);
        self.set_duration(true)?;

        tracing::info!(
            "Track {:?} finished: {} waypoints, {:.1} {} in {}s",
            self.track_id,
            self.way_points.len(),
            self.total_distance(),
            self.unit,
            self.duration.map(|d| d.num_seconds()).unwrap_or_default()
        );

        Ok(self.notify()?)
    }

    // ========================================
    // Reads
    // ========================================

    pub fn phase(&self) -> TrackPhase {
        match (self.active, self.end_time) {
            (false, _) => TrackPhase::Idle,
            (true, None) => TrackPhase::Active,
            (true, Some(_)) => TrackPhase::Finished,
        }
    }

    /// Sum of all waypoint distances, recomputed on every call
    pub fn total_distance(&self) -> f64 {
        self.way_points.iter().map(|p| p.distance).sum()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Heading between the last two waypoints
    pub fn current_heading(&self) -> Option<f64> {
        match self.way_points.as_slice() {
            [.., previous, last] => Some(heading(previous, last)),
            _ => None,
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.way_points
    }

    /// Per-waypoint distances in insertion order
    pub fn segment_distances(&self) -> &[f64] {
        &self.segment_distances
    }

    /// Owned snapshot of the full state
    pub fn get(&self) -> TrackSnapshot {
        TrackSnapshot {
            track_id: self.track_id,
            active: self.active,
            name: self.name.clone(),
            location: self.location.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            start_position: self.start_position,
            current_position: self.current_position,
            end_position: self.end_position,
            way_points: self.way_points.clone(),
            duration_ms: self.duration.map(|d| d.num_milliseconds()),
            total_distance: self.total_distance(),
            unit: self.unit,
        }
    }

    pub fn summary(&self) -> TrackSummary {
        let duration_ms = self.duration.map(|d| d.num_milliseconds());
        let total_distance = self.total_distance();
        TrackSummary {
            track_id: self.track_id,
            name: self.name.clone(),
            location: self.location.clone(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_ms,
            total_distance,
            unit: self.unit,
            waypoint_count: self.way_points.len(),
            average_speed: TrackSummary::average_speed(total_distance, duration_ms),
        }
    }

    pub fn track_id(&self) -> Option<Uuid> {
        self.track_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn start_position(&self) -> Option<&GeoPoint> {
        self.start_position.as_ref()
    }

    pub fn current_position(&self) -> Option<&GeoPoint> {
        self.current_position.as_ref()
    }

    pub fn end_position(&self) -> Option<&GeoPoint> {
        self.end_position.as_ref()
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

impl Default for TrackState {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(sample: Option<PositionSample>, field: &'static str) -> Result<Option<GeoPoint>, TrackError> {
    match sample {
        Some(sample) => {
            let point = sample.into_point();
            point.validate(field)?;
            Ok(Some(point))
        }
        None => Ok(None),
    }
}

fn sample_time(point: &GeoPoint) -> Result<DateTime<Utc>, TrackError> {
    match point.timestamp {
        Some(ms) => timestamp_to_utc(ms),
        None => Ok(Utc::now()),
    }
}

fn timestamp_to_utc(ms: i64) -> Result<DateTime<Utc>, TrackError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or(TrackError::InvalidTimestamp(ms))
}
