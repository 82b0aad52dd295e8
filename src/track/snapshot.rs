use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geodesy::Unit;
use crate::types::GeoPoint;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Owned copy of the full track state, as delivered to observers and
/// returned by `TrackState::get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSnapshot {
    pub track_id: Option<Uuid>,
    pub active: bool,
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_position: Option<GeoPoint>,
    pub current_position: Option<GeoPoint>,
    pub end_position: Option<GeoPoint>,
    pub way_points: Vec<GeoPoint>,
    pub duration_ms: Option<i64>,
    pub total_distance: f64,
    pub unit: Unit,
}

/// Condensed view of a finished (or in-progress) track for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub track_id: Option<Uuid>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<i64>,
    pub total_distance: f64,
    pub unit: Unit,
    pub waypoint_count: usize,
    /// Distance units per hour; only present once a non-zero duration exists
    pub average_speed: Option<f64>,
}

impl TrackSummary {
    pub(crate) fn average_speed(total_distance: f64, duration_ms: Option<i64>) -> Option<f64> {
        match duration_ms {
            Some(ms) if ms > 0 => Some(total_distance / (ms as f64 / MILLIS_PER_HOUR)),
            _ => None,
        }
    }
}
