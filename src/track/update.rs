use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::PositionSample;

/// Partial set of top-level track fields for `TrackState::update`.
///
/// `None` means "leave as is"; a field is never cleared through an update.
/// Positions are normalized and validated when applied, scalars are not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackUpdate {
    pub active: Option<bool>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_position: Option<PositionSample>,
    pub current_position: Option<PositionSample>,
    pub end_position: Option<PositionSample>,
}

impl TrackUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_start_time(mut self, time: DateTime<Utc>) -> Self {
        self.start_time = Some(time);
        self
    }

    pub fn with_end_time(mut self, time: DateTime<Utc>) -> Self {
        self.end_time = Some(time);
        self
    }

    pub fn with_start_position(mut self, sample: impl Into<PositionSample>) -> Self {
        self.start_position = Some(sample.into());
        self
    }

    pub fn with_current_position(mut self, sample: impl Into<PositionSample>) -> Self {
        self.current_position = Some(sample.into());
        self
    }

    pub fn with_end_position(mut self, sample: impl Into<PositionSample>) -> Self {
        self.end_position = Some(sample.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
