use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// Mean earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
/// Mean earth radius in kilometers
pub const EARTH_RADIUS_KILOMETERS: f64 = 6_371.0;
/// Mean earth radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3_959.0;

/// Distance unit used for waypoint distances and totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "meters")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "miles")]
    Miles,
}

impl Unit {
    /// Earth radius expressed in this unit
    pub fn earth_radius(&self) -> f64 {
        match self {
            Unit::Meters => EARTH_RADIUS_METERS,
            Unit::Kilometers => EARTH_RADIUS_KILOMETERS,
            Unit::Miles => EARTH_RADIUS_MILES,
        }
    }

    /// Lenient unit selection: unknown or absent selectors fall back to meters.
    ///
    /// An unrecognized selector is logged, never returned as an error.
    pub fn resolve(selector: Option<&str>) -> Self {
        match selector {
            None => Unit::Meters,
            Some(raw) => raw.parse().unwrap_or_else(|e: TrackError| {
                tracing::info!("{}; defaulting to meters", e);
                Unit::Meters
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Meters => "meters",
            Unit::Kilometers => "km",
            Unit::Miles => "miles",
        }
    }
}

/// Strict parsing, case-insensitive
impl FromStr for Unit {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "meters" => Ok(Unit::Meters),
            "km" => Ok(Unit::Kilometers),
            "miles" | "mi" | "imperial" => Ok(Unit::Miles),
            _ => Err(TrackError::UnresolvedUnit(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
