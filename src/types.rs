//! Shared position types used across the codebase

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// A single position sample, reduced to the attributes the track core needs.
///
/// `distance` is the great-circle distance from the previous waypoint in the
/// owning sequence. It is filled in by the track state when the point is
/// accepted as a waypoint and is `0.0` everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub distance: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: None,
            distance: 0.0,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Reject non-finite or out-of-range coordinates.
    ///
    /// `field` names the slot the point was headed for (`"waypoint"`,
    /// `"startPosition"`, ...) so the error tells the caller which input was bad.
    pub fn validate(&self, field: &'static str) -> Result<(), TrackError> {
        check_axis(field, "latitude", self.latitude, 90.0)?;
        check_axis(field, "longitude", self.longitude, 180.0)?;
        Ok(())
    }
}

fn check_axis(field: &'static str, axis: &'static str, value: f64, limit: f64) -> Result<(), TrackError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(TrackError::InvalidCoordinate { field, axis, value });
    }
    Ok(())
}

/// Coordinates block of a device location fix, as reported by browser and
/// mobile geolocation APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCoords {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub altitude_accuracy: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Full device location fix: coordinates plus the time it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceLocation {
    pub coords: DeviceCoords,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl From<DeviceLocation> for GeoPoint {
    fn from(location: DeviceLocation) -> Self {
        Self {
            latitude: location.coords.latitude,
            longitude: location.coords.longitude,
            accuracy: Some(location.coords.accuracy),
            timestamp: Some(location.timestamp),
            distance: 0.0,
        }
    }
}

/// Anything the track state accepts as a position: either an already reduced
/// point or a raw device fix that still carries vendor fields.
///
/// Deserializes untagged, so JSON input may mix both shapes freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionSample {
    Device(DeviceLocation),
    Point(GeoPoint),
}

impl PositionSample {
    /// Reduce to a `GeoPoint`. Plain points pass through unchanged.
    pub fn into_point(self) -> GeoPoint {
        match self {
            PositionSample::Device(location) => location.into(),
            PositionSample::Point(point) => point,
        }
    }

    pub fn timestamp(&self) -> Option<i64> {
        match self {
            PositionSample::Device(location) => Some(location.timestamp),
            PositionSample::Point(point) => point.timestamp,
        }
    }
}

/// Parse a JSON array of position samples, raw or device-shaped
pub fn parse_samples(json: &str) -> Result<Vec<PositionSample>, TrackError> {
    Ok(serde_json::from_str(json)?)
}

impl From<GeoPoint> for PositionSample {
    fn from(point: GeoPoint) -> Self {
        PositionSample::Point(point)
    }
}

impl From<DeviceLocation> for PositionSample {
    fn from(location: DeviceLocation) -> Self {
        PositionSample::Device(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device_fix() -> DeviceLocation {
        DeviceLocation {
            coords: DeviceCoords {
                latitude: 42.5907,
                longitude: -88.4427,
                accuracy: 12.5,
                altitude: Some(260.0),
                altitude_accuracy: Some(3.0),
                heading: None,
                speed: Some(1.4),
            },
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_device_location_reduces_to_point() {
        let point = PositionSample::from(device_fix()).into_point();
        assert_eq!(point.latitude, 42.5907);
        assert_eq!(point.longitude, -88.4427);
        assert_eq!(point.accuracy, Some(12.5));
        assert_eq!(point.timestamp, Some(1_700_000_000_000));
        assert_eq!(point.distance, 0.0);
    }

    #[test]
    fn test_plain_point_passes_through() {
        let original = GeoPoint::new(1.0, 2.0).with_accuracy(4.0);
        let point = PositionSample::from(original).into_point();
        assert_eq!(point, original);
    }

    #[test]
    fn test_untagged_json_accepts_both_shapes() {
        let samples: Vec<PositionSample> = serde_json::from_value(json!([
            { "latitude": 1.0, "longitude": 2.0 },
            { "coords": { "latitude": 3.0, "longitude": 4.0, "accuracy": 5.0 }, "timestamp": 10 }
        ]))
        .unwrap();

        assert!(matches!(samples[0], PositionSample::Point(_)));
        assert!(matches!(samples[1], PositionSample::Device(_)));
        assert_eq!(samples[1].timestamp(), Some(10));
    }

    #[test]
    fn test_parse_samples_reports_bad_json() {
        assert!(matches!(parse_samples("[{\"latitude\": 1.0}]"), Err(TrackError::Json(_))));
        assert_eq!(parse_samples("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_and_nan() {
        assert!(GeoPoint::new(90.0, -180.0).validate("waypoint").is_ok());

        let err = GeoPoint::new(91.0, 0.0).validate("waypoint").unwrap_err();
        assert!(matches!(err, TrackError::InvalidCoordinate { axis: "latitude", .. }));

        let err = GeoPoint::new(0.0, f64::NAN).validate("startPosition").unwrap_err();
        assert!(matches!(
            err,
            TrackError::InvalidCoordinate { field: "startPosition", axis: "longitude", .. }
        ));
    }
}
