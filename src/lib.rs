pub mod cli;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod logging;
pub mod observer;
pub mod track;
pub mod types;

// Re-export commonly used types
pub use error::TrackError;
pub use geodesy::{heading, point_distance, Unit};
pub use observer::{NotifyPolicy, NotifyReport, Observer, ObserverError, Subject};
pub use track::{TrackPhase, TrackSnapshot, TrackState, TrackSummary, TrackUpdate};
pub use types::{DeviceCoords, DeviceLocation, GeoPoint, PositionSample};
