//! Observable track aggregate.
//!
//! `TrackState` accumulates waypoints for one walk at a time, annotates each
//! with its distance from the previous waypoint, and pushes snapshots of
//! itself to registered observers when `update` (or a lifecycle helper) runs.

pub mod snapshot;
pub mod state;
pub mod update;

pub use snapshot::*;
pub use state::*;
pub use update::*;
