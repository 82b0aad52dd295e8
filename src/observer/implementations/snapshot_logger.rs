use crate::observer::error::ObserverError;
use crate::observer::traits::Observer;
use crate::track::TrackSnapshot;

/// Emits one `tracing` debug event per track snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotLogger;

impl Observer<TrackSnapshot> for SnapshotLogger {
    fn name(&self) -> &str {
        "snapshot_logger"
    }

    fn update(&self, snapshot: &TrackSnapshot) -> Result<(), ObserverError> {
        tracing::debug!(
            track_id = ?snapshot.track_id,
            active = snapshot.active,
            waypoints = snapshot.way_points.len(),
            total_distance = snapshot.total_distance,
            unit = %snapshot.unit,
            "track snapshot"
        );
        Ok(())
    }
}
