// Ready-made observers

pub mod fn_observer;
pub mod snapshot_logger;

pub use fn_observer::FnObserver;
pub use snapshot_logger::SnapshotLogger;
