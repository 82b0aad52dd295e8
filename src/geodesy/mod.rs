//! Great-circle geometry between position samples.
//!
//! Pure functions only: no state, no I/O. Inputs are not validated here;
//! non-finite coordinates propagate into the result as NaN. Validation
//! happens where points enter a track (see `GeoPoint::validate`).

pub mod haversine;
pub mod unit;

pub use haversine::*;
pub use unit::*;
