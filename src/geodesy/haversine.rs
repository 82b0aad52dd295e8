use crate::geodesy::unit::Unit;
use crate::types::GeoPoint;

/// Great-circle distance between two points using the haversine formula.
///
/// Returns `0.0` for identical points and is symmetric in its arguments.
pub fn point_distance(p1: &GeoPoint, p2: &GeoPoint, unit: Unit) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let delta_lat = (p2.latitude - p1.latitude).to_radians();
    let delta_lon = (p2.longitude - p1.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    unit.earth_radius() * c
}

/// Bearing from `p1` toward `p2` in degrees, rounded to one decimal.
///
/// The longitude delta is `||lon2| - |lon1||`, not the signed `lon2 - lon1`.
/// Recorded tracks depend on this exact output, so it is kept as is; results
/// are wrong for pairs that straddle the equator or the prime meridian.
pub fn heading(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let delta_lon = (p2.longitude.abs() - p1.longitude.abs()).abs().to_radians();
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();

    let x = lat2.cos() * delta_lon.sin();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    round_tenth(x.atan2(y).to_degrees())
}

// Half-way cases round toward positive infinity.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
