use super::types::{Coordinate, Hospital};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Preferred destination in an emergency: the nearest hospital flagged as
/// having emergency services, else the nearest overall. Expects `hospitals`
/// sorted by distance.
pub fn emergency_hospital(hospitals: &[Hospital]) -> Option<&Hospital> {
    hospitals
        .iter()
        .find(|h| h.emergency)
        .or_else(|| hospitals.first())
}

/// Driving directions link for a hospital.
pub fn directions_url(hospital: &Hospital) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&travelmode=driving",
        hospital.location.lat, hospital.location.lon
    )
}
