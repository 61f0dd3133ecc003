use serde::{Deserialize, Serialize};

use super::HospitalError;

/// WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Checked constructor: latitude within ±90, longitude within ±180.
    pub fn new(lat: f64, lon: f64) -> Result<Self, HospitalError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if !valid {
            return Err(HospitalError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// A hospital near the user, with distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub emergency: bool,
    pub distance_km: f64,
    pub location: Coordinate,
}

/// Source of hospitals around a coordinate (allows mocking).
pub trait HospitalSource {
    fn nearby_hospitals(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Hospital>, HospitalError>;
}
