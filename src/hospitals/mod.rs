pub mod types;
pub mod geo;
pub mod overpass;

pub use types::*;
pub use geo::*;
pub use overpass::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Overpass returned error (status {status}): {body}")]
    OverpassError { status: u16, body: String },

    #[error("Malformed Overpass response: {0}")]
    MalformedResponse(String),

    #[error("Coordinate out of range: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
}
