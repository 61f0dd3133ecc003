use std::collections::HashMap;

use serde::Deserialize;

use super::geo::haversine_km;
use super::types::{Coordinate, Hospital, HospitalSource};
use super::HospitalError;

pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Search radius used by the hospital finder, in metres.
pub const DEFAULT_RADIUS_M: u32 = 10_000;

/// Hospitals returned per search, nearest first.
pub const MAX_HOSPITALS: usize = 10;

const OVERPASS_TIMEOUT_SECS: u64 = 25;
const ADDRESS_UNAVAILABLE: &str = "Address not available";

/// Overpass QL for hospital nodes, ways, and relations within `radius_m`.
pub fn build_overpass_query(origin: Coordinate, radius_m: u32) -> String {
    let around = format!("around:{radius_m},{},{}", origin.lat, origin.lon);
    format!(
        "[out:json][timeout:{OVERPASS_TIMEOUT_SECS}];\n\
         (\n  \
         node[\"amenity\"=\"hospital\"]({around});\n  \
         way[\"amenity\"=\"hospital\"]({around});\n  \
         relation[\"amenity\"=\"hospital\"]({around});\n\
         );\n\
         out center meta;\n"
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    /// Nodes carry their own coordinate; ways and relations carry a center.
    fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Coordinate { lat, lon }),
            (_, _, Some(c)) => Some(Coordinate { lat: c.lat, lon: c.lon }),
            _ => None,
        }
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn into_hospital(self, origin: Coordinate) -> Option<Hospital> {
        let location = self.coordinate()?;
        let name = self.tag("name")?.to_string();
        Some(Hospital {
            id: self.id.to_string(),
            address: format_address(&self.tags),
            phone: self.tag("phone").map(str::to_string),
            emergency: self.tag("emergency") == Some("yes") || self.tag("emergency:phone").is_some(),
            distance_km: haversine_km(origin, location),
            name,
            location,
        })
    }
}

/// Street, city, state when present; else a free-form `address` tag.
fn format_address(tags: &HashMap<String, String>) -> String {
    let parts: Vec<&str> = ["addr:street", "addr:city", "addr:state"]
        .iter()
        .filter_map(|key| tags.get(*key).map(|v| v.trim()))
        .filter(|v| !v.is_empty())
        .collect();

    if !parts.is_empty() {
        return parts.join(", ");
    }
    tags.get("address")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(ADDRESS_UNAVAILABLE)
        .to_string()
}

/// Parse an Overpass JSON body into hospitals sorted by distance from
/// `origin`, keeping the nearest `MAX_HOSPITALS`. Unnamed or unlocated
/// elements are skipped.
pub fn parse_overpass_response(
    body: &str,
    origin: Coordinate,
) -> Result<Vec<Hospital>, HospitalError> {
    let parsed: OverpassResponse =
        serde_json::from_str(body).map_err(|e| HospitalError::MalformedResponse(e.to_string()))?;

    let total = parsed.elements.len();
    let mut hospitals: Vec<Hospital> = parsed
        .elements
        .into_iter()
        .filter_map(|el| el.into_hospital(origin))
        .collect();

    hospitals.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    hospitals.truncate(MAX_HOSPITALS);

    tracing::debug!(
        elements = total,
        kept = hospitals.len(),
        "Parsed Overpass hospital response"
    );

    Ok(hospitals)
}

/// Overpass API client.
pub struct OverpassClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, HospitalError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HospitalError::HttpClient(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    /// Public Overpass endpoint with a timeout slightly above the query's own.
    pub fn public() -> Result<Self, HospitalError> {
        Self::new(OVERPASS_URL, OVERPASS_TIMEOUT_SECS + 5)
    }
}

impl HospitalSource for OverpassClient {
    fn nearby_hospitals(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Hospital>, HospitalError> {
        let query = build_overpass_query(origin, radius_m);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .map_err(|e| HospitalError::HttpClient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(HospitalError::OverpassError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|e| HospitalError::HttpClient(e.to_string()))?;
        parse_overpass_response(&body, origin)
    }
}
