use serde::{Deserialize, Serialize};

/// A WGS84-like (latitude, longitude) pair in degrees. No datum correction is
/// applied; out-of-range values are not validated in this version.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
