use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_RESOLUTION, REGION_NE_LAT, REGION_NE_LON, REGION_SW_LAT, REGION_SW_LON,
};
use crate::data::coordinate::Coordinate;

/// The axis-aligned region of interest and lattice resolution. Fixed for a
/// given deployment; `Default` carries the Berlin constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub sw_lat: f64,
    pub sw_lon: f64,
    pub ne_lat: f64,
    pub ne_lon: f64,
    pub resolution: usize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            sw_lat: REGION_SW_LAT,
            sw_lon: REGION_SW_LON,
            ne_lat: REGION_NE_LAT,
            ne_lon: REGION_NE_LON,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl RegionConfig {
    pub fn validate(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.sw_lat >= self.ne_lat || self.sw_lon >= self.ne_lon {
            return Err(format!(
                "region corners are not ordered: SW ({}, {}) must lie south-west of NE ({}, {})",
                self.sw_lat, self.sw_lon, self.ne_lat, self.ne_lon
            )
            .into());
        }
        if self.resolution < 2 {
            return Err(format!("lattice resolution must be at least 2, got {}", self.resolution).into());
        }
        Ok(())
    }

    /// South-west corner, used as the origin of the local planar frame.
    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.sw_lat, self.sw_lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.sw_lat + self.ne_lat) / 2.0,
            (self.sw_lon + self.ne_lon) / 2.0,
        )
    }
}
