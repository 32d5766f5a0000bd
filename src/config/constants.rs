// Geodesy Constants
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_PER_DEGREE: f64 = 111.323;          // Kilometres per degree of latitude
pub const CONFIDENCE_DIVISOR: f64 = 1.96;        // 95% confidence half-width -> std deviation

// Region of Interest (Berlin deployment)
pub const REGION_SW_LAT: f64 = 52.464011;
pub const REGION_SW_LON: f64 = 13.274099;
pub const REGION_NE_LAT: f64 = 52.586925;
pub const REGION_NE_LON: f64 = 13.521837;
pub const DEFAULT_RESOLUTION: usize = 256;       // Lattice is resolution x resolution cells

// Default Clue Parameters
pub const LANDMARK_LAT: f64 = 52.516288;         // Brandenburg Gate
pub const LANDMARK_LON: f64 = 13.377689;
pub const LANDMARK_MEAN: f64 = 4.7;              // Log-normal mean of ln(distance in km)
pub const LANDMARK_MODE: f64 = 3.877;            // Log-normal mode in km

pub const SATELLITE_START_LAT: f64 = 52.590117;
pub const SATELLITE_START_LON: f64 = 13.39915;
pub const SATELLITE_END_LAT: f64 = 52.437385;
pub const SATELLITE_END_LON: f64 = 13.553989;
pub const SATELLITE_CONFIDENCE_KM: f64 = 2.4;    // 95% of candidates within this cross-track range

pub const RIVER_CONFIDENCE_KM: f64 = 2.73;       // 95% of candidates within this range of the river

// Sampling Defaults
pub const DEFAULT_HEATMAP_SAMPLES: usize = 20_000;
