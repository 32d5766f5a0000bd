use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::region::RegionConfig;
use crate::data::coordinate::Coordinate;

static NEXT_LATTICE_ID: AtomicU64 = AtomicU64::new(0);

/// A flattened `n x n` grid of candidate coordinates spanning the region of
/// interest linearly in each axis. Row-major: the outer index walks latitude
/// rows south to north, the inner index walks longitude west to east.
///
/// Index `i` refers to the same coordinate in every per-clue density vector
/// and in the combined posterior. Each lattice carries a process-unique `id`
/// used by clue models to key their density caches.
#[derive(Debug, Clone)]
pub struct Lattice {
    id: u64,
    resolution: usize,
    coords: Vec<Coordinate>,
}

impl Lattice {
    /// Builds the lattice for a region, subdividing each axis into
    /// `resolution` linear steps (endpoints included).
    pub fn build(region: &RegionConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        region.validate()?;

        let n = region.resolution;
        let lats = linspace(region.sw_lat, region.ne_lat, n);
        let lons = linspace(region.sw_lon, region.ne_lon, n);

        let mut coords = Vec::with_capacity(n * n);
        for lat in &lats {
            for lon in &lons {
                coords.push(Coordinate::new(*lat, *lon));
            }
        }

        Ok(Self {
            id: NEXT_LATTICE_ID.fetch_add(1, Ordering::Relaxed),
            resolution: n,
            coords,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn coord(&self, index: usize) -> &Coordinate {
        &self.coords[index]
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_region(n: usize) -> RegionConfig {
        RegionConfig {
            sw_lat: 52.0,
            sw_lon: 13.0,
            ne_lat: 53.0,
            ne_lon: 14.0,
            resolution: n,
        }
    }

    #[test]
    fn lattice_has_n_squared_cells() {
        let lattice = Lattice::build(&toy_region(4)).unwrap();
        assert_eq!(lattice.len(), 16);
        assert_eq!(lattice.resolution(), 4);
    }

    #[test]
    fn corners_match_the_region() {
        let lattice = Lattice::build(&toy_region(4)).unwrap();
        let first = lattice.coord(0);
        let last = lattice.coord(15);
        assert_eq!((first.lat, first.lon), (52.0, 13.0));
        assert!((last.lat - 53.0).abs() < 1e-12);
        assert!((last.lon - 14.0).abs() < 1e-12);
    }

    #[test]
    fn rows_are_constant_latitude() {
        let lattice = Lattice::build(&toy_region(4)).unwrap();
        for row in 0..4 {
            let lat = lattice.coord(row * 4).lat;
            for col in 1..4 {
                assert_eq!(lattice.coord(row * 4 + col).lat, lat);
            }
        }
    }

    #[test]
    fn each_lattice_gets_a_distinct_id() {
        let a = Lattice::build(&toy_region(4)).unwrap();
        let b = Lattice::build(&toy_region(4)).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn degenerate_region_is_rejected() {
        let mut region = toy_region(4);
        region.ne_lat = region.sw_lat;
        assert!(Lattice::build(&region).is_err());
    }
}
