use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::region::RegionConfig;
use crate::core::lattice::Lattice;
use crate::data::coordinate::Coordinate;
use crate::models::distribution::DistanceDistribution;
use crate::utils::geodesy::{
    cross_track_distance, great_circle_distance, point_to_segment_distance, project_local,
};
use crate::utils::logging::{self, DistanceType, OperationCategory};

/// Static configuration for a single clue, as found in a clue-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClueConfig {
    /// Distance to a fixed landmark, log-normally distributed.
    Landmark { coord: Coordinate, mean: f64, mode: f64 },
    /// Cross-track distance to a great-circle ground track.
    Arc {
        start: Coordinate,
        end: Coordinate,
        confidence_range_km: f64,
    },
    /// Distance to the nearest segment of an ordered polyline.
    Polyline {
        coords: Vec<Coordinate>,
        confidence_range_km: f64,
    },
}

enum ClueShape {
    Landmark {
        coord: Coordinate,
    },
    Arc {
        start: Coordinate,
        end: Coordinate,
    },
    Polyline {
        origin: Coordinate,
        segments: Vec<((f64, f64), (f64, f64))>,
    },
}

/// A constructed clue model: a shape, a distance distribution over proximity
/// to that shape, and a density memo per lattice. Immutable after
/// construction apart from the write-once cache.
pub struct Clue {
    shape: ClueShape,
    distribution: DistanceDistribution,
    density_cache: RwLock<HashMap<u64, Arc<Vec<f64>>>>,
}

impl Clue {
    /// Builds a clue model from its configuration, failing fast on invalid
    /// parameters. Polyline coordinates are projected once into the local
    /// planar frame anchored at the region's south-west corner and chained
    /// into consecutive segments.
    pub fn from_config(
        config: &ClueConfig,
        region: &RegionConfig,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let (shape, distribution) = match config {
            ClueConfig::Landmark { coord, mean, mode } => (
                ClueShape::Landmark { coord: *coord },
                DistanceDistribution::from_mean_mode(*mean, *mode)?,
            ),
            ClueConfig::Arc {
                start,
                end,
                confidence_range_km,
            } => (
                ClueShape::Arc {
                    start: *start,
                    end: *end,
                },
                DistanceDistribution::from_confidence_range(*confidence_range_km)?,
            ),
            ClueConfig::Polyline {
                coords,
                confidence_range_km,
            } => {
                if coords.len() < 2 {
                    return Err(format!(
                        "polyline clue needs at least 2 coordinates, got {}",
                        coords.len()
                    )
                    .into());
                }
                let origin = region.origin();
                let projected: Vec<(f64, f64)> =
                    coords.iter().map(|c| project_local(c, &origin)).collect();
                let segments = projected
                    .windows(2)
                    .map(|pair| (pair[0], pair[1]))
                    .collect();
                (
                    ClueShape::Polyline { origin, segments },
                    DistanceDistribution::from_confidence_range(*confidence_range_km)?,
                )
            }
        };

        Ok(Self {
            shape,
            distribution,
            density_cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn label(&self) -> &'static str {
        match self.shape {
            ClueShape::Landmark { .. } => "landmark",
            ClueShape::Arc { .. } => "arc",
            ClueShape::Polyline { .. } => "polyline",
        }
    }

    /// Non-negative scalar distance in kilometres from `point` to this clue's
    /// shape. Zero-length polyline segments are treated as points.
    pub fn distance_to(&self, point: &Coordinate) -> f64 {
        match &self.shape {
            ClueShape::Landmark { coord } => great_circle_distance(point, coord),
            ClueShape::Arc { start, end } => cross_track_distance(start, end, point).abs(),
            ClueShape::Polyline { origin, segments } => {
                let xy = project_local(point, origin);
                segments
                    .iter()
                    .map(|(a, b)| point_to_segment_distance(xy, *a, *b))
                    .fold(f64::INFINITY, f64::min)
            }
        }
    }

    /// Probability density of finding the candidate at `point`.
    pub fn density(&self, point: &Coordinate) -> f64 {
        self.distribution.pdf(self.distance_to(point))
    }

    /// Density at every lattice cell, index-aligned with the lattice.
    ///
    /// Cells are independent, so evaluation is parallelized across them. The
    /// result is memoized per lattice id: the mapping is deterministic and the
    /// same lattice is reused across the whole run.
    pub fn density_over_lattice(&self, lattice: &Lattice) -> Arc<Vec<f64>> {
        if let Some(cached) = self.density_cache.read().get(&lattice.id()) {
            return Arc::clone(cached);
        }

        let _timing = logging::start_timing(
            "density_over_lattice",
            OperationCategory::DistanceCalculation {
                subcategory: match self.shape {
                    ClueShape::Landmark { .. } => DistanceType::GreatCircle,
                    ClueShape::Arc { .. } => DistanceType::CrossTrack,
                    ClueShape::Polyline { .. } => DistanceType::Segment,
                },
            },
        );

        let densities: Arc<Vec<f64>> = Arc::new(
            lattice
                .coords()
                .par_iter()
                .map(|coord| self.density(coord))
                .collect(),
        );

        debug!(
            clue = self.label(),
            lattice = lattice.id(),
            cells = densities.len(),
            "evaluated clue density over lattice"
        );

        self.density_cache
            .write()
            .entry(lattice.id())
            .or_insert_with(|| Arc::clone(&densities));
        Arc::clone(&densities)
    }
}
