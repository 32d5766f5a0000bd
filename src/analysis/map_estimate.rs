use std::error::Error;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::core::lattice::Lattice;
use crate::core::posterior::Posterior;
use crate::data::coordinate::Coordinate;
use crate::utils::logging::{self, OperationCategory};

/// Index of the cell carrying the highest posterior mass. Ties are broken by
/// first occurrence in lattice order.
pub fn argmax_index(posterior: &Posterior) -> usize {
    let mut best_index = 0;
    let mut best_mass = f64::NEG_INFINITY;
    for (index, mass) in posterior.mass().iter().enumerate() {
        if *mass > best_mass {
            best_mass = *mass;
            best_index = index;
        }
    }
    best_index
}

/// The maximum-a-posteriori coordinate: the lattice cell carrying the highest
/// posterior mass.
pub fn argmax(posterior: &Posterior, lattice: &Lattice) -> Coordinate {
    *lattice.coord(argmax_index(posterior))
}

/// Draws `count` lattice indices with replacement, each index weighted by its
/// posterior mass. Consumed by the external heatmap renderer.
pub fn sample_indices<R: Rng>(
    posterior: &Posterior,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, Box<dyn Error + Send + Sync>> {
    let _timing = logging::start_timing("sample_indices", OperationCategory::Sampling);

    if count == 0 {
        return Ok(Vec::new());
    }

    let weights = WeightedIndex::new(posterior.mass())
        .map_err(|e| format!("posterior is not a valid sampling weight vector: {}", e))?;

    Ok((0..count).map(|_| weights.sample(rng)).collect())
}
