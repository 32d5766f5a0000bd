use std::error::Error;

use rayon::prelude::*;
use tracing::debug;

use crate::core::lattice::Lattice;
use crate::models::clue::Clue;
use crate::utils::logging::{self, OperationCategory};

/// A normalized probability mass over a lattice: `n x n` non-negative reals
/// summing to 1, index-aligned with the lattice it was combined over.
#[derive(Debug, Clone)]
pub struct Posterior {
    mass: Vec<f64>,
}

impl Posterior {
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }
}

/// Combines the selected clues into a posterior over the lattice by
/// sequential Bayesian updating: a uniform prior of `1/n^2` per cell is
/// multiplied by each clue's density at that cell, then renormalized once at
/// the end. Clue order does not affect the result beyond floating-point
/// rounding.
///
/// Multiplication stays in the linear domain, so the running product can
/// underflow for many clues or very peaked distributions. A zero or
/// non-finite total at renormalization is reported as an error rather than
/// producing a NaN-filled posterior.
pub fn combine(lattice: &Lattice, clues: &[Clue]) -> Result<Posterior, Box<dyn Error + Send + Sync>> {
    let _timing = logging::start_timing("combine", OperationCategory::PosteriorUpdate);

    let cells = lattice.len();
    let mut mass = vec![1.0 / cells as f64; cells];

    for clue in clues {
        let densities = clue.density_over_lattice(lattice);
        mass.par_iter_mut()
            .zip(densities.par_iter())
            .for_each(|(m, d)| *m *= d);
        debug!(clue = clue.label(), "applied clue likelihood");
    }

    let total: f64 = mass.par_iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(format!(
            "posterior mass is degenerate (total = {}); the combined clue densities \
             vanish everywhere on the lattice",
            total
        )
        .into());
    }

    mass.par_iter_mut().for_each(|m| *m /= total);

    Ok(Posterior { mass })
}
