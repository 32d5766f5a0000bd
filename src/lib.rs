// Main module declarations for the geolocation engine

// Core engine modules
pub mod core {
    pub mod lattice;
    pub mod posterior;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod region;
}

// Model definitions
pub mod models {
    pub mod clue;
    pub mod distribution;
}

// Data types and loaders
pub mod data {
    pub mod clue_loader;
    pub mod coordinate;
}

// Analysis on top of the posterior
pub mod analysis {
    pub mod map_estimate;
}

// Utility functions
pub mod utils {
    pub mod csv_export;
    pub mod geodesy;
    pub mod logging;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::analysis::map_estimate::{argmax, argmax_index, sample_indices};
pub use crate::config::region::RegionConfig;
pub use crate::core::lattice::Lattice;
pub use crate::core::posterior::{combine, Posterior};
pub use crate::data::coordinate::Coordinate;
pub use crate::models::clue::{Clue, ClueConfig};
