use clap::Parser;

use crate::config::constants::DEFAULT_HEATMAP_SAMPLES;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, help = "JSON file holding the clue set; defaults to the built-in deployment clues")]
    clue_set: Option<String>,

    #[arg(long, help = "CSV file of lat,lon lines describing the river polyline")]
    river_path: Option<String>,

    #[arg(short = 'n', long, help = "Lattice resolution (cells per axis)")]
    resolution: Option<usize>,

    #[arg(short = 's', long, default_value_t = DEFAULT_HEATMAP_SAMPLES)]
    heatmap_samples: usize,

    #[arg(short = 'o', long, default_value = "output")]
    output_dir: String,

    #[arg(long, help = "Random seed for deterministic heatmap sampling")]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

// Getter methods for all fields
impl Args {
    pub fn clue_set(&self) -> Option<&str> {
        self.clue_set.as_deref()
    }

    pub fn river_path(&self) -> Option<&str> {
        self.river_path.as_deref()
    }

    pub fn resolution(&self) -> Option<usize> {
        self.resolution
    }

    pub fn heatmap_samples(&self) -> usize {
        self.heatmap_samples
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
