use std::error::Error;
use std::path::Path;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use whereabouts::analysis::map_estimate::{argmax_index, sample_indices};
use whereabouts::cli::cli::Args;
use whereabouts::config::constants::{
    LANDMARK_LAT, LANDMARK_LON, LANDMARK_MEAN, LANDMARK_MODE, RIVER_CONFIDENCE_KM,
    SATELLITE_CONFIDENCE_KM, SATELLITE_END_LAT, SATELLITE_END_LON, SATELLITE_START_LAT,
    SATELLITE_START_LON,
};
use whereabouts::config::region::RegionConfig;
use whereabouts::core::lattice::Lattice;
use whereabouts::core::posterior::combine;
use whereabouts::data::clue_loader;
use whereabouts::data::coordinate::Coordinate;
use whereabouts::models::clue::{Clue, ClueConfig};
use whereabouts::utils::csv_export::CsvExporter;
use whereabouts::utils::logging;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    println!("whereabouts - probabilistic geolocation");
    println!(
        "Debug logging: {}, timing: {}",
        if args.debug_logging() { "enabled" } else { "disabled" },
        if args.enable_timing() { "enabled" } else { "disabled" }
    );

    let mut region = RegionConfig::default();
    if let Some(n) = args.resolution() {
        region.resolution = n;
    }
    region.validate()?;

    let configs = build_clue_configs(&args)?;
    println!("Generating clue models..");
    let clues = configs
        .iter()
        .map(|config| Clue::from_config(config, &region))
        .collect::<Result<Vec<_>, _>>()?;

    let lattice = Lattice::build(&region)?;
    info!(
        resolution = region.resolution,
        cells = lattice.len(),
        clues = clues.len(),
        "lattice built"
    );

    // Evaluate every clue eagerly so the combination step hits warm caches.
    let progress = ProgressBar::new(clues.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    for clue in &clues {
        progress.set_message(format!("Evaluating {} clue", clue.label()));
        clue.density_over_lattice(&lattice);
        progress.inc(1);
    }
    progress.finish_with_message("Clue densities evaluated");

    println!("Combining clues into the posterior..");
    let posterior = combine(&lattice, &clues)?;
    let map_index = argmax_index(&posterior);
    let map_estimate = *lattice.coord(map_index);
    let map_mass = posterior.mass()[map_index];

    println!(
        "Most likely location: ({:.6}, {:.6}) with posterior mass {:.3e}",
        map_estimate.lat, map_estimate.lon, map_mass
    );

    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let samples = sample_indices(&posterior, args.heatmap_samples(), &mut rng)?;

    let exporter = CsvExporter::new(args.output_dir()).map_err(|e| e.to_string())?;
    let labels: Vec<&str> = clues.iter().map(|c| c.label()).collect();
    exporter
        .export_posterior(&lattice, &posterior)
        .map_err(|e| e.to_string())?;
    exporter
        .export_summary(&map_estimate, map_mass, &labels)
        .map_err(|e| e.to_string())?;
    exporter.export_samples(&samples).map_err(|e| e.to_string())?;
    println!("Results written to {}", exporter.run_dir().display());

    logging::print_timing_report();

    Ok(())
}

/// Assembles the clue set: the configured JSON file or the built-in
/// deployment clues, plus a river polyline clue when a river CSV is given.
fn build_clue_configs(args: &Args) -> Result<Vec<ClueConfig>, Box<dyn Error + Send + Sync>> {
    let mut configs = match args.clue_set() {
        Some(path) => clue_loader::load_clue_set(Path::new(path)).map_err(|e| e.to_string())?,
        None => vec![
            ClueConfig::Landmark {
                coord: Coordinate::new(LANDMARK_LAT, LANDMARK_LON),
                mean: LANDMARK_MEAN,
                mode: LANDMARK_MODE,
            },
            ClueConfig::Arc {
                start: Coordinate::new(SATELLITE_START_LAT, SATELLITE_START_LON),
                end: Coordinate::new(SATELLITE_END_LAT, SATELLITE_END_LON),
                confidence_range_km: SATELLITE_CONFIDENCE_KM,
            },
        ],
    };

    if let Some(path) = args.river_path() {
        let coords = clue_loader::load_polyline(Path::new(path)).map_err(|e| e.to_string())?;
        configs.push(ClueConfig::Polyline {
            coords,
            confidence_range_km: RIVER_CONFIDENCE_KM,
        });
    }

    Ok(configs)
}
