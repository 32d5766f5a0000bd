use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::core::lattice::Lattice;
use crate::core::posterior::Posterior;
use crate::data::coordinate::Coordinate;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Writes run outputs into a timestamped subdirectory of the output dir, one
/// directory per run.
pub struct CsvExporter {
    run_dir: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, Box<dyn Error>> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let run_dir = Path::new(output_dir.as_ref()).join(timestamp);
        fs::create_dir_all(&run_dir)?;
        Ok(Self { run_dir })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Full posterior grid as `lat,lon,mass` rows, index-aligned with the
    /// lattice.
    pub fn export_posterior(
        &self,
        lattice: &Lattice,
        posterior: &Posterior,
    ) -> Result<PathBuf, Box<dyn Error>> {
        let _timing = logging::start_timing(
            "export_posterior",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave },
        );

        let path = self.run_dir.join("posterior.csv");
        let mut file = File::create(&path)?;
        writeln!(file, "lat,lon,mass")?;
        for (coord, mass) in lattice.coords().iter().zip(posterior.mass()) {
            writeln!(file, "{},{},{:e}", coord.lat, coord.lon, mass)?;
        }
        Ok(path)
    }

    /// One-line summary with the MAP estimate and its posterior mass.
    pub fn export_summary(
        &self,
        map_estimate: &Coordinate,
        map_mass: f64,
        clue_labels: &[&str],
    ) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.run_dir.join("summary.csv");
        let mut file = File::create(&path)?;
        writeln!(file, "map_lat,map_lon,map_mass,clues")?;
        writeln!(
            file,
            "{},{},{:e},{}",
            map_estimate.lat,
            map_estimate.lon,
            map_mass,
            clue_labels.join(";")
        )?;
        Ok(path)
    }

    /// Sampled heatmap indices, one per line, for the external renderer.
    pub fn export_samples(&self, indices: &[usize]) -> Result<PathBuf, Box<dyn Error>> {
        let _timing = logging::start_timing(
            "export_samples",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave },
        );

        let path = self.run_dir.join("heatmap_samples.csv");
        let mut file = File::create(&path)?;
        writeln!(file, "index")?;
        for index in indices {
            writeln!(file, "{}", index)?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::region::RegionConfig;
    use crate::core::posterior::combine;

    #[test]
    fn exports_posterior_rows_for_every_cell() {
        let region = RegionConfig {
            sw_lat: 52.0,
            sw_lon: 13.0,
            ne_lat: 53.0,
            ne_lon: 14.0,
            resolution: 4,
        };
        let lattice = Lattice::build(&region).unwrap();
        let posterior = combine(&lattice, &[]).unwrap();

        let exporter = CsvExporter::new(std::env::temp_dir().join("whereabouts_export_test")).unwrap();
        let path = exporter.export_posterior(&lattice, &posterior).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        // Header plus one row per lattice cell.
        assert_eq!(contents.lines().count(), 1 + lattice.len());
        assert!(contents.starts_with("lat,lon,mass"));
    }
}
