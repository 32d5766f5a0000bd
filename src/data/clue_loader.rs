use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::data::coordinate::Coordinate;
use crate::models::clue::ClueConfig;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Loads an ordered polyline from a headerless CSV of `lat,lon` lines, such
/// as a river path export.
pub fn load_polyline(path: &Path) -> Result<Vec<Coordinate>> {
    let _timing = logging::start_timing(
        "load_polyline",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad },
    );

    let file = File::open(path).with_context(|| format!("opening polyline file {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut coords = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading line {} of {}", line + 1, path.display()))?;
        ensure!(
            record.len() == 2,
            "line {} of {} has {} fields, expected lat,lon",
            line + 1,
            path.display(),
            record.len()
        );
        let lat: f64 = record[0]
            .parse()
            .with_context(|| format!("parsing latitude on line {} of {}", line + 1, path.display()))?;
        let lon: f64 = record[1]
            .parse()
            .with_context(|| format!("parsing longitude on line {} of {}", line + 1, path.display()))?;
        coords.push(Coordinate::new(lat, lon));
    }

    ensure!(
        coords.len() >= 2,
        "polyline file {} has {} coordinates, need at least 2",
        path.display(),
        coords.len()
    );
    Ok(coords)
}

/// Loads a clue set from a JSON file holding a `Vec<ClueConfig>`.
pub fn load_clue_set(path: &Path) -> Result<Vec<ClueConfig>> {
    let _timing = logging::start_timing(
        "load_clue_set",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad },
    );

    let file = File::open(path).with_context(|| format!("opening clue set {}", path.display()))?;
    let reader = BufReader::new(file);
    let clues: Vec<ClueConfig> =
        serde_json::from_reader(reader).with_context(|| format!("parsing clue set {}", path.display()))?;
    ensure!(!clues.is_empty(), "clue set {} is empty", path.display());
    Ok(clues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_lat_lon_polyline() {
        let path = temp_file(
            "whereabouts_polyline_ok.csv",
            "52.529198,13.274099\n52.531835,13.29234\n52.522116,13.298541\n",
        );
        let coords = load_polyline(&path).unwrap();
        assert_eq!(coords.len(), 3);
        assert!((coords[0].lat - 52.529198).abs() < 1e-12);
        assert!((coords[2].lon - 13.298541).abs() < 1e-12);
    }

    #[test]
    fn rejects_a_single_point_polyline() {
        let path = temp_file("whereabouts_polyline_short.csv", "52.5,13.4\n");
        assert!(load_polyline(&path).is_err());
    }

    #[test]
    fn rejects_malformed_lines() {
        let path = temp_file("whereabouts_polyline_bad.csv", "52.5,13.4\nnot-a-number,13.5\n");
        assert!(load_polyline(&path).is_err());
    }

    #[test]
    fn loads_a_json_clue_set() {
        let path = temp_file(
            "whereabouts_clues.json",
            r#"[
                {"kind": "landmark", "coord": {"lat": 52.516288, "lon": 13.377689}, "mean": 4.7, "mode": 3.877},
                {"kind": "arc", "start": {"lat": 52.590117, "lon": 13.39915},
                 "end": {"lat": 52.437385, "lon": 13.553989}, "confidence_range_km": 2.4}
            ]"#,
        );
        let clues = load_clue_set(&path).unwrap();
        assert_eq!(clues.len(), 2);
        assert!(matches!(clues[0], ClueConfig::Landmark { .. }));
        assert!(matches!(clues[1], ClueConfig::Arc { .. }));
    }
}
