use crate::config::constants::{EARTH_RADIUS_KM, KM_PER_DEGREE};
use crate::data::coordinate::Coordinate;

/// Great-circle distance in kilometres between two coordinates (haversine,
/// spherical Earth of radius 6371 km).
pub fn great_circle_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Initial compass bearing in degrees [0, 360) of the great-circle path from
/// `start` to `end`.
pub fn bearing(start: &Coordinate, end: &Coordinate) -> f64 {
    let lat_s = start.lat.to_radians();
    let lat_e = end.lat.to_radians();
    let delta_lon = (end.lon - start.lon).to_radians();

    let br = (delta_lon.sin() * lat_e.cos())
        .atan2(lat_s.cos() * lat_e.sin() - lat_s.sin() * lat_e.cos() * delta_lon.cos());

    br.to_degrees().rem_euclid(360.0)
}

/// Signed cross-track distance in kilometres from `point` to the great-circle
/// path through `path_start` -> `path_end`. The sign indicates the side of the
/// path; callers interested only in proximity take the absolute value.
pub fn cross_track_distance(path_start: &Coordinate, path_end: &Coordinate, point: &Coordinate) -> f64 {
    let delta_13 = great_circle_distance(path_start, point) / EARTH_RADIUS_KM;
    let theta_13 = bearing(path_start, point);
    let theta_12 = bearing(path_start, path_end);

    (delta_13.sin() * (theta_13 - theta_12).to_radians().sin()).asin() * EARTH_RADIUS_KM
}

/// Projects a coordinate into a local planar (x_km, y_km) frame anchored at
/// `origin`, using an equirectangular approximation. Only valid near the
/// origin; the region of interest is small enough for this to hold.
pub fn project_local(coord: &Coordinate, origin: &Coordinate) -> (f64, f64) {
    let x = (coord.lon - origin.lon) * (origin.lat.to_radians()).cos() * KM_PER_DEGREE;
    let y = (coord.lat - origin.lat) * KM_PER_DEGREE;
    (x, y)
}

/// Distance in the local planar frame from `point` to the segment
/// `start`-`end`. The projection parameter is clamped to [0, 1] so the nearest
/// point always lies on the segment. A zero-length segment is treated as a
/// point: the distance to its start is returned.
pub fn point_to_segment_distance(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    let line_x = end.0 - start.0;
    let line_y = end.1 - start.1;
    let length_sq = line_x * line_x + line_y * line_y;

    let u = if length_sq > 0.0 {
        (((point.0 - start.0) * line_x + (point.1 - start.1) * line_y) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let dx = start.0 + u * line_x - point.0;
    let dy = start.1 + u * line_y - point.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERLIN: Coordinate = Coordinate { lat: 52.52, lon: 13.405 };
    const MUNICH: Coordinate = Coordinate { lat: 48.1374, lon: 11.5755 };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(great_circle_distance(&BERLIN, &BERLIN), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = great_circle_distance(&BERLIN, &MUNICH);
        let ba = great_circle_distance(&MUNICH, &BERLIN);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn berlin_munich_distance_is_plausible() {
        let d = great_circle_distance(&BERLIN, &MUNICH);
        assert!((d - 504.0).abs() < 5.0, "got {} km", d);
    }

    #[test]
    fn bearing_due_north_is_zero() {
        let a = Coordinate::new(52.0, 13.0);
        let b = Coordinate::new(53.0, 13.0);
        assert!(bearing(&a, &b).abs() < 1e-9);
    }

    #[test]
    fn bearing_due_south_is_half_turn() {
        let a = Coordinate::new(53.0, 13.0);
        let b = Coordinate::new(52.0, 13.0);
        assert!((bearing(&a, &b) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_stays_in_range() {
        let a = Coordinate::new(52.0, 13.0);
        let b = Coordinate::new(52.0, 12.0);
        let br = bearing(&a, &b);
        assert!((0.0..360.0).contains(&br));
        assert!((br - 270.0).abs() < 1.0);
    }

    #[test]
    fn cross_track_is_zero_at_path_endpoints() {
        let start = Coordinate::new(52.590117, 13.39915);
        let end = Coordinate::new(52.437385, 13.553989);
        assert!(cross_track_distance(&start, &end, &start).abs() < 1e-9);
        assert!(cross_track_distance(&start, &end, &end).abs() < 1e-6);
    }

    #[test]
    fn cross_track_sign_flips_with_side() {
        let start = Coordinate::new(52.0, 13.0);
        let end = Coordinate::new(52.0, 14.0);
        let north = Coordinate::new(52.1, 13.5);
        let south = Coordinate::new(51.9, 13.5);
        let dn = cross_track_distance(&start, &end, &north);
        let ds = cross_track_distance(&start, &end, &south);
        assert!(dn * ds < 0.0, "expected opposite signs, got {} and {}", dn, ds);
    }

    #[test]
    fn projection_of_origin_is_origin() {
        let origin = Coordinate::new(52.464011, 13.274099);
        let (x, y) = project_local(&origin, &origin);
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn projection_one_degree_north_is_km_per_degree() {
        let origin = Coordinate::new(52.0, 13.0);
        let (x, y) = project_local(&Coordinate::new(53.0, 13.0), &origin);
        assert!(x.abs() < 1e-9);
        assert!((y - KM_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_perpendicular_case() {
        let d = point_to_segment_distance((0.5, 1.0), (0.0, 0.0), (1.0, 0.0));
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_clamps_past_endpoint() {
        // Perpendicular foot falls beyond the end of the segment; the distance
        // must be measured to the endpoint, not the infinite line.
        let d = point_to_segment_distance((2.0, 1.0), (0.0, 0.0), (1.0, 0.0));
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_is_treated_as_point() {
        let d = point_to_segment_distance((3.0, 4.0), (0.0, 0.0), (0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
