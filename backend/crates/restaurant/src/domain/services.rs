//! Domain Services
//!
//! Pure distance math. No I/O.

use super::value_objects::Coordinates;

/// Kilometres per degree of great-circle arc
pub const KM_PER_DEGREE: f64 = 111.111;

/// Central angle between two points in degrees (haversine form)
pub fn central_angle_degrees(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.lat().to_radians();
    let lat_b = b.lat().to_radians();
    let d_lat = lat_b - lat_a;
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    // rounding can push h a hair above 1 for antipodal points
    (2.0 * h.sqrt().min(1.0).asin()).to_degrees()
}

/// Distance in kilometres
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    KM_PER_DEGREE * central_angle_degrees(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates::from_db(lat, lng)
    }

    #[test]
    fn test_identical_points() {
        assert_eq!(distance_km(at(28.61, 77.2), at(28.61, 77.2)), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_km(at(10.0, 20.0), at(11.0, 20.0));
        assert!((d - 111.111).abs() < 1e-6, "{d}");
    }

    #[test]
    fn test_symmetric() {
        let a = at(51.5, -0.12);
        let b = at(40.71, -74.0);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal() {
        let d = central_angle_degrees(at(0.0, 0.0), at(0.0, 180.0));
        assert!((d - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_shrinks_away_from_equator() {
        let at_equator = distance_km(at(0.0, 0.0), at(0.0, 1.0));
        let at_sixty = distance_km(at(60.0, 0.0), at(60.0, 1.0));
        assert!((at_equator - 111.111).abs() < 1e-6);
        assert!(at_sixty < at_equator * 0.51);
    }
}
