//! Great-circle distance between coordinates.

use crate::domain::session::Coordinate;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres.
///
/// Inputs are not range-checked; out-of-range degrees still produce a
/// finite number.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(40.7128, -74.006);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn new_york_to_london_is_about_5570_km() {
        let nyc = Coordinate::new(40.7128, -74.006);
        let london = Coordinate::new(51.5074, -0.1278);
        let d = haversine_km(nyc, london);
        assert!((d - 5570.0).abs() < 10.0, "got {}", d);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_input_is_still_finite() {
        let d = haversine_km(Coordinate::new(200.0, 500.0), Coordinate::new(-300.0, 0.0));
        assert!(d.is_finite());
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coord(), b in coord()) {
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        #[test]
        fn distance_to_self_is_zero(a in coord()) {
            prop_assert_eq!(haversine_km(a, a), 0.0);
        }

        #[test]
        fn distance_grows_with_latitude_separation(
            lat in -80.0f64..0.0,
            lon in -180.0f64..=180.0,
            near in 0.1f64..40.0,
            extra in 0.1f64..40.0,
        ) {
            let origin = Coordinate::new(lat, lon);
            let closer = haversine_km(origin, Coordinate::new(lat + near, lon));
            let farther = haversine_km(origin, Coordinate::new(lat + near + extra, lon));
            prop_assert!(closer < farther);
        }
    }
}
