//! Coordinate bounds for stations and distances between them.

use geo::{HaversineDistance, Point};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Great-circle distance in kilometres between two points, used to suggest
/// a route distance when none is given.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = Point::new(lon1, lat1);
    let to = Point::new(lon2, lat2);
    from.haversine_distance(&to) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert!(haversine_km(50.45, 30.52, 50.45, 30.52).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(50.4501, 30.5234, 46.4825, 30.7233);
        let back = haversine_km(46.4825, 30.7233, 50.4501, 30.5234);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn kyiv_to_lviv_is_roughly_470_km() {
        let d = haversine_km(50.4501, 30.5234, 49.8397, 24.0297);
        assert!((460.0..480.0).contains(&d), "got {d}");
    }
}
