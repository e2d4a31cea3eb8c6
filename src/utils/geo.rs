use crate::utils::constants::EARTH_RADIUS_M;

/// Calculate the great-circle distance between two points using the
/// Haversine formula
///
/// Coordinates are decimal degrees; the result is meters on a sphere of
/// nominal Earth radius. Latitudes outside [-90, 90] produce an undefined
/// geodesic; range validation is the location check's job, not this
/// function's.
pub fn haversine_distance_m(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Convert kilometers to meters (the engine compares distances in meters)
pub fn kilometers_to_meters(km: f64) -> f64 {
    km * 1000.0
}

/// Convert meters to kilometers for display
pub fn meters_to_kilometers(m: f64) -> f64 {
    m / 1000.0
}
