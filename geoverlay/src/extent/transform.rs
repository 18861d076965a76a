//! Spherical Web Mercator math and extent reprojection.

use super::types::{Crs, Extent, GeoExtent, InvalidExtentError, EARTH_RADIUS_M};

/// Projects geographic coordinates to spherical Web Mercator meters.
///
/// Latitudes at or beyond the poles produce infinite y; callers relying on
/// finite output should validate their input first.
pub fn geographic_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * ((std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan()).ln();
    (x, y)
}

/// Inverse spherical Web Mercator: meters to geographic degrees.
///
/// Latitude is mathematically bounded to (-90, 90) for any finite y.
/// Longitude is linear in x and exceeds ±180 when x lies beyond the world
/// half-width; such values fail downstream validation.
pub fn mercator_to_geographic(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (y / EARTH_RADIUS_M).sinh().atan().to_degrees();
    (lon, lat)
}

fn reproject_point(x: f64, y: f64, from: Crs) -> (f64, f64) {
    match from {
        Crs::Geographic => (x, y),
        Crs::WebMercator => mercator_to_geographic(x, y),
    }
}

/// Converts a display extent into a validated geographic query extent.
///
/// All four corners are reprojected and the enclosing axis-aligned box is
/// recomputed from the full corner set. Reprojecting only two opposite
/// corners under-covers the viewport whenever the source projection is not
/// rectilinear in the target, so the full set is always used.
///
/// # Errors
///
/// Returns [`InvalidExtentError`] when any reprojected coordinate is
/// non-finite or falls outside [-180, 180] × [-90, 90]. In particular a
/// display extent straddling the antimeridian is rejected rather than
/// wrapped.
pub fn to_query_extent(display: &Extent) -> Result<GeoExtent, InvalidExtentError> {
    let mut min_lon = f64::INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut max_lat = f64::NEG_INFINITY;

    for (x, y) in display.corners() {
        let (lon, lat) = reproject_point(x, y, display.crs);
        // f64::min/max discard NaN operands, so a non-finite corner must be
        // rejected here or it would silently vanish from the fold.
        if !lon.is_finite() || !lat.is_finite() {
            return Err(InvalidExtentError::NonFinite {
                min_x: display.min_x,
                min_y: display.min_y,
                max_x: display.max_x,
                max_y: display.max_y,
            });
        }
        min_lon = min_lon.min(lon);
        min_lat = min_lat.min(lat);
        max_lon = max_lon.max(lon);
        max_lat = max_lat.max(lat);
    }

    GeoExtent::new(min_lon, min_lat, max_lon, max_lat)
}
