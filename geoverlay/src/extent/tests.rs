use super::*;
use crate::extent::types::MERCATOR_HALF_WORLD;

const EPS: f64 = 1e-9;

fn mercator_extent(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Extent {
    Extent::new(min_x, min_y, max_x, max_y, Crs::WebMercator).unwrap()
}

#[test]
fn test_forward_inverse_roundtrip() {
    for &(lon, lat) in &[(0.0, 0.0), (-0.1276, 51.5074), (10.0, 53.5), (-122.4, 37.7)] {
        let (x, y) = geographic_to_mercator(lon, lat);
        let (lon2, lat2) = mercator_to_geographic(x, y);
        assert!((lon - lon2).abs() < EPS, "lon roundtrip for {}", lon);
        assert!((lat - lat2).abs() < 1e-6, "lat roundtrip for {}", lat);
    }
}

#[test]
fn test_origin_maps_to_origin() {
    let (x, y) = geographic_to_mercator(0.0, 0.0);
    assert!(x.abs() < EPS);
    assert!(y.abs() < EPS);
}

#[test]
fn test_world_half_width() {
    let (x, _) = geographic_to_mercator(180.0, 0.0);
    assert!((x - MERCATOR_HALF_WORLD).abs() < 1.0);
}

#[test]
fn test_to_query_extent_valid_display_extent() {
    // Roughly central London in Web Mercator meters.
    let display = mercator_extent(-20_000.0, 6_690_000.0, -10_000.0, 6_720_000.0);
    let geo = to_query_extent(&display).unwrap();

    assert!(geo.min_lon() <= geo.max_lon());
    assert!(geo.min_lat() <= geo.max_lat());
    assert!(geo.min_lon() >= MIN_LON && geo.max_lon() <= MAX_LON);
    assert!(geo.min_lat() >= MIN_LAT && geo.max_lat() <= MAX_LAT);
    assert!(geo.min_lon() < 0.0 && geo.max_lon() < 0.0);
    assert!(geo.min_lat() > 51.0 && geo.max_lat() < 52.0);
}

#[test]
fn test_to_query_extent_uses_all_four_corners() {
    let display = mercator_extent(-1_000_000.0, -2_000_000.0, 3_000_000.0, 4_000_000.0);
    let geo = to_query_extent(&display).unwrap();

    // The AABB of the reprojected corners must cover every corner exactly.
    for (x, y) in display.corners() {
        let (lon, lat) = mercator_to_geographic(x, y);
        assert!(lon >= geo.min_lon() - EPS && lon <= geo.max_lon() + EPS);
        assert!(lat >= geo.min_lat() - EPS && lat <= geo.max_lat() + EPS);
    }
}

#[test]
fn test_to_query_extent_geographic_passthrough() {
    let display = Extent::new(-1.0, -1.0, 1.0, 1.0, Crs::Geographic).unwrap();
    let geo = to_query_extent(&display).unwrap();
    assert_eq!(geo, GeoExtent::new(-1.0, -1.0, 1.0, 1.0).unwrap());
}

#[test]
fn test_antimeridian_straddling_extent_is_rejected() {
    // An extent whose western edge lies beyond the -180 meridian.
    let display = mercator_extent(
        -MERCATOR_HALF_WORLD - 500_000.0,
        -1_000_000.0,
        -MERCATOR_HALF_WORLD + 500_000.0,
        1_000_000.0,
    );
    let err = to_query_extent(&display).unwrap_err();
    assert!(matches!(err, InvalidExtentError::LongitudeOutOfRange(_)));
}

#[test]
fn test_non_finite_display_extent_is_rejected() {
    // A single NaN coordinate must fail the whole extent; min/max folding
    // would otherwise drop the NaN corner and validate the rest.
    for (min_x, min_y, max_x, max_y) in [
        (f64::NAN, 0.0, 1.0, 1.0),
        (0.0, f64::NAN, 1.0, 1.0),
        (0.0, 0.0, f64::NAN, 1.0),
        (0.0, 0.0, 1.0, f64::NAN),
        (f64::INFINITY, 0.0, 1.0, 1.0),
    ] {
        let display = Extent {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: Crs::WebMercator,
        };
        let err = to_query_extent(&display).unwrap_err();
        assert!(
            matches!(err, InvalidExtentError::NonFinite { .. }),
            "({}, {}, {}, {}) must be rejected",
            min_x,
            min_y,
            max_x,
            max_y
        );
    }
}

#[test]
fn test_extent_new_rejects_inverted_axes() {
    let err = Extent::new(2.0, 0.0, 1.0, 1.0, Crs::Geographic).unwrap_err();
    assert!(matches!(err, InvalidExtentError::Inverted { axis: "x", .. }));

    let err = Extent::new(0.0, 2.0, 1.0, 1.0, Crs::Geographic).unwrap_err();
    assert!(matches!(err, InvalidExtentError::Inverted { axis: "y", .. }));
}

#[test]
fn test_geo_extent_rejects_out_of_range() {
    assert!(matches!(
        GeoExtent::new(-181.0, 0.0, 0.0, 1.0),
        Err(InvalidExtentError::LongitudeOutOfRange(_))
    ));
    assert!(matches!(
        GeoExtent::new(0.0, -91.0, 1.0, 0.0),
        Err(InvalidExtentError::LatitudeOutOfRange(_))
    ));
}

#[test]
fn test_geo_extent_bbox_string_order() {
    let geo = GeoExtent::new(-1.5, -2.5, 3.5, 4.5).unwrap();
    assert_eq!(geo.bbox_string(), "-1.5,-2.5,3.5,4.5");
}

#[test]
fn test_crs_codes() {
    assert_eq!(Crs::WebMercator.code(), "EPSG:3857");
    assert_eq!(Crs::Geographic.code(), "EPSG:4326");
}
