//! GeoJSON geometry reprojection.
//!
//! Overlay features arrive in geographic lon/lat (the GeoJSON wire CRS) and
//! are reprojected to the display CRS at layer-construction time, so the
//! rendering surface never sees mixed coordinate systems.

use geojson::{Feature, FeatureCollection, Geometry, PointType, Value};

use crate::extent::{geographic_to_mercator, Crs};

/// Reprojects every geometry in the collection from geographic coordinates
/// to the given display CRS. Properties, ids, and foreign members are
/// preserved. A geographic display CRS returns the input unchanged.
pub fn to_display_crs(collection: &FeatureCollection, display: Crs) -> FeatureCollection {
    if display == Crs::Geographic {
        return collection.clone();
    }

    FeatureCollection {
        bbox: None,
        features: collection
            .features
            .iter()
            .map(|f| project_feature(f, display))
            .collect(),
        foreign_members: collection.foreign_members.clone(),
    }
}

fn project_feature(feature: &Feature, display: Crs) -> Feature {
    Feature {
        bbox: None,
        geometry: feature
            .geometry
            .as_ref()
            .map(|g| project_geometry(g, display)),
        id: feature.id.clone(),
        properties: feature.properties.clone(),
        foreign_members: feature.foreign_members.clone(),
    }
}

fn project_geometry(geometry: &Geometry, display: Crs) -> Geometry {
    Geometry::new(project_value(&geometry.value, display))
}

fn project_value(value: &Value, display: Crs) -> Value {
    match value {
        Value::Point(p) => Value::Point(project_position(p, display)),
        Value::MultiPoint(ps) => {
            Value::MultiPoint(ps.iter().map(|p| project_position(p, display)).collect())
        }
        Value::LineString(line) => {
            Value::LineString(line.iter().map(|p| project_position(p, display)).collect())
        }
        Value::MultiLineString(lines) => Value::MultiLineString(
            lines
                .iter()
                .map(|line| line.iter().map(|p| project_position(p, display)).collect())
                .collect(),
        ),
        Value::Polygon(rings) => Value::Polygon(
            rings
                .iter()
                .map(|ring| ring.iter().map(|p| project_position(p, display)).collect())
                .collect(),
        ),
        Value::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .map(|rings| {
                    rings
                        .iter()
                        .map(|ring| ring.iter().map(|p| project_position(p, display)).collect())
                        .collect()
                })
                .collect(),
        ),
        Value::GeometryCollection(geometries) => Value::GeometryCollection(
            geometries
                .iter()
                .map(|g| project_geometry(g, display))
                .collect(),
        ),
    }
}

fn project_position(position: &PointType, display: Crs) -> PointType {
    match (position.first(), position.get(1)) {
        (Some(&lon), Some(&lat)) => {
            let (x, y) = match display {
                Crs::WebMercator => geographic_to_mercator(lon, lat),
                Crs::Geographic => (lon, lat),
            };
            // Preserve any additional dimensions (altitude etc.).
            let mut projected = vec![x, y];
            projected.extend_from_slice(&position[2..]);
            projected
        }
        _ => position.clone(),
    }
}
