//! Extent types and coordinate reference system transforms.
//!
//! An [`Extent`] is an axis-aligned bounding rectangle tagged with the CRS
//! its coordinates are expressed in. The map's rendering surface reports
//! extents in the display projection (spherical Web Mercator); overlay data
//! sources are queried in geographic longitude/latitude, represented by the
//! validated [`GeoExtent`] type.
//!
//! [`to_query_extent`] is the bridge between the two: it reprojects all four
//! corners of a display extent, recomputes the enclosing axis-aligned box,
//! and validates the result against geographic bounds.

mod transform;
mod types;

pub use transform::{geographic_to_mercator, mercator_to_geographic, to_query_extent};
pub use types::{
    Crs, Extent, GeoExtent, InvalidExtentError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};

#[cfg(test)]
mod tests;
