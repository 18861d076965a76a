//! Extent and CRS type definitions.

use std::fmt;
use thiserror::Error;

/// Valid longitude range in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Earth radius used by spherical Web Mercator (EPSG:3857), in meters.
pub(crate) const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Half the Web Mercator world width, in meters (~20037508.34).
pub(crate) const MERCATOR_HALF_WORLD: f64 = EARTH_RADIUS_M * std::f64::consts::PI;

/// Coordinate reference systems understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    /// Spherical Web Mercator (EPSG:3857), the display projection.
    WebMercator,
    /// Geographic longitude/latitude in degrees (EPSG:4326), the query projection.
    Geographic,
}

impl Crs {
    /// Returns the EPSG code string for this CRS.
    pub fn code(&self) -> &'static str {
        match self {
            Crs::WebMercator => "EPSG:3857",
            Crs::Geographic => "EPSG:4326",
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors produced when constructing or validating an extent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidExtentError {
    /// One or more coordinates are NaN or infinite.
    #[error("extent coordinate is not finite: ({min_x}, {min_y}, {max_x}, {max_y})")]
    NonFinite {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    /// The minimum exceeds the maximum on one axis.
    #[error("extent is inverted on the {axis} axis: min {min} > max {max}")]
    Inverted {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    /// Longitude is outside [-180, 180]. Antimeridian-crossing extents are
    /// not wrapped; they are rejected.
    #[error("longitude {0} outside [{MIN_LON}, {MAX_LON}]")]
    LongitudeOutOfRange(f64),

    /// Latitude is outside [-90, 90].
    #[error("latitude {0} outside [{MIN_LAT}, {MAX_LAT}]")]
    LatitudeOutOfRange(f64),
}

/// Axis-aligned bounding rectangle in a named CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub crs: Crs,
}

impl Extent {
    /// Creates an extent, checking that all coordinates are finite and that
    /// min does not exceed max on either axis.
    pub fn new(
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        crs: Crs,
    ) -> Result<Self, InvalidExtentError> {
        check_finite(min_x, min_y, max_x, max_y)?;
        if min_x > max_x {
            return Err(InvalidExtentError::Inverted {
                axis: "x",
                min: min_x,
                max: max_x,
            });
        }
        if min_y > max_y {
            return Err(InvalidExtentError::Inverted {
                axis: "y",
                min: min_y,
                max: max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs,
        })
    }

    /// The four corner coordinates, counter-clockwise from the minimum corner.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}] ({})",
            self.min_x, self.min_y, self.max_x, self.max_y, self.crs
        )
    }
}

/// A bounding box validated to lie within geographic bounds.
///
/// Construction guarantees finite coordinates, correct ordering, and
/// longitude/latitude within [-180, 180] / [-90, 90]. This is the only
/// extent representation accepted by overlay data fetchers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoExtent {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl GeoExtent {
    /// Creates a validated geographic extent.
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, InvalidExtentError> {
        check_finite(min_lon, min_lat, max_lon, max_lat)?;
        if min_lon > max_lon {
            return Err(InvalidExtentError::Inverted {
                axis: "longitude",
                min: min_lon,
                max: max_lon,
            });
        }
        if min_lat > max_lat {
            return Err(InvalidExtentError::Inverted {
                axis: "latitude",
                min: min_lat,
                max: max_lat,
            });
        }
        for lon in [min_lon, max_lon] {
            if !(MIN_LON..=MAX_LON).contains(&lon) {
                return Err(InvalidExtentError::LongitudeOutOfRange(lon));
            }
        }
        for lat in [min_lat, max_lat] {
            if !(MIN_LAT..=MAX_LAT).contains(&lat) {
                return Err(InvalidExtentError::LatitudeOutOfRange(lat));
            }
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Formats the extent as a `minLon,minLat,maxLon,maxLat` query string,
    /// the wire order expected by overlay data services.
    pub fn bbox_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl fmt::Display for GeoExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

fn check_finite(a: f64, b: f64, c: f64, d: f64) -> Result<(), InvalidExtentError> {
    if [a, b, c, d].iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(InvalidExtentError::NonFinite {
            min_x: a,
            min_y: b,
            max_x: c,
            max_y: d,
        })
    }
}
