//! Geographic query regions.
//!
//! The live-state provider is queried with a rectangular latitude/longitude
//! box. [`BoundingBox::around`] derives that box from a center point and a
//! radius, widening the longitude span to compensate for meridian
//! convergence.

use serde::{Deserialize, Serialize};

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Radius used when the caller does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

// ---------------------------------------------------------------------------
// GeoPoint
// ---------------------------------------------------------------------------

/// A WGS84 position in decimal degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point only when both coordinates are known.
    ///
    /// A center with a missing coordinate is "not ready" and yields `None`.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Some(Self::new(lat?, lon?))
    }
}

// ---------------------------------------------------------------------------
// BoundingBox
// ---------------------------------------------------------------------------

/// A rectangular latitude/longitude region.
///
/// Serialises with the live-state provider's parameter names
/// (`lamin`, `lamax`, `lomin`, `lomax`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge.
    #[serde(rename = "lamin")]
    pub lat_min: f64,
    /// Northern edge.
    #[serde(rename = "lamax")]
    pub lat_max: f64,
    /// Western edge.
    #[serde(rename = "lomin")]
    pub lon_min: f64,
    /// Eastern edge.
    #[serde(rename = "lomax")]
    pub lon_max: f64,
}

impl BoundingBox {
    /// Compute the box of half-width `radius_km` around `center`.
    ///
    /// Degenerate at the poles, where the longitude span grows without bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyguess_models::{BoundingBox, GeoPoint};
    ///
    /// let bbox = BoundingBox::around(GeoPoint::new(0.0, 0.0), 111.0);
    /// assert!((bbox.lat_max - 1.0).abs() < 1e-9);
    /// assert!((bbox.lon_min + 1.0).abs() < 1e-9);
    /// ```
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE_LAT;
        let lon_delta = radius_km / (KM_PER_DEGREE_LAT * center.lat.to_radians().cos());

        Self {
            lat_min: center.lat - lat_delta,
            lat_max: center.lat + lat_delta,
            lon_min: center.lon - lon_delta,
            lon_max: center.lon + lon_delta,
        }
    }

    /// Whether `point` lies inside the box (edges inclusive).
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }

    /// Query parameters in the order the live-state provider documents them.
    pub fn query_pairs(&self) -> [(&'static str, f64); 4] {
        [
            ("lamin", self.lat_min),
            ("lomin", self.lon_min),
            ("lamax", self.lat_max),
            ("lomax", self.lon_max),
        ]
    }
}

/// Convenience wrapper around [`BoundingBox::around`].
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    BoundingBox::around(GeoPoint::new(lat, lon), radius_km)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
