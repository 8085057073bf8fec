use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic position in degrees
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`; the
/// engine trusts its callers and does not check either range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from latitude/longitude in degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns (latitude, longitude) in radians
    pub fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }

    /// Checks that both angles are finite and within their usual ranges
    ///
    /// The engine never calls this; it is for input arriving from outside
    /// the process (CSV batches, HTTP requests).
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidInput(format!("latitude {} outside [-90, 90]", self.latitude)));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidInput(format!("longitude {} outside [-180, 180]", self.longitude)));
        }
        Ok(())
    }
}

/// Anything that resolves to a [`GeoPoint`]
///
/// Every engine operation accepts a `PointSource`, so raw points and
/// wrappers such as [`Waypoint`] can be passed interchangeably.
pub trait PointSource {
    fn point(&self) -> GeoPoint;
}

impl PointSource for GeoPoint {
    fn point(&self) -> GeoPoint {
        *self
    }
}

/// `(latitude, longitude)` in degrees
impl PointSource for (f64, f64) {
    fn point(&self) -> GeoPoint {
        GeoPoint::new(self.0, self.1)
    }
}

impl<T: PointSource + ?Sized> PointSource for &T {
    fn point(&self) -> GeoPoint {
        (**self).point()
    }
}

/// A named position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: GeoPoint,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            position: GeoPoint::new(latitude, longitude),
        }
    }
}

impl PointSource for Waypoint {
    fn point(&self) -> GeoPoint {
        self.position
    }
}

/// Builds the point values returned by [`GeodesyEngine::destination`](super::GeodesyEngine::destination)
pub trait PointFactory {
    type Point;

    /// Creates a point from latitude/longitude in degrees
    fn create(&self, latitude: f64, longitude: f64) -> Self::Point;
}

/// Default factory producing [`GeoPoint`] values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoPointFactory;

impl PointFactory for GeoPointFactory {
    type Point = GeoPoint;

    fn create(&self, latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude)
    }
}
