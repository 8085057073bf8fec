use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest accepted disagreement between the stated flattening and `(a - b) / a`
const FLATTENING_TOLERANCE: f64 = 1e-8;

/// Reference ellipsoid: equatorial radius, polar radius and flattening
///
/// Radii share one linear unit, and every distance the engine produces is
/// expressed in that unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    equatorial_radius: f64,
    polar_radius: f64,
    flattening: f64,
}

impl Ellipsoid {
    /// World Geodetic System 1984
    pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 6_356_752.314_245, 1.0 / 298.257_223_563);

    /// Geodetic Reference System 1980
    pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 6_356_752.314_140, 1.0 / 298.257_222_101);

    /// Airy 1830 (Ordnance Survey of Great Britain)
    pub const AIRY_1830: Ellipsoid = Ellipsoid::new(6_377_563.396, 6_356_256.909, 1.0 / 299.324_964_6);

    /// Clarke 1866 (NAD27)
    pub const CLARKE_1866: Ellipsoid = Ellipsoid::new(6_378_206.4, 6_356_583.8, 1.0 / 294.978_698_214);

    /// International 1924 (Hayford)
    pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::new(6_378_388.0, 6_356_911.946, 1.0 / 297.0);

    /// Creates an ellipsoid from its three parameters without checking them
    pub const fn new(equatorial_radius: f64, polar_radius: f64, flattening: f64) -> Self {
        Self {
            equatorial_radius,
            polar_radius,
            flattening,
        }
    }

    /// Creates an ellipsoid from its two radii, deriving the flattening
    pub fn from_axes(equatorial_radius: f64, polar_radius: f64) -> Self {
        let flattening = (equatorial_radius - polar_radius) / equatorial_radius;
        Self::new(equatorial_radius, polar_radius, flattening)
    }

    /// Semi-major axis `a`
    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    /// Semi-minor axis `b`
    pub fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    /// Flattening `f = (a - b) / a`
    pub fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Checks that the parameters describe an oblate spheroid
    ///
    /// The solvers never call this; it is applied when an engine is built
    /// from configuration or through [`EngineBuilder`](super::EngineBuilder).
    pub fn validate(&self) -> Result<()> {
        let (a, b, f) = (self.equatorial_radius, self.polar_radius, self.flattening);

        if !(a.is_finite() && a > 0.0) {
            return Err(Error::InvalidEllipsoid(format!("equatorial radius must be positive, got {}", a)));
        }
        if !(b.is_finite() && b > 0.0) {
            return Err(Error::InvalidEllipsoid(format!("polar radius must be positive, got {}", b)));
        }
        if b >= a {
            return Err(Error::InvalidEllipsoid(format!(
                "polar radius {} must be smaller than equatorial radius {}",
                b, a
            )));
        }
        if !(f > 0.0 && f < 1.0) {
            return Err(Error::InvalidEllipsoid(format!("flattening must lie in (0, 1), got {}", f)));
        }

        let derived = (a - b) / a;
        if (derived - f).abs() > FLATTENING_TOLERANCE {
            return Err(Error::InvalidEllipsoid(format!(
                "flattening {} disagrees with radii (expected {})",
                f, derived
            )));
        }

        Ok(())
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Named reference ellipsoids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnownEllipsoid {
    WGS84,
    GRS80,
    Airy1830,
    Clarke1866,
    International1924,
}

impl KnownEllipsoid {
    /// Returns the parameters of this ellipsoid
    pub fn ellipsoid(&self) -> Ellipsoid {
        match self {
            KnownEllipsoid::WGS84 => Ellipsoid::WGS84,
            KnownEllipsoid::GRS80 => Ellipsoid::GRS80,
            KnownEllipsoid::Airy1830 => Ellipsoid::AIRY_1830,
            KnownEllipsoid::Clarke1866 => Ellipsoid::CLARKE_1866,
            KnownEllipsoid::International1924 => Ellipsoid::INTERNATIONAL_1924,
        }
    }

    /// Returns the display name of this ellipsoid
    pub fn name(&self) -> &'static str {
        match self {
            KnownEllipsoid::WGS84 => "WGS 84",
            KnownEllipsoid::GRS80 => "GRS 80",
            KnownEllipsoid::Airy1830 => "Airy 1830",
            KnownEllipsoid::Clarke1866 => "Clarke 1866",
            KnownEllipsoid::International1924 => "International 1924",
        }
    }
}

impl From<KnownEllipsoid> for Ellipsoid {
    fn from(known: KnownEllipsoid) -> Self {
        known.ellipsoid()
    }
}
