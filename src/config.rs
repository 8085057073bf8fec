//! Configuration for the engine and the HTTP server
//!
//! Configuration is JSON. `ServerConfig::load` reads the file named by
//! `GEODESY_CONFIG` when it is set, then applies `GEODESY_BIND`.
//!
//! ```json
//! {
//!   "bind_address": "127.0.0.1:8080",
//!   "engine": {
//!     "ellipsoid": { "equatorial_radius": 6378137.0, "polar_radius": 6356752.314245 },
//!     "iteration_cap": 200
//!   }
//! }
//! ```

use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::geodesy::{EngineBuilder, Ellipsoid, GeodesyEngine, KnownEllipsoid};

/// Environment variable naming a JSON configuration file
pub const CONFIG_PATH_ENV: &str = "GEODESY_CONFIG";

/// Environment variable overriding the bind address
pub const BIND_ADDRESS_ENV: &str = "GEODESY_BIND";

/// Ellipsoid given either by name or by its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EllipsoidConfig {
    Known(KnownEllipsoid),
    Parameters {
        equatorial_radius: f64,
        polar_radius: f64,
        #[serde(default)]
        flattening: Option<f64>,
    },
}

impl EllipsoidConfig {
    /// Resolves to ellipsoid parameters, deriving the flattening when absent
    pub fn ellipsoid(&self) -> Ellipsoid {
        match *self {
            EllipsoidConfig::Known(known) => known.ellipsoid(),
            EllipsoidConfig::Parameters {
                equatorial_radius,
                polar_radius,
                flattening: Some(flattening),
            } => Ellipsoid::new(equatorial_radius, polar_radius, flattening),
            EllipsoidConfig::Parameters {
                equatorial_radius,
                polar_radius,
                flattening: None,
            } => Ellipsoid::from_axes(equatorial_radius, polar_radius),
        }
    }
}

impl Default for EllipsoidConfig {
    fn default() -> Self {
        EllipsoidConfig::Known(KnownEllipsoid::WGS84)
    }
}

/// Settings fixed for the lifetime of a [`GeodesyEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ellipsoid: EllipsoidConfig,
    /// Absent or `null` means iterate until convergence
    pub iteration_cap: Option<NonZeroU32>,
}

impl EngineConfig {
    /// Builds an engine, rejecting invalid ellipsoid parameters
    pub fn build_engine(&self) -> Result<GeodesyEngine> {
        let builder = EngineBuilder::new().ellipsoid(self.ellipsoid.ellipsoid());
        let builder = match self.iteration_cap {
            Some(cap) => builder.iteration_cap(cap),
            None => builder.unbounded(),
        };
        builder.build()
    }
}

/// Settings for the `api-server` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub body_limit_bytes: usize,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            body_limit_bytes: 100 * 1024 * 1024,
            // requests can name nearly antipodal points
            engine: EngineConfig {
                ellipsoid: EllipsoidConfig::default(),
                iteration_cap: NonZeroU32::new(200),
            },
        }
    }
}

impl ServerConfig {
    /// Parses configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Loads configuration from the environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                info!(path = %Path::new(&path).display(), "loading configuration");
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Ok(bind_address) = std::env::var(BIND_ADDRESS_ENV) {
            config.bind_address = bind_address;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.trim().is_empty() {
            return Err(Error::Config("bind_address must not be empty".to_string()));
        }
        if self.body_limit_bytes == 0 {
            return Err(Error::Config("body_limit_bytes must be positive".to_string()));
        }
        self.engine.ellipsoid.ellipsoid().validate()
    }
}
