//! vincenty-geodesy - Geodesics on a reference ellipsoid for Rust
//!
//! vincenty-geodesy solves the two classic geodesic problems with Vincenty's
//! iterative formulae: the distance and bearings between two points
//! (inverse problem), and the point reached from a start point, bearing and
//! distance (direct problem).
//!
//! # Examples
//!
//! ## Distance and bearings
//!
//! ```
//! use vincenty_geodesy::{GeodesyEngine, GeoPoint};
//!
//! let engine = GeodesyEngine::wgs84();
//! let flinders_peak = GeoPoint::new(-37.95103342, 144.42486789);
//! let buninyong = GeoPoint::new(-37.65282114, 143.92649551);
//!
//! println!("{:.3} m", engine.distance(flinders_peak, buninyong));
//! println!("initial {:.5}°", engine.initial_bearing(flinders_peak, buninyong));
//! println!("final {:.5}°", engine.final_bearing(flinders_peak, buninyong));
//! ```
//!
//! ## Destination with an iteration cap
//!
//! ```
//! use std::num::NonZeroU32;
//! use vincenty_geodesy::{EngineBuilder, KnownEllipsoid, Waypoint};
//!
//! let engine = EngineBuilder::new()
//!     .known_ellipsoid(KnownEllipsoid::GRS80)
//!     .iteration_cap(NonZeroU32::new(200).unwrap())
//!     .build()?;
//!
//! let start = Waypoint::new("Flinders Peak", -37.95103342, 144.42486789);
//! let solution = engine.direct(&start, 306.86816, 54_972.271);
//!
//! if !solution.converged {
//!     println!("stopped after {} iterations", solution.iterations);
//! }
//! println!("{:?}", solution.destination);
//! # Ok::<(), vincenty_geodesy::Error>(())
//! ```

pub mod error;
pub mod geodesy;
pub mod config;
pub mod batch;
pub mod api;

pub use error::{Error, Result};
pub use geodesy::{
    DirectSolution, Ellipsoid, EngineBuilder, GeoPoint, GeoPointFactory, GeodesyEngine,
    InverseSolution, KnownEllipsoid, PointFactory, PointSource, Waypoint,
};
pub use config::{EllipsoidConfig, EngineConfig, ServerConfig};
