//! Geodesic computations on a reference ellipsoid
//!
//! Vincenty's inverse and direct formulae, plus the value types and
//! collaborators the engine is configured with.

pub mod ellipsoid;
pub mod point;
pub mod series;
pub mod inverse;
pub mod direct;
pub mod engine;
pub mod builder;

pub use ellipsoid::{Ellipsoid, KnownEllipsoid};
pub use point::{GeoPoint, GeoPointFactory, PointFactory, PointSource, Waypoint};
pub use inverse::InverseSolution;
pub use direct::DirectSolution;
pub use engine::GeodesyEngine;
pub use builder::EngineBuilder;

/// Iteration stops once successive estimates differ by no more than this
/// (about 0.06 mm on the Earth).
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;
