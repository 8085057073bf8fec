use std::num::NonZeroU32;

use rayon::prelude::*;

use super::direct::{self, DirectSolution};
use super::ellipsoid::Ellipsoid;
use super::inverse::{self, InverseSolution};
use super::point::{GeoPointFactory, PointFactory, PointSource};

/// Computes geodesics on one ellipsoid
///
/// The engine holds only immutable configuration, so a single instance can
/// be shared across threads (for example behind an `Arc`) and every call
/// runs on call-local state.
///
/// # Examples
///
/// ```
/// use vincenty_geodesy::{GeodesyEngine, GeoPoint};
///
/// let engine = GeodesyEngine::wgs84();
/// let flinders_peak = GeoPoint::new(-37.95103342, 144.42486789);
/// let buninyong = GeoPoint::new(-37.65282114, 143.92649551);
///
/// let metres = engine.distance(flinders_peak, buninyong);
/// assert!((metres - 54_972.271).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct GeodesyEngine<F = GeoPointFactory> {
    ellipsoid: Ellipsoid,
    iteration_cap: Option<NonZeroU32>,
    factory: F,
}

impl GeodesyEngine {
    /// Creates an engine on `ellipsoid` with no iteration cap
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self::with_factory(ellipsoid, GeoPointFactory)
    }

    /// Creates an engine on the WGS84 ellipsoid with no iteration cap
    pub fn wgs84() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

impl<F: PointFactory> GeodesyEngine<F> {
    /// Creates an engine whose destinations are built by `factory`
    pub fn with_factory(ellipsoid: Ellipsoid, factory: F) -> Self {
        Self {
            ellipsoid,
            iteration_cap: None,
            factory,
        }
    }

    /// Bounds both solver loops; `None` iterates until convergence
    pub fn with_iteration_cap(mut self, iteration_cap: Option<NonZeroU32>) -> Self {
        self.iteration_cap = iteration_cap;
        self
    }

    /// Returns the configured ellipsoid
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Returns the iteration cap, `None` when unbounded
    pub fn iteration_cap(&self) -> Option<NonZeroU32> {
        self.iteration_cap
    }

    /// Returns the point factory used by [`destination`](Self::destination)
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Solves the inverse problem, including convergence details
    pub fn inverse(&self, start: impl PointSource, end: impl PointSource) -> InverseSolution {
        inverse::solve(
            &self.ellipsoid,
            self.iteration_cap,
            start.point().to_radians(),
            end.point().to_radians(),
        )
    }

    /// Geodesic distance in the unit of the ellipsoid radii
    pub fn distance(&self, start: impl PointSource, end: impl PointSource) -> f64 {
        self.inverse(start, end).distance
    }

    /// Bearing at `start` towards `end`, degrees in `[0, 360)`
    pub fn initial_bearing(&self, start: impl PointSource, end: impl PointSource) -> f64 {
        self.inverse(start, end).initial_bearing
    }

    /// Bearing of travel on arrival at `end`, degrees in `[0, 360)`
    pub fn final_bearing(&self, start: impl PointSource, end: impl PointSource) -> f64 {
        self.inverse(start, end).final_bearing
    }

    /// Bearing at `end` pointing back towards `start`, degrees in `[0, 360)`
    pub fn reverse_bearing(&self, start: impl PointSource, end: impl PointSource) -> f64 {
        self.inverse(start, end).reverse_bearing()
    }

    /// Solves the direct problem, including convergence details
    ///
    /// `bearing` is in degrees and `distance` in the unit of the ellipsoid radii.
    pub fn direct(&self, start: impl PointSource, bearing: f64, distance: f64) -> DirectSolution {
        direct::solve(
            &self.ellipsoid,
            self.iteration_cap,
            start.point().to_radians(),
            bearing.to_radians(),
            distance,
        )
    }

    /// Point reached by travelling `distance` from `start` on `bearing` degrees
    pub fn destination(&self, start: impl PointSource, bearing: f64, distance: f64) -> F::Point {
        let solution = self.direct(start, bearing, distance);
        self.factory
            .create(solution.destination.latitude, solution.destination.longitude)
    }

    /// Solves many inverse problems in parallel, preserving input order
    pub fn inverse_many<S>(&self, pairs: &[(S, S)]) -> Vec<InverseSolution>
    where
        S: PointSource + Sync,
        F: Sync,
    {
        pairs
            .par_iter()
            .map(|(start, end)| self.inverse(start, end))
            .collect()
    }

    /// Distances for many point pairs, computed in parallel
    pub fn distances<S>(&self, pairs: &[(S, S)]) -> Vec<f64>
    where
        S: PointSource + Sync,
        F: Sync,
    {
        pairs
            .par_iter()
            .map(|(start, end)| self.distance(start, end))
            .collect()
    }
}
