use std::num::NonZeroU32;

use crate::error::{Error, Result};

use super::ellipsoid::{Ellipsoid, KnownEllipsoid};
use super::engine::GeodesyEngine;
use super::point::{GeoPointFactory, PointFactory};

/// Builder for a validated [`GeodesyEngine`]
///
/// Unlike [`GeodesyEngine::new`], [`build`](Self::build) rejects ellipsoids
/// that fail [`Ellipsoid::validate`].
pub struct EngineBuilder<F = GeoPointFactory> {
    ellipsoid: Option<Ellipsoid>,
    iteration_cap: Option<NonZeroU32>,
    factory: F,
}

impl EngineBuilder {
    /// Creates a new engine builder
    pub fn new() -> Self {
        Self {
            ellipsoid: None,
            iteration_cap: None,
            factory: GeoPointFactory,
        }
    }
}

impl<F: PointFactory> EngineBuilder<F> {
    /// Sets the ellipsoid from explicit parameters
    pub fn ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = Some(ellipsoid);
        self
    }

    /// Sets the ellipsoid to a named preset
    pub fn known_ellipsoid(self, known: KnownEllipsoid) -> Self {
        self.ellipsoid(known.ellipsoid())
    }

    /// Sets the ellipsoid from its two radii
    pub fn axes(self, equatorial_radius: f64, polar_radius: f64) -> Self {
        self.ellipsoid(Ellipsoid::from_axes(equatorial_radius, polar_radius))
    }

    /// Stops both solvers after at most `cap` iterations
    pub fn iteration_cap(mut self, cap: NonZeroU32) -> Self {
        self.iteration_cap = Some(cap);
        self
    }

    /// Removes any iteration cap
    pub fn unbounded(mut self) -> Self {
        self.iteration_cap = None;
        self
    }

    /// Replaces the point factory used for destinations
    pub fn point_factory<G: PointFactory>(self, factory: G) -> EngineBuilder<G> {
        EngineBuilder {
            ellipsoid: self.ellipsoid,
            iteration_cap: self.iteration_cap,
            factory,
        }
    }

    /// Builds the engine
    pub fn build(self) -> Result<GeodesyEngine<F>> {
        let ellipsoid = self
            .ellipsoid
            .ok_or_else(|| Error::Config("Ellipsoid is required".to_string()))?;
        ellipsoid.validate()?;

        Ok(GeodesyEngine::with_factory(ellipsoid, self.factory).with_iteration_cap(self.iteration_cap))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
