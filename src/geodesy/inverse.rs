//! Vincenty inverse solution: distance and bearings between two points

use std::num::NonZeroU32;

use serde::Serialize;
use tracing::debug;

use super::ellipsoid::Ellipsoid;
use super::series::{self, bearing_degrees, cap_reached};
use super::CONVERGENCE_TOLERANCE;

/// Result of the inverse problem
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InverseSolution {
    /// Geodesic length, in the unit of the ellipsoid radii
    pub distance: f64,
    /// Forward azimuth at the start, degrees in `[0, 360)`
    pub initial_bearing: f64,
    /// Forward azimuth at the end, degrees in `[0, 360)`
    pub final_bearing: f64,
    /// Number of lambda refinements performed
    pub iterations: u32,
    /// `false` when the iteration cap stopped the loop first
    pub converged: bool,
}

impl InverseSolution {
    fn coincident(iterations: u32) -> Self {
        Self {
            distance: 0.0,
            initial_bearing: 0.0,
            final_bearing: 0.0,
            iterations,
            converged: true,
        }
    }

    /// Azimuth from the end point back towards the start, degrees in `[0, 360)`
    ///
    /// Zero for coincident points.
    pub fn reverse_bearing(&self) -> f64 {
        if self.distance == 0.0 {
            return 0.0;
        }
        (self.final_bearing + 180.0) % 360.0
    }
}

/// Solves the inverse problem for two (latitude, longitude) pairs in radians
pub fn solve(
    ellipsoid: &Ellipsoid,
    iteration_cap: Option<NonZeroU32>,
    start: (f64, f64),
    end: (f64, f64),
) -> InverseSolution {
    let f = ellipsoid.flattening();
    let (lat1, lon1) = start;
    let (lat2, lon2) = end;
    let l = lon2 - lon1;

    let tan_u1 = (1.0 - f) * lat1.tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;
    let tan_u2 = (1.0 - f) * lat2.tan();
    let cos_u2 = 1.0 / (1.0 + tan_u2 * tan_u2).sqrt();
    let sin_u2 = tan_u2 * cos_u2;

    let mut lambda = l;
    let mut iterations = 0u32;

    let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m, converged) = loop {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let east = cos_u2 * sin_lambda;
        let north = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = (east * east + north * north).sqrt();

        if sin_sigma == 0.0 {
            return InverseSolution::coincident(iterations);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // equatorial line
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = series::coefficient_c(ellipsoid, cos_sq_alpha);

        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        iterations += 1;

        if (lambda - previous).abs() <= CONVERGENCE_TOLERANCE {
            break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m, true);
        }
        if cap_reached(iteration_cap, iterations) {
            debug!(iterations, residual = (lambda - previous).abs(), "inverse solution stopped at iteration cap");
            break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m, false);
        }
    };

    let u_sq = series::reduced_u_squared(ellipsoid, cos_sq_alpha);
    let k = series::series_coefficient(u_sq);
    let a = series::coefficient_a(k);
    let b = series::coefficient_b(k);
    let delta_sigma = series::delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m);

    let distance = ellipsoid.polar_radius() * a * (sigma - delta_sigma);

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let initial = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let last = (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    InverseSolution {
        distance,
        initial_bearing: bearing_degrees(initial),
        final_bearing: bearing_degrees(last),
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn radians(lat: f64, lon: f64) -> (f64, f64) {
        (lat.to_radians(), lon.to_radians())
    }

    const FLINDERS_PEAK: (f64, f64) = (-37.951_033_42, 144.424_867_89);
    const BUNINYONG: (f64, f64) = (-37.652_821_14, 143.926_495_51);

    #[test]
    fn test_flinders_peak_to_buninyong() {
        let solution = solve(
            &Ellipsoid::WGS84,
            None,
            radians(FLINDERS_PEAK.0, FLINDERS_PEAK.1),
            radians(BUNINYONG.0, BUNINYONG.1),
        );

        assert!(solution.converged);
        assert_relative_eq!(solution.distance, 54_972.271, epsilon = 5e-3);
        assert_relative_eq!(solution.initial_bearing, 306.868_16, epsilon = 1e-5);
        assert_relative_eq!(solution.final_bearing, 307.173_63, epsilon = 1e-5);
        assert_relative_eq!(solution.reverse_bearing(), 127.173_63, epsilon = 1e-5);
    }

    #[test]
    fn test_coincident_points_short_circuit() {
        let p = radians(12.5, -45.0);
        let solution = solve(&Ellipsoid::WGS84, None, p, p);

        assert_eq!(solution.distance, 0.0);
        assert_eq!(solution.initial_bearing, 0.0);
        assert_eq!(solution.final_bearing, 0.0);
        assert_eq!(solution.reverse_bearing(), 0.0);
        assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn test_equatorial_line_does_not_divide_by_zero() {
        let solution = solve(&Ellipsoid::WGS84, None, radians(0.0, 0.0), radians(0.0, 10.0));

        assert!(solution.distance.is_finite());
        // a * 10 degrees along the equator
        assert_relative_eq!(solution.distance, 1_113_194.907_932, epsilon = 1e-3);
        assert_relative_eq!(solution.initial_bearing, 90.0, epsilon = 1e-9);
        assert_relative_eq!(solution.final_bearing, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_meridian_line_heads_north() {
        let solution = solve(&Ellipsoid::WGS84, None, radians(0.0, 0.0), radians(1.0, 0.0));

        assert_relative_eq!(solution.initial_bearing, 0.0, epsilon = 1e-9);
        // one degree of latitude at the equator
        assert_relative_eq!(solution.distance, 110_574.389, epsilon = 1e-2);
    }

    #[test]
    fn test_iteration_cap_changes_result() {
        let start = radians(FLINDERS_PEAK.0, FLINDERS_PEAK.1);
        let end = radians(BUNINYONG.0, BUNINYONG.1);

        let capped = solve(&Ellipsoid::WGS84, NonZeroU32::new(1), start, end);
        let unbounded = solve(&Ellipsoid::WGS84, None, start, end);

        assert_eq!(capped.iterations, 1);
        assert!(!capped.converged);
        assert!(unbounded.iterations > 1);
        assert_ne!(capped.distance, unbounded.distance);
        assert!((capped.distance - 54_972.271).abs() > (unbounded.distance - 54_972.271).abs());
    }

    #[test]
    fn test_generous_cap_matches_unbounded() {
        let start = radians(FLINDERS_PEAK.0, FLINDERS_PEAK.1);
        let end = radians(BUNINYONG.0, BUNINYONG.1);

        let capped = solve(&Ellipsoid::WGS84, NonZeroU32::new(100), start, end);
        let unbounded = solve(&Ellipsoid::WGS84, None, start, end);

        assert_eq!(capped, unbounded);
    }
}
