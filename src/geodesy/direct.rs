//! Vincenty direct solution: destination from a start point, bearing and distance

use std::f64::consts::PI;
use std::num::NonZeroU32;

use serde::Serialize;
use tracing::debug;

use super::ellipsoid::Ellipsoid;
use super::point::GeoPoint;
use super::series::{self, bearing_degrees, cap_reached};
use super::CONVERGENCE_TOLERANCE;

/// Result of the direct problem
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectSolution {
    /// Destination in degrees, longitude in `[-180, 180)`
    pub destination: GeoPoint,
    /// Forward azimuth at the destination, degrees in `[0, 360)`
    pub final_bearing: f64,
    /// Number of sigma refinements performed
    pub iterations: u32,
    /// `false` when the iteration cap stopped the loop first
    pub converged: bool,
}

/// Solves the direct problem
///
/// `start` is (latitude, longitude) and `bearing` the initial azimuth, all in
/// radians; `distance` is in the unit of the ellipsoid radii.
pub fn solve(
    ellipsoid: &Ellipsoid,
    iteration_cap: Option<NonZeroU32>,
    start: (f64, f64),
    bearing: f64,
    distance: f64,
) -> DirectSolution {
    let f = ellipsoid.flattening();
    let (lat1, lon1) = start;
    let (sin_bearing, cos_bearing) = bearing.sin_cos();

    let tan_u1 = (1.0 - f) * lat1.tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sigma1 = tan_u1.atan2(cos_bearing);
    let sin_alpha = cos_u1 * sin_bearing;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

    let u_sq = series::reduced_u_squared(ellipsoid, cos_sq_alpha);
    let k = series::series_coefficient(u_sq);
    let a = series::coefficient_a(k);
    let b = series::coefficient_b(k);

    let first_estimate = distance / (ellipsoid.polar_radius() * a);
    let mut sigma = first_estimate;
    let mut iterations = 0u32;

    let (sin_sigma, cos_sigma, cos_2sigma_m, converged) = loop {
        let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let delta_sigma = series::delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m);

        let previous = sigma;
        sigma = first_estimate + delta_sigma;
        iterations += 1;

        if (sigma - previous).abs() <= CONVERGENCE_TOLERANCE {
            break (sin_sigma, cos_sigma, cos_2sigma_m, true);
        }
        if cap_reached(iteration_cap, iterations) {
            debug!(iterations, residual = (sigma - previous).abs(), "direct solution stopped at iteration cap");
            break (sin_sigma, cos_sigma, cos_2sigma_m, false);
        }
    };

    let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_bearing;
    let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_bearing)
        .atan2((1.0 - f) * (sin_alpha * sin_alpha + tmp * tmp).sqrt());

    let lambda = (sin_sigma * sin_bearing).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_bearing);
    let c = series::coefficient_c(ellipsoid, cos_sq_alpha);
    let l = lambda
        - (1.0 - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
    let lon2 = (lon1 + l + 3.0 * PI).rem_euclid(2.0 * PI) - PI;

    let last = sin_alpha.atan2(-tmp);

    DirectSolution {
        destination: GeoPoint::new(lat2.to_degrees(), lon2.to_degrees()),
        final_bearing: bearing_degrees(last),
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FLINDERS_PEAK: (f64, f64) = (-37.951_033_42, 144.424_867_89);

    fn flinders_peak() -> (f64, f64) {
        (FLINDERS_PEAK.0.to_radians(), FLINDERS_PEAK.1.to_radians())
    }

    #[test]
    fn test_flinders_peak_reaches_buninyong() {
        let solution = solve(
            &Ellipsoid::WGS84,
            None,
            flinders_peak(),
            306.868_16_f64.to_radians(),
            54_972.271,
        );

        assert!(solution.converged);
        assert_relative_eq!(solution.destination.latitude, -37.652_821_14, epsilon = 1e-7);
        assert_relative_eq!(solution.destination.longitude, 143.926_495_51, epsilon = 1e-7);
        assert_relative_eq!(solution.final_bearing, 307.173_63, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_distance_stays_put() {
        let solution = solve(&Ellipsoid::WGS84, None, flinders_peak(), 1.0, 0.0);

        assert_eq!(solution.iterations, 1);
        assert_relative_eq!(solution.destination.latitude, FLINDERS_PEAK.0, epsilon = 1e-9);
        assert_relative_eq!(solution.destination.longitude, FLINDERS_PEAK.1, epsilon = 1e-9);
    }

    #[test]
    fn test_due_east_along_equator() {
        let solution = solve(&Ellipsoid::WGS84, None, (0.0, 0.0), PI / 2.0, 1_113_194.907_932);

        assert_relative_eq!(solution.destination.latitude, 0.0, epsilon = 1e-9);
        assert_relative_eq!(solution.destination.longitude, 10.0, epsilon = 1e-7);
        assert_relative_eq!(solution.final_bearing, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_longitude_wraps_across_antimeridian() {
        let solution = solve(&Ellipsoid::WGS84, None, (0.0, 179.5_f64.to_radians()), PI / 2.0, 111_319.490_793);

        assert_relative_eq!(solution.destination.longitude, -179.5, epsilon = 1e-6);
    }

    #[test]
    fn test_iteration_cap_changes_result() {
        let capped = solve(
            &Ellipsoid::WGS84,
            NonZeroU32::new(1),
            flinders_peak(),
            306.868_16_f64.to_radians(),
            54_972.271,
        );
        let unbounded = solve(&Ellipsoid::WGS84, None, flinders_peak(), 306.868_16_f64.to_radians(), 54_972.271);

        assert_eq!(capped.iterations, 1);
        assert!(!capped.converged);
        assert_ne!(capped.destination, unbounded.destination);
    }
}
