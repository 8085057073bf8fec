//! Series coefficients shared by the inverse and direct solvers
//!
//! `A` and `B` use Vincenty's 1976 expansion in `k`, which is equivalent to
//! the original polynomial in `u²` but better behaved for long lines.

use std::f64::consts::TAU;
use std::num::NonZeroU32;

use super::ellipsoid::Ellipsoid;

/// `u² = cos²α · (a² − b²) / b²`
pub fn reduced_u_squared(ellipsoid: &Ellipsoid, cos_sq_alpha: f64) -> f64 {
    let a = ellipsoid.equatorial_radius();
    let b = ellipsoid.polar_radius();
    cos_sq_alpha * (a * a - b * b) / (b * b)
}

/// `k = (√(1+u²) − 1) / (√(1+u²) + 1)`
pub fn series_coefficient(u_sq: f64) -> f64 {
    let root = (1.0 + u_sq).sqrt();
    (root - 1.0) / (root + 1.0)
}

pub fn coefficient_a(k: f64) -> f64 {
    (1.0 + k * k / 4.0) / (1.0 - k)
}

pub fn coefficient_b(k: f64) -> f64 {
    k * (1.0 - 3.0 * k * k / 8.0)
}

pub fn coefficient_c(ellipsoid: &Ellipsoid, cos_sq_alpha: f64) -> f64 {
    let f = ellipsoid.flattening();
    f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha))
}

/// Difference between the geodesic's angular length on the auxiliary sphere
/// and on the ellipsoid
pub fn delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos_sq_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_sq_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_sq_2sigma_m)))
}

/// Wraps an angle in radians into `[0, 2π)`
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative angle rounds up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Converts a bearing in radians to degrees in `[0, 360)`
pub fn bearing_degrees(angle: f64) -> f64 {
    let degrees = wrap_two_pi(angle).to_degrees();
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

pub(crate) fn cap_reached(cap: Option<NonZeroU32>, iterations: u32) -> bool {
    cap.is_some_and(|cap| iterations >= cap.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_u_squared_vanishes_on_meridian_free_line() {
        assert_eq!(reduced_u_squared(&Ellipsoid::WGS84, 0.0), 0.0);
    }

    #[test]
    fn test_u_squared_is_second_eccentricity_at_full_cos() {
        // e'^2 for WGS84
        assert_relative_eq!(reduced_u_squared(&Ellipsoid::WGS84, 1.0), 0.006_739_496_742_333, epsilon = 1e-12);
    }

    #[test]
    fn test_coefficients_at_zero() {
        let k = series_coefficient(0.0);
        assert_eq!(k, 0.0);
        assert_eq!(coefficient_a(k), 1.0);
        assert_eq!(coefficient_b(k), 0.0);
        assert_eq!(delta_sigma(0.0, 0.5, 0.5, 0.5), 0.0);
    }

    #[test]
    fn test_k_series_matches_polynomial_series() {
        // Vincenty's original polynomial forms of A and B
        let u_sq = reduced_u_squared(&Ellipsoid::WGS84, 0.7);
        let a_poly = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let b_poly = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let k = series_coefficient(u_sq);
        assert_relative_eq!(coefficient_a(k), a_poly, epsilon = 1e-10);
        assert_relative_eq!(coefficient_b(k), b_poly, epsilon = 1e-10);
    }

    #[test]
    fn test_coefficient_c() {
        let f = Ellipsoid::WGS84.flattening();
        assert_eq!(coefficient_c(&Ellipsoid::WGS84, 0.0), 0.0);
        assert_relative_eq!(coefficient_c(&Ellipsoid::WGS84, 1.0), f / 16.0 * (4.0 + f), epsilon = 1e-18);
    }

    #[test]
    fn test_wrap_two_pi() {
        assert_eq!(wrap_two_pi(0.0), 0.0);
        assert_relative_eq!(wrap_two_pi(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_two_pi(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(wrap_two_pi(-1e-18), 0.0);
    }

    #[test]
    fn test_bearing_degrees() {
        assert_relative_eq!(bearing_degrees(-PI / 2.0), 270.0, epsilon = 1e-9);
        assert_relative_eq!(bearing_degrees(PI), 180.0, epsilon = 1e-9);
        assert!(bearing_degrees(-1e-17) < 360.0);
    }

    #[test]
    fn test_cap_reached() {
        assert!(!cap_reached(None, u32::MAX));
        assert!(cap_reached(NonZeroU32::new(1), 1));
        assert!(!cap_reached(NonZeroU32::new(3), 2));
    }
}
