//! Interpolation engine behaviour across methods and range boundaries

use phast_dispersion::core::{InterpolationEngine, InterpolationError};
use phast_dispersion::types::InterpolationMethod;

const TOL: f64 = 1e-9;

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a distance");
    assert!(
        (actual - expected).abs() < TOL * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

/// Monotonic cooling curve in report order (nearest point first)
fn curve() -> (Vec<f64>, Vec<f64>) {
    let temperatures = vec![20.0, 4.0, -10.0, -21.0, -33.0, -44.0, -52.0];
    let distances = vec![0.0, 40.0, 95.0, 160.0, 240.0, 330.0, 410.0];
    (temperatures, distances)
}

// ═══════════════════════════════════════════════════════════════════════════
// PRECONDITIONS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_fewer_than_two_samples_has_no_result() {
    for method in InterpolationMethod::ALL {
        assert_eq!(
            InterpolationEngine::interpolate(&[5.0], &[10.0], 5.0, method),
            None
        );
        assert_eq!(
            InterpolationEngine::try_interpolate(&[], &[], 0.0, method),
            Err(InterpolationError::InsufficientSamples(0))
        );
    }
}

#[test]
fn test_non_finite_target_has_no_result() {
    let (temps, dists) = curve();
    assert_eq!(
        InterpolationEngine::try_interpolate(&temps, &dists, f64::NAN, InterpolationMethod::Linear),
        Err(InterpolationError::NonFiniteTarget)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// RANGE POLICY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_above_hottest_sample_has_no_result_for_every_method() {
    let (temps, dists) = curve();
    for method in InterpolationMethod::ALL {
        assert_eq!(
            InterpolationEngine::interpolate(&temps, &dists, 20.5, method),
            None,
            "{method} must not extrapolate upwind"
        );
        assert!(matches!(
            InterpolationEngine::try_interpolate(&temps, &dists, 20.5, method),
            Err(InterpolationError::AboveRange { .. })
        ));
    }
}

#[test]
fn test_below_coldest_sample_returns_farthest_distance_for_every_method() {
    let (temps, dists) = curve();
    for method in InterpolationMethod::ALL {
        assert_eq!(
            InterpolationEngine::interpolate(&temps, &dists, -80.0, method),
            Some(410.0),
            "{method}"
        );
    }
}

#[test]
fn test_unsorted_input_is_sorted_by_temperature() {
    let temperatures = [-33.0, 20.0, -10.0, 4.0];
    let distances = [240.0, 0.0, 95.0, 40.0];
    assert_eq!(
        InterpolationEngine::interpolate(&temperatures, &distances, -50.0, InterpolationMethod::Linear),
        Some(240.0)
    );
    assert_close(
        InterpolationEngine::interpolate(&temperatures, &distances, -3.0, InterpolationMethod::Linear),
        67.5,
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// METHODS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_linear_two_samples_midpoint() {
    let result = InterpolationEngine::interpolate(
        &[10.0, -30.0],
        &[100.0, 500.0],
        -10.0,
        InterpolationMethod::Linear,
    );
    assert_close(result, 300.0);
}

#[test]
fn test_every_method_hits_sample_temperatures_exactly() {
    let (temps, dists) = curve();
    for method in InterpolationMethod::ALL {
        for (t, d) in temps.iter().zip(&dists) {
            assert_close(InterpolationEngine::interpolate(&temps, &dists, *t, method), *d);
        }
    }
}

#[test]
fn test_undersampled_fits_fall_back_to_linear() {
    let two = ([12.0, -18.0], [30.0, 210.0]);
    let three = ([12.0, -3.0, -18.0], [30.0, 90.0, 210.0]);

    for target in [11.0, 0.0, -7.5, -17.0] {
        let linear = InterpolationEngine::interpolate(&two.0, &two.1, target, InterpolationMethod::Linear);
        assert_eq!(
            InterpolationEngine::interpolate(&two.0, &two.1, target, InterpolationMethod::Quadratic),
            linear
        );
        assert_eq!(
            InterpolationEngine::interpolate(&two.0, &two.1, target, InterpolationMethod::Cubic),
            linear
        );

        let linear =
            InterpolationEngine::interpolate(&three.0, &three.1, target, InterpolationMethod::Linear);
        assert_eq!(
            InterpolationEngine::interpolate(&three.0, &three.1, target, InterpolationMethod::Cubic),
            linear
        );
    }
}

#[test]
fn test_quadratic_three_samples_is_the_parabola() {
    // d = T^2 through T = -2, 0, 3
    let temps = [3.0, 0.0, -2.0];
    let dists = [9.0, 0.0, 4.0];
    assert_close(
        InterpolationEngine::interpolate(&temps, &dists, 1.5, InterpolationMethod::Quadratic),
        2.25,
    );
    assert_close(
        InterpolationEngine::interpolate(&temps, &dists, -1.0, InterpolationMethod::Quadratic),
        1.0,
    );
}

#[test]
fn test_cubic_follows_smooth_cubic_curve() {
    let f = |t: f64| 0.01 * t * t * t - 0.5 * t * t - 8.0 * t + 100.0;
    let temps: Vec<f64> = (0..9).map(|i| 10.0 - 7.5 * i as f64).collect();
    let dists: Vec<f64> = temps.iter().map(|&t| f(t)).collect();

    for target in [7.0, -12.3, -41.0, -48.5] {
        assert_close(
            InterpolationEngine::interpolate(&temps, &dists, target, InterpolationMethod::Cubic),
            f(target),
        );
    }
}

#[test]
fn test_nearest_returns_sample_distance() {
    let (temps, dists) = curve();
    assert_eq!(
        InterpolationEngine::interpolate(&temps, &dists, -12.0, InterpolationMethod::Nearest),
        Some(95.0)
    );
    assert_eq!(
        InterpolationEngine::interpolate(&temps, &dists, -19.0, InterpolationMethod::Nearest),
        Some(160.0)
    );
}

#[test]
fn test_methods_agree_on_near_linear_data() {
    let temps: Vec<f64> = (0..6).map(|i| 10.0 - 10.0 * i as f64).collect();
    let dists: Vec<f64> = (0..6).map(|i| 50.0 * i as f64).collect();

    for method in [
        InterpolationMethod::Linear,
        InterpolationMethod::Quadratic,
        InterpolationMethod::Cubic,
    ] {
        assert_close(
            InterpolationEngine::interpolate(&temps, &dists, -15.0, method),
            125.0,
        );
    }
}
