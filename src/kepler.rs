use log::trace;

use crate::constants::{KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE_RAD};

/// Kepler equation solution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly (rad)
    pub eccentric_anomaly: f64,
    /// Number of iterations performed
    pub iterations: usize,
    /// False when the iteration budget was exhausted before
    /// the increment fell under tolerance.
    pub converged: bool,
}

/// Solves Kepler's equation M = E - e sin(E) for the eccentric anomaly E,
/// using Newton iterations starting at E = M.
/// The last iterate is returned when the process does not converge,
/// which only happens for high eccentricities.
pub fn solve(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    let mut e_k = mean_anomaly;

    for iteration in 1..=KEPLER_MAX_ITERATIONS {
        let delta = (mean_anomaly - e_k + eccentricity * e_k.sin())
            / (1.0 - eccentricity * e_k.cos());

        e_k += delta;

        if delta.abs() < KEPLER_TOLERANCE_RAD {
            return KeplerSolution {
                eccentric_anomaly: e_k,
                iterations: iteration,
                converged: true,
            };
        }
    }

    trace!(
        "kepler: no convergence after {} iterations (M={}, e={})",
        KEPLER_MAX_ITERATIONS,
        mean_anomaly,
        eccentricity
    );

    KeplerSolution {
        eccentric_anomaly: e_k,
        iterations: KEPLER_MAX_ITERATIONS,
        converged: false,
    }
}
