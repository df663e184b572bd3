//! Simplified near-earth propagation: the mean anomaly is advanced linearly
//! from the drag corrected mean motion, no secular nor periodic perturbation
//! is applied beyond the initializer correction.
use nalgebra::Vector3;

use crate::{
    constants::{EARTH_RADIUS_KM, MINUTES_PER_DAY},
    kepler,
    orbit::OrbitalState,
    prelude::Epoch,
    time::julian_day_of,
};

/// Inertial (ECI) position (km) of this [OrbitalState] at requested [Epoch].
/// Returns None when the position is not physically resolved (non finite),
/// which only happens for degenerate elements.
pub fn propagate(state: &OrbitalState, t: Epoch) -> Option<Vector3<f64>> {
    propagate_julian_day(state, julian_day_of(t))
}

/// [propagate] at requested Julian Date.
pub fn propagate_julian_day(state: &OrbitalState, jd: f64) -> Option<Vector3<f64>> {
    let t_since_min = (jd - state.epoch_jd) * MINUTES_PER_DAY;
    propagate_minutes(state, t_since_min)
}

/// [propagate] at requested time since epoch, in minutes.
pub fn propagate_minutes(state: &OrbitalState, t_since_min: f64) -> Option<Vector3<f64>> {
    let e = state.eccentricity;
    let a = state.semi_major_axis;

    let m_k = state.mean_anomaly + state.mean_motion * t_since_min;
    let e_k = kepler::solve(m_k, e).eccentric_anomaly;

    let (sin_e, cos_e) = e_k.sin_cos();

    let perifocal = Vector3::new(a * (cos_e - e), a * (1.0 - e * e).sqrt() * sin_e, 0.0);
    let position = state.perifocal_to_eci * perifocal * EARTH_RADIUS_KM;

    if position.iter().all(|c| c.is_finite()) {
        Some(position)
    } else {
        None
    }
}
