use std::f64::consts::TAU;

use log::{debug, warn};
use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{
        AE, CK2, DEEP_SPACE_PERIOD_MINUTES, EARTH_RADIUS_KM, LOW_PERIGEE_ALTITUDE_KM,
        MINUTES_PER_DAY, XKE,
    },
    prelude::{Epoch, Unit},
    propagator,
    tle::{ParsingError, TwoLineElements},
};

/// [OrbitalState] is the initialized (mean) orbit of one object,
/// at its element set epoch. It is never modified once built:
/// positions at other instants are obtained with [OrbitalState::position_at].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalState {
    /// Satellite catalog number
    pub(crate) catalog_number: String,
    /// Epoch, as Julian Date
    pub(crate) epoch_jd: f64,
    /// Epoch, as UTC [Epoch]
    pub(crate) epoch: Epoch,
    /// Drag corrected mean motion (rad.min⁻¹)
    pub(crate) mean_motion: f64,
    pub(crate) eccentricity: f64,
    /// Inclination (rad)
    pub(crate) inclination: f64,
    /// Right ascension of the ascending node (rad)
    pub(crate) raan: f64,
    /// Argument of perigee (rad)
    pub(crate) arg_perigee: f64,
    /// Mean anomaly at epoch (rad)
    pub(crate) mean_anomaly: f64,
    /// B* drag term
    pub(crate) bstar: f64,
    /// Drag corrected semi major axis (Earth radii)
    pub(crate) semi_major_axis: f64,
    /// Perigee altitude (km)
    pub(crate) perigee_altitude_km: f64,
    /// Perifocal to inertial frame rotation: Rz(Ω) Rx(i) Rz(ω)
    pub(crate) perifocal_to_eci: Rotation3<f64>,
}

impl OrbitalState {
    /// Initializes an [OrbitalState] from raw [TwoLineElements].
    /// Mean motion is converted to rad.min⁻¹ then both mean motion
    /// and semi major axis are corrected, once, for the first order
    /// oblateness (J2) bias of the element set mean elements.
    pub fn initialize(elements: &TwoLineElements) -> Result<Self, ParsingError> {
        elements.validate()?;

        let eccentricity = elements.eccentricity;
        let inclination = elements.inclination_deg.to_radians().rem_euclid(TAU);
        let raan = elements.raan_deg.to_radians().rem_euclid(TAU);
        let arg_perigee = elements.arg_perigee_deg.to_radians().rem_euclid(TAU);
        let mean_anomaly = elements.mean_anomaly_deg.to_radians().rem_euclid(TAU);

        let n_0 = elements.mean_motion_rev_day * TAU / MINUTES_PER_DAY;

        let a_1 = (XKE / n_0).powf(2.0 / 3.0);
        let cos_i = inclination.cos();
        let x3thm1 = 3.0 * cos_i * cos_i - 1.0;
        let beta_0_sq = 1.0 - eccentricity * eccentricity;
        let beta_0_cubed = beta_0_sq * beta_0_sq.sqrt();

        let delta_1 = 1.5 * CK2 * x3thm1 / (a_1 * a_1 * beta_0_cubed);
        let a_0 = a_1
            * (1.0 - delta_1 * (1.0 / 3.0 + delta_1 * (1.0 + 134.0 / 81.0 * delta_1)));
        let delta_0 = 1.5 * CK2 * x3thm1 / (a_0 * a_0 * beta_0_cubed);

        let mean_motion = n_0 / (1.0 + delta_0);
        let semi_major_axis = a_0 / (1.0 - delta_0);
        let perigee_altitude_km = (semi_major_axis * (1.0 - eccentricity) - AE) * EARTH_RADIUS_KM;

        let epoch_jd = elements.epoch_julian_day();
        let epoch = Epoch::from_gregorian_utc_at_midnight(elements.epoch_year, 1, 1)
            + (elements.epoch_day - 1.0) * Unit::Day;

        let perifocal_to_eci = Rotation3::from_axis_angle(&Vector3::z_axis(), raan)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), arg_perigee);

        let state = Self {
            catalog_number: elements.catalog_number.clone(),
            epoch_jd,
            epoch,
            mean_motion,
            eccentricity,
            inclination,
            raan,
            arg_perigee,
            mean_anomaly,
            bstar: elements.bstar,
            semi_major_axis,
            perigee_altitude_km,
            perifocal_to_eci,
        };

        debug!(
            "({}) initialized: epoch={} a={:.6}RE n={:.8}rad/min perigee={:.3}km",
            state.catalog_number, epoch, semi_major_axis, mean_motion, perigee_altitude_km
        );

        if state.is_low_perigee() {
            debug!(
                "({}) low perigee ({:.3}km < {}km)",
                state.catalog_number, perigee_altitude_km, LOW_PERIGEE_ALTITUDE_KM
            );
        }

        if state.is_deep_space() {
            warn!(
                "({}) deep space orbit (period={:.1}min): propagated with near-earth model",
                state.catalog_number,
                state.period_minutes()
            );
        }

        Ok(state)
    }

    /// Parses and initializes both lines of an element set.
    pub fn from_tle(line1: &str, line2: &str) -> Result<Self, ParsingError> {
        let elements = TwoLineElements::parse(line1, line2)?;
        Self::initialize(&elements)
    }

    /// Inertial (ECI) position in kilometers at requested instant,
    /// or None when it cannot be resolved.
    pub fn position_at(&self, t: Epoch) -> Option<Vector3<f64>> {
        propagator::propagate(self, t)
    }

    pub fn catalog_number(&self) -> &str {
        &self.catalog_number
    }

    /// Element set epoch, as Julian Date
    pub fn epoch_julian_day(&self) -> f64 {
        self.epoch_jd
    }

    /// Element set epoch
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Drag corrected mean motion (rad.min⁻¹)
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Inclination (rad)
    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Right ascension of the ascending node (rad)
    pub fn raan(&self) -> f64 {
        self.raan
    }

    /// Argument of perigee (rad)
    pub fn arg_perigee(&self) -> f64 {
        self.arg_perigee
    }

    /// Mean anomaly at epoch (rad)
    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }

    pub fn bstar(&self) -> f64 {
        self.bstar
    }

    /// Drag corrected semi major axis (Earth radii)
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn perigee_altitude_km(&self) -> f64 {
        self.perigee_altitude_km
    }

    /// True when perigee lies under 220 km.
    /// This is informative only and does not modify the propagation.
    pub fn is_low_perigee(&self) -> bool {
        self.perigee_altitude_km < LOW_PERIGEE_ALTITUDE_KM
    }

    /// Orbital period (minutes)
    pub fn period_minutes(&self) -> f64 {
        TAU / self.mean_motion
    }

    /// True when period exceeds 225 minutes.
    /// This is informative only: deep space terms are not modeled.
    pub fn is_deep_space(&self) -> bool {
        self.period_minutes() >= DEEP_SPACE_PERIOD_MINUTES
    }
}
