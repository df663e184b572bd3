#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

pub mod constants;
pub mod kepler;
pub mod propagator;
pub mod time;

// private modules
mod cfg;
mod error;
mod frame;
mod orbit;
mod pass;
mod predictor;
mod tle;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, Error as ConfigError};
    pub use crate::error::Error;
    pub use crate::frame::{eci_to_ecf, geodetic_to_ecf, LookAngles, Observer};
    pub use crate::kepler::KeplerSolution;
    pub use crate::orbit::OrbitalState;
    pub use crate::pass::{Horizon, PassRecord, PassTracker, Sample};
    pub use crate::predictor::{Prediction, Predictor};
    pub use crate::time::{julian_day, julian_day_of, sidereal_time};
    pub use crate::tle::{checksum, ElementSet, ParsingError, TwoLineElements};
    // re-export
    pub use hifitime::{Duration, Epoch, TimeScale, TimeSeries, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
