use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Duration, Unit};

/// Configuration Error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("latitude {0}° out of [-90, 90] range")]
    InvalidLatitude(f64),
    #[error("longitude {0}° out of [-180, 360) range")]
    InvalidLongitude(f64),
    #[error("invalid observer height: {0} km")]
    InvalidHeight(f64),
    #[error("search window must be positive (got {0} h)")]
    InvalidSearchWindow(f64),
    #[error("scan step must be positive and fit in the search window (got {0} s)")]
    InvalidStep(f64),
    #[error("minimum elevation {0}° out of [0, 90] range")]
    InvalidMinElevation(f64),
}

fn default_search_window_hours() -> f64 {
    24.0
}

fn default_min_elevation_deg() -> f64 {
    0.0
}

fn default_step_seconds() -> f64 {
    10.0
}

/// Pass search parametrization
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Search window length (hours), starting at the requested instant.
    #[cfg_attr(feature = "serde", serde(default = "default_search_window_hours"))]
    pub search_window_hours: f64,
    /// Passes culminating under this elevation (degrees) are not reported.
    #[cfg_attr(feature = "serde", serde(default = "default_min_elevation_deg"))]
    pub min_elevation_deg: f64,
    /// Scan step (seconds). Reported AOS and LOS instants are
    /// sampled ones, hence quantized by this step.
    #[cfg_attr(feature = "serde", serde(default = "default_step_seconds"))]
    pub step_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_window_hours: default_search_window_hours(),
            min_elevation_deg: default_min_elevation_deg(),
            step_seconds: default_step_seconds(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with updated search window (hours)
    pub fn with_search_window_hours(&self, hours: f64) -> Self {
        let mut s = self.clone();
        s.search_window_hours = hours;
        s
    }

    /// Copies and returns [Config] with updated minimal elevation (degrees)
    pub fn with_min_elevation_deg(&self, elevation_deg: f64) -> Self {
        let mut s = self.clone();
        s.min_elevation_deg = elevation_deg;
        s
    }

    /// Copies and returns [Config] with updated scan step (seconds)
    pub fn with_step_seconds(&self, step_s: f64) -> Self {
        let mut s = self.clone();
        s.step_seconds = step_s;
        s
    }

    /// Search window, as [Duration]
    pub fn search_window(&self) -> Duration {
        self.search_window_hours * Unit::Hour
    }

    /// Scan step, as [Duration]
    pub fn step(&self) -> Duration {
        self.step_seconds * Unit::Second
    }

    /// Verifies this [Config] is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.search_window_hours.is_finite() && self.search_window_hours > 0.0) {
            return Err(Error::InvalidSearchWindow(self.search_window_hours));
        }
        // nanosecond resolution: sub-nanosecond steps would never advance
        if !(self.step_seconds.is_finite()
            && self.step() > Duration::ZERO
            && self.step() <= self.search_window())
        {
            return Err(Error::InvalidStep(self.step_seconds));
        }
        if !(0.0..=90.0).contains(&self.min_elevation_deg) {
            return Err(Error::InvalidMinElevation(self.min_elevation_deg));
        }
        Ok(())
    }
}
