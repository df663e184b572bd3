//! Pass detection
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Duration, Epoch};

/// One observation of the target, during the scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Sampling instant
    pub t: Epoch,
    /// Azimuth (degrees)
    pub azimuth: f64,
    /// Elevation (degrees)
    pub elevation: f64,
}

impl Sample {
    pub fn new(t: Epoch, azimuth: f64, elevation: f64) -> Self {
        Self {
            t,
            azimuth,
            elevation,
        }
    }
}

/// A complete pass, from rise (AOS) to set (LOS).
/// AOS and LOS are the first samples past each horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PassRecord {
    /// Acquisition of signal
    pub aos: Epoch,
    /// Azimuth at AOS (degrees)
    pub aos_azimuth: f64,
    /// Loss of signal
    pub los: Epoch,
    /// Azimuth at LOS (degrees)
    pub los_azimuth: f64,
    /// Culmination instant
    pub peak: Epoch,
    /// Culmination elevation (degrees)
    pub peak_elevation: f64,
    /// Azimuth at culmination (degrees)
    pub peak_azimuth: f64,
}

impl PassRecord {
    /// Pass duration, between AOS and LOS samples
    pub fn duration(&self) -> Duration {
        self.los - self.aos
    }
}

/// Observed state of the target with respect to the local horizon.
/// This is the public view of the tracker state: the internal state
/// also carries the AOS and culmination samples of the ongoing pass.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    #[default]
    BelowHorizon,
    AboveHorizon,
}

/// What we know about the ongoing pass
#[derive(Debug, Clone, Copy, PartialEq)]
struct Accumulator {
    aos: Sample,
    peak: Sample,
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
enum State {
    #[default]
    BelowHorizon,
    AboveHorizon(Accumulator),
}

impl From<State> for Horizon {
    fn from(state: State) -> Self {
        match state {
            State::BelowHorizon => Self::BelowHorizon,
            State::AboveHorizon(_) => Self::AboveHorizon,
        }
    }
}

/// [PassTracker] consumes the (chronological) [Sample] stream of one target
/// and emits a [PassRecord] each time a complete pass culminating
/// at or above the minimal elevation is observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassTracker {
    /// Minimal culmination (degrees)
    min_elevation: f64,
    state: State,
}

impl PassTracker {
    /// Builds a new [PassTracker], target initially below the horizon.
    pub fn new(min_elevation_deg: f64) -> Self {
        Self {
            min_elevation: min_elevation_deg,
            state: State::default(),
        }
    }

    pub fn horizon(&self) -> Horizon {
        self.state.into()
    }

    /// Culmination observed so far, when a pass is in progress
    pub fn peak(&self) -> Option<Sample> {
        match self.state {
            State::BelowHorizon => None,
            State::AboveHorizon(acc) => Some(acc.peak),
        }
    }

    /// Updates the state machine with a new [Sample].
    /// Returns the [PassRecord] this sample terminates, if any.
    pub fn update(&mut self, sample: Sample) -> Option<PassRecord> {
        match &mut self.state {
            State::BelowHorizon => {
                if sample.elevation >= 0.0 {
                    trace!("{} - aos (az={:.1}°)", sample.t, sample.azimuth);
                    self.state = State::AboveHorizon(Accumulator {
                        aos: sample,
                        peak: sample,
                    });
                }
                None
            },
            State::AboveHorizon(acc) => {
                if sample.elevation >= 0.0 {
                    if sample.elevation > acc.peak.elevation {
                        acc.peak = sample;
                    }
                    return None;
                }

                let (aos, peak) = (acc.aos, acc.peak);
                self.state = State::BelowHorizon;

                if peak.elevation < self.min_elevation {
                    trace!(
                        "{} - los: discarded pass (peak={:.2}° < {:.2}°)",
                        sample.t,
                        peak.elevation,
                        self.min_elevation
                    );
                    return None;
                }

                trace!("{} - los (az={:.1}°)", sample.t, sample.azimuth);

                Some(PassRecord {
                    aos: aos.t,
                    aos_azimuth: aos.azimuth,
                    los: sample.t,
                    los_azimuth: sample.azimuth,
                    peak: peak.t,
                    peak_elevation: peak.elevation,
                    peak_azimuth: peak.azimuth,
                })
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Horizon, PassTracker, Sample};
    use crate::prelude::{Epoch, Unit};
    use std::str::FromStr;

    fn samples(elevations: &[f64]) -> Vec<Sample> {
        let t0 = Epoch::from_str("2024-01-01T00:00:00 UTC").unwrap();
        elevations
            .iter()
            .enumerate()
            .map(|(i, elev)| {
                let t = t0 + (i as f64 * 10.0) * Unit::Second;
                Sample::new(t, 10.0 * i as f64, *elev)
            })
            .collect()
    }

    #[test]
    fn initial_state() {
        let tracker = PassTracker::new(0.0);
        assert_eq!(tracker.horizon(), Horizon::BelowHorizon);
        assert!(tracker.peak().is_none());
    }

    #[test]
    fn single_pass() {
        let stream = samples(&[-3.0, -0.5, 0.0, 4.0, 12.0, 9.0, 12.0, 2.0, -0.1, -4.0]);
        let mut tracker = PassTracker::new(0.0);

        let mut passes = Vec::new();
        for (i, sample) in stream.iter().enumerate() {
            if let Some(pass) = tracker.update(*sample) {
                passes.push(pass);
            }
            let expected = if (2..8).contains(&i) {
                Horizon::AboveHorizon
            } else {
                Horizon::BelowHorizon
            };
            assert_eq!(tracker.horizon(), expected, "sample #{}", i);
        }

        assert_eq!(passes.len(), 1);
        let pass = passes[0];

        // elevation 0° is above the horizon
        assert_eq!(pass.aos, stream[2].t);
        assert_eq!(pass.aos_azimuth, 20.0);
        assert_eq!(pass.los, stream[8].t);
        assert_eq!(pass.los_azimuth, 80.0);

        // first culmination is retained on ties
        assert_eq!(pass.peak, stream[4].t);
        assert_eq!(pass.peak_elevation, 12.0);
        assert_eq!(pass.peak_azimuth, 40.0);

        assert_eq!(pass.duration(), 60.0 * Unit::Second);
    }

    #[test]
    fn minimal_elevation_filter() {
        let stream = samples(&[-1.0, 1.0, 5.0, 1.0, -1.0, 2.0, 25.0, 3.0, -2.0]);

        let mut tracker = PassTracker::new(10.0);
        let passes = stream
            .iter()
            .filter_map(|sample| tracker.update(*sample))
            .collect::<Vec<_>>();

        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].peak_elevation, 25.0);
        assert_eq!(passes[0].aos, stream[5].t);

        let mut tracker = PassTracker::new(5.0);
        let passes = stream
            .iter()
            .filter_map(|sample| tracker.update(*sample))
            .collect::<Vec<_>>();

        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].peak_elevation, 5.0);
    }

    #[test]
    fn peak_tracking_restarts_at_aos() {
        let stream = samples(&[-1.0, 60.0, -1.0, 1.0, 3.0, 2.0, -1.0]);
        let mut tracker = PassTracker::new(0.0);

        let passes = stream
            .iter()
            .filter_map(|sample| tracker.update(*sample))
            .collect::<Vec<_>>();

        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].peak_elevation, 60.0);
        assert_eq!(passes[1].peak_elevation, 3.0);
        assert_eq!(passes[1].peak, stream[4].t);
    }

    #[test]
    fn unterminated_pass() {
        let stream = samples(&[-1.0, 1.0, 20.0, 30.0]);
        let mut tracker = PassTracker::new(0.0);

        for sample in stream.iter() {
            assert!(tracker.update(*sample).is_none());
        }

        assert_eq!(tracker.horizon(), Horizon::AboveHorizon);
        assert_eq!(tracker.peak().unwrap().elevation, 30.0);
    }

    #[test]
    fn already_above_at_start() {
        let stream = samples(&[5.0, 8.0, -1.0]);
        let mut tracker = PassTracker::new(0.0);

        let passes = stream
            .iter()
            .filter_map(|sample| tracker.update(*sample))
            .collect::<Vec<_>>();

        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].aos, stream[0].t);
    }
}
