use log::{debug, error, info, trace};

use crate::{
    cfg::Config,
    error::Error,
    frame::Observer,
    orbit::OrbitalState,
    pass::{Horizon, PassRecord, PassTracker, Sample},
    prelude::{Epoch, TimeSeries},
    propagator::propagate_julian_day,
    time::julian_day_of,
    tle::ElementSet,
};

/// Outcome of the search, for one element set of the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Position in the batch
    pub index: usize,
    /// Object name
    pub name: String,
    /// Passes in chronological order, or the reason
    /// this object was skipped.
    pub outcome: Result<Vec<PassRecord>, Error>,
}

impl Prediction {
    /// Number of passes found (0 on error)
    pub fn num_passes(&self) -> usize {
        self.outcome.as_ref().map(|passes| passes.len()).unwrap_or(0)
    }
}

/// [Predictor] scans the search window of each object, from one [Observer] site.
#[derive(Debug, Clone)]
pub struct Predictor {
    /// Search parametrization
    cfg: Config,
    /// Ground site
    observer: Observer,
}

impl Predictor {
    /// Builds a new [Predictor].
    /// Fails with [Error::Configuration] on invalid search parameters.
    pub fn new(cfg: Config, observer: Observer) -> Result<Self, Error> {
        cfg.validate()?;

        debug!(
            "predictor: window={}h step={}s min_elev={}° site=({:.4}°, {:.4}°, {:.3}km)",
            cfg.search_window_hours,
            cfg.step_seconds,
            cfg.min_elevation_deg,
            observer.latitude().to_degrees(),
            observer.longitude().to_degrees(),
            observer.height_km(),
        );

        Ok(Self { cfg, observer })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Observation [Sample] of this [OrbitalState] at [Epoch].
    /// Returns None when the position or the look angles
    /// could not be resolved.
    pub fn sample(&self, state: &OrbitalState, t: Epoch) -> Option<Sample> {
        let jd = julian_day_of(t);
        let eci = propagate_julian_day(state, jd)?;

        let angles = self.observer.look_at(&eci, jd);
        if !angles.is_finite() {
            return None;
        }

        Some(Sample::new(t, angles.azimuth_deg(), angles.elevation_deg()))
    }

    /// Scans the search window, starting at `start`, and returns
    /// all passes of this [OrbitalState] that complete within that window.
    /// A pass still in progress when the window closes is not reported.
    pub fn passes(&self, state: &OrbitalState, start: Epoch) -> Vec<PassRecord> {
        let end = start + self.cfg.search_window();
        let mut tracker = PassTracker::new(self.cfg.min_elevation_deg);

        let mut passes = Vec::new();
        let mut unresolved = 0;

        for t in TimeSeries::inclusive(start, end, self.cfg.step()) {
            let Some(sample) = self.sample(state, t) else {
                unresolved += 1;
                trace!("({}) {} - unresolved position", state.catalog_number(), t);
                continue;
            };

            if let Some(pass) = tracker.update(sample) {
                debug!(
                    "({}) aos={} ({:.1}°) los={} ({:.1}°) peak={:.2}° ({:.1}°)",
                    state.catalog_number(),
                    pass.aos,
                    pass.aos_azimuth,
                    pass.los,
                    pass.los_azimuth,
                    pass.peak_elevation,
                    pass.peak_azimuth,
                );
                passes.push(pass);
            }
        }

        if unresolved > 0 {
            debug!(
                "({}) {} unresolved samples",
                state.catalog_number(),
                unresolved
            );
        }

        if tracker.horizon() == Horizon::AboveHorizon {
            debug!(
                "({}) pass in progress at {}: not reported",
                state.catalog_number(),
                end
            );
        }

        passes
    }

    /// Initializes one [ElementSet] and searches its passes.
    pub fn predict_one(&self, index: usize, set: &ElementSet, start: Epoch) -> Prediction {
        let outcome = match set.orbital_state() {
            Ok(state) => Ok(self.passes(&state, start)),
            Err(e) => {
                let e = Error::Parsing {
                    index,
                    name: set.name.clone(),
                    source: e,
                };
                error!("{}", e);
                Err(e)
            },
        };

        Prediction {
            index,
            name: set.name.clone(),
            outcome,
        }
    }

    /// Searches the passes of each [ElementSet] of this batch, starting at `start`.
    /// One [Prediction] is returned per set, in the same order.
    /// Malformed sets do not prevent the others from being processed.
    pub fn predict(&self, start: Epoch, sets: &[ElementSet]) -> Vec<Prediction> {
        let predictions = sets
            .iter()
            .enumerate()
            .map(|(index, set)| {
                let prediction = self.predict_one(index, set, start);
                if prediction.outcome.is_ok() {
                    info!(
                        "{} ({}): {} pass(es)",
                        set.name,
                        index,
                        prediction.num_passes()
                    );
                }
                prediction
            })
            .collect::<Vec<_>>();

        let failures = predictions.iter().filter(|p| p.outcome.is_err()).count();
        if failures > 0 {
            info!("{}/{} element set(s) skipped", failures, predictions.len());
        }

        predictions
    }
}
