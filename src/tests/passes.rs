use crate::{
    prelude::{Config, Epoch, OrbitalState, PassRecord, Predictor, Unit},
    tests::{init_logger, iss_epoch, paris, ISS_LINE1, ISS_LINE2},
};

use rstest::*;
use std::str::FromStr;

fn iss_passes(cfg: Config, start: Epoch) -> Vec<PassRecord> {
    let state = OrbitalState::from_tle(ISS_LINE1, ISS_LINE2).unwrap();
    let predictor = Predictor::new(cfg, paris()).unwrap();
    predictor.passes(&state, start)
}

#[test]
fn single_pass() {
    init_logger();

    let epoch = iss_epoch();
    let start = Epoch::from_str("2024-01-01T12:15:00 UTC").unwrap();
    let cfg = Config::default().with_search_window_hours(0.5);

    let passes = iss_passes(cfg, start);
    assert_eq!(passes.len(), 1);

    let pass = passes[0];

    assert_eq!(pass.aos, epoch + 1060.0 * Unit::Second);
    assert_eq!(pass.los, epoch + 1710.0 * Unit::Second);
    assert_eq!(pass.peak, epoch + 1380.0 * Unit::Second);
    assert_eq!(pass.duration(), 650.0 * Unit::Second);

    assert!((pass.peak_elevation - 49.989).abs() < 1.0E-2);
    assert!((pass.aos_azimuth - 276.10).abs() < 1.0E-1);
    assert!((pass.los_azimuth - 82.15).abs() < 1.0E-1);
    assert!((pass.peak_azimuth - 358.59).abs() < 1.0E-1);
}

#[rstest]
#[case(0.0, 1)]
#[case(45.0, 1)]
#[case(49.0, 1)]
#[case(51.0, 0)]
#[case(90.0, 0)]
fn minimal_elevation(#[case] min_elevation_deg: f64, #[case] expected: usize) {
    init_logger();

    let start = Epoch::from_str("2024-01-01T12:15:00 UTC").unwrap();
    let cfg = Config::default()
        .with_search_window_hours(0.5)
        .with_min_elevation_deg(min_elevation_deg);

    let passes = iss_passes(cfg, start);
    assert_eq!(passes.len(), expected, "min_elev={}°", min_elevation_deg);
}

#[test]
fn one_day_of_passes() {
    init_logger();

    let epoch = iss_epoch();
    let passes = iss_passes(Config::default(), epoch);

    assert_eq!(passes.len(), 7);

    for (nth, sample) in [106.0, 688.0, 1269.0].iter().enumerate() {
        assert_eq!(
            passes[nth].aos,
            epoch + (sample * 10.0) * Unit::Second,
            "pass #{}",
            nth
        );
    }

    for (nth, peak) in [49.989, 80.64, 26.04, 3.13].iter().enumerate() {
        assert!(
            (passes[nth].peak_elevation - peak).abs() < 5.0E-2,
            "pass #{}: peak {}°",
            nth,
            passes[nth].peak_elevation
        );
    }

    for pass in passes.iter() {
        assert!(pass.aos < pass.peak && pass.peak < pass.los);
        assert!(pass.peak_elevation >= 0.0 && pass.peak_elevation <= 90.0);
        assert!((0.0..360.0).contains(&pass.aos_azimuth));
        assert!((0.0..360.0).contains(&pass.los_azimuth));

        // sampled, not interpolated
        let offset = (pass.aos - epoch).to_seconds();
        assert_eq!(offset % 10.0, 0.0);
        let offset = (pass.los - epoch).to_seconds();
        assert_eq!(offset % 10.0, 0.0);

        assert!(pass.los <= epoch + 1.0 * Unit::Day);
    }

    for window in passes.windows(2) {
        assert!(window[0].los < window[1].aos, "overlapping passes");
    }
}

#[test]
fn filtered_passes_are_a_subset() {
    init_logger();

    let epoch = iss_epoch();
    let all = iss_passes(Config::default(), epoch);
    let filtered = iss_passes(Config::default().with_min_elevation_deg(10.0), epoch);

    assert!(!filtered.is_empty());
    assert!(filtered.len() < all.len());

    for pass in filtered.iter() {
        assert!(pass.peak_elevation >= 10.0);
        assert!(all.contains(pass));
    }

    let expected = all
        .iter()
        .filter(|pass| pass.peak_elevation >= 10.0)
        .count();
    assert_eq!(filtered.len(), expected);
}

#[test]
fn pass_in_progress_at_window_end() {
    init_logger();

    let epoch = iss_epoch();

    // first pass spans samples #106 to #171
    let passes = iss_passes(Config::default().with_search_window_hours(0.4), epoch);
    assert!(passes.is_empty());

    let passes = iss_passes(Config::default().with_search_window_hours(0.5), epoch);
    assert_eq!(passes.len(), 1);
}

#[test]
fn pass_in_progress_at_window_start() {
    init_logger();

    let epoch = iss_epoch();

    // already above the horizon: AOS is the first sample
    let start = epoch + 1200.0 * Unit::Second;
    let passes = iss_passes(Config::default().with_search_window_hours(0.25), start);

    assert_eq!(passes.len(), 1);
    assert_eq!(passes[0].aos, start);
    assert_eq!(passes[0].los, epoch + 1710.0 * Unit::Second);
}

#[test]
fn coarser_step() {
    init_logger();

    let epoch = iss_epoch();
    let cfg = Config::default()
        .with_search_window_hours(0.5)
        .with_step_seconds(60.0);

    let passes = iss_passes(cfg, epoch);
    assert_eq!(passes.len(), 1);

    // quantized to the minute
    assert_eq!(passes[0].aos, epoch + 1080.0 * Unit::Second);
    assert_eq!(passes[0].los, epoch + 1740.0 * Unit::Second);
}

#[cfg(feature = "serde")]
#[test]
fn pass_record_serdes() {
    let start = Epoch::from_str("2024-01-01T12:15:00 UTC").unwrap();
    let passes = iss_passes(Config::default().with_search_window_hours(0.5), start);

    let content = serde_json::to_string(&passes[0]).unwrap();
    let parsed: PassRecord = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.aos, passes[0].aos);
    assert_eq!(parsed.los, passes[0].los);
}
