use crate::prelude::{ElementSet, Epoch, Observer};
use std::str::FromStr;

/// ISS-like element set, epoch 2024-01-01T12:00:00 UTC
pub const ISS_LINE1: &str =
    "1 25544U 98067A   24001.50000000  .00016717  00000-0  30000-3 0  9990";

pub const ISS_LINE2: &str =
    "2 25544  51.6400 200.0000 0006000  50.0000 310.0000 15.50000000000017";

/// ISS_LINE1 with a truncated B* field
pub const TRUNCATED_LINE1: &str = "1 25544U 98067A   24001.50000000  .00016717  00000-0  300";

/// Element set epoch
pub fn iss_epoch() -> Epoch {
    Epoch::from_str("2024-01-01T12:00:00 UTC").unwrap()
}

/// Paris, 35m above the ellipsoid
pub fn paris() -> Observer {
    Observer::from_degrees(48.85, 2.35, 0.035).unwrap()
}

/// Three-line catalog: valid, malformed, valid.
pub fn catalog() -> String {
    format!(
        "ISS (ZARYA)\n{}\n{}\n\nBROKEN\n{}\n{}\nISS (COPY)\n{}\n{}\n",
        ISS_LINE1, ISS_LINE2, TRUNCATED_LINE1, ISS_LINE2, ISS_LINE1, ISS_LINE2
    )
}

pub fn iss() -> ElementSet {
    ElementSet::new("ISS (ZARYA)", ISS_LINE1, ISS_LINE2)
}
