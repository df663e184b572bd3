//! Julian dates and sidereal time
use std::f64::consts::TAU;

use crate::{
    constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD},
    prelude::Epoch,
};

/// Julian Date of given Gregorian calendar instant (UTC).
/// Day 0 of a month is accepted and designates the last day of the previous month,
/// so `julian_day(y, 1, 0, 0, 0, 0.0)` is the origin of day-of-year counts.
pub fn julian_day(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> f64 {
    let (y, m) = (year as f64, month as f64);
    367.0 * y - ((7.0 * (y + ((m + 9.0) / 12.0).floor())) * 0.25).floor()
        + (275.0 * m / 9.0).floor()
        + day as f64
        + 1721013.5
        + ((second / 60.0 + minute as f64) / 60.0 + hour as f64) / 24.0
}

/// Julian Date of this [Epoch], from its UTC calendar representation.
pub fn julian_day_of(t: Epoch) -> f64 {
    let (y, m, d, hh, mm, ss, ns) = t.to_gregorian_utc();
    let second = ss as f64 + ns as f64 * 1.0E-9;
    julian_day(y, m, d, hh, mm, second)
}

/// Greenwich Mean Sidereal Time (radians, within [0, 2π)) at given Julian Date (UT1 ~ UTC).
pub fn sidereal_time(jd: f64) -> f64 {
    let tut1 = (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY;

    // seconds of time
    let theta = -6.2E-6 * tut1.powi(3)
        + 0.093104 * tut1.powi(2)
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841;

    // 1s of time = 15 arcsec = 1/240 deg
    (theta.to_radians() / 240.0).rem_euclid(TAU)
}
