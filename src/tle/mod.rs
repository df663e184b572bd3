//! Two-Line Element sets
use std::{ops::RangeInclusive, str::FromStr};

use itertools::Itertools;
use log::warn;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::TLE_CENTURY_PIVOT,
    orbit::OrbitalState,
    time::julian_day,
};

/// Minimal length of either element set line
pub const TLE_LINE_LENGTH: usize = 69;

/// Element set parsing (and validation) errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsingError {
    #[error("line {line}: expecting {} characters, got {length}", TLE_LINE_LENGTH)]
    LineLength { line: u8, length: usize },
    #[error("line {line}: bad line number")]
    LineNumber { line: u8 },
    #[error("invalid {field}: \"{value}\"")]
    InvalidField { field: &'static str, value: String },
    #[error("catalog number mismatch: \"{0}\" (line 1) \"{1}\" (line 2)")]
    CatalogNumberMismatch(String, String),
    #[error("eccentricity {0} out of [0, 1) range")]
    InvalidEccentricity(f64),
    #[error("invalid mean motion {0} rev/day")]
    InvalidMeanMotion(f64),
}

/// Slices given (1-based, inclusive) TLE columns
fn columns<'a>(
    line: &'a str,
    cols: RangeInclusive<usize>,
    field: &'static str,
) -> Result<&'a str, ParsingError> {
    line.get(*cols.start() - 1..*cols.end())
        .map(str::trim)
        .ok_or_else(|| ParsingError::InvalidField {
            field,
            value: line.to_string(),
        })
}

fn parse_columns<T: FromStr>(
    line: &str,
    cols: RangeInclusive<usize>,
    field: &'static str,
) -> Result<T, ParsingError> {
    let content = columns(line, cols, field)?;
    content.parse::<T>().map_err(|_| ParsingError::InvalidField {
        field,
        value: content.to_string(),
    })
}

/// Modulo 10 checksum of the first 68 characters:
/// digits count for their value, '-' signs count for one.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .chars()
        .take(TLE_LINE_LENGTH - 1)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum();
    (sum % 10) as u8
}

fn verify_checksum(line: &str, line_number: u8) {
    let expected = checksum(line);
    match line[TLE_LINE_LENGTH - 1..].chars().next().and_then(|c| c.to_digit(10)) {
        Some(value) if value as u8 == expected => {},
        _ => warn!(
            "line {}: checksum mismatch (expecting {}): \"{}\"",
            line_number, expected, line
        ),
    }
}

fn check_line(line: &str, line_number: u8) -> Result<(), ParsingError> {
    if !line.is_ascii() || line.len() < TLE_LINE_LENGTH {
        return Err(ParsingError::LineLength {
            line: line_number,
            length: line.chars().count(),
        });
    }
    if !line.starts_with(char::from(b'0' + line_number)) {
        return Err(ParsingError::LineNumber { line: line_number });
    }
    verify_checksum(line, line_number);
    Ok(())
}

/// Decodes the "assumed decimal point" exponential notation,
/// like ` 12345-3` = 0.12345E-3 or `-11606-4` = -0.11606E-4.
fn parse_implied_decimal(
    line: &str,
    cols: RangeInclusive<usize>,
    field: &'static str,
) -> Result<f64, ParsingError> {
    let raw = columns(line, cols.clone(), field)?;
    let invalid = || ParsingError::InvalidField {
        field,
        value: raw.to_string(),
    };

    let (start, end) = (*cols.start(), *cols.end());
    let sign = match line.as_bytes()[start - 1] {
        b'-' => -1.0,
        b' ' | b'+' => 1.0,
        _ => return Err(invalid()),
    };

    let mantissa = columns(line, start + 1..=end - 2, field)?;
    let mantissa = if mantissa.is_empty() {
        0.0
    } else if mantissa.chars().all(|c| c.is_ascii_digit()) {
        format!("0.{}", mantissa)
            .parse::<f64>()
            .map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };

    let exponent = columns(line, end - 1..=end, field)?;
    let exponent = if exponent.is_empty() {
        0
    } else {
        exponent.parse::<i32>().map_err(|_| invalid())?
    };

    Ok(sign * mantissa * 10.0_f64.powi(exponent))
}

/// Raw orbital elements, as described by a TLE,
/// in the units of the format (degrees, revolutions per day).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwoLineElements {
    /// Satellite catalog number
    pub catalog_number: String,
    /// Epoch year (4 digits)
    pub epoch_year: i32,
    /// Epoch day of year, with fractional part (1.0 = January 1st, 00:00:00 UTC)
    pub epoch_day: f64,
    /// B* drag term (1/Earth radii)
    pub bstar: f64,
    /// Inclination (degrees)
    pub inclination_deg: f64,
    /// Right ascension of the ascending node (degrees)
    pub raan_deg: f64,
    /// Eccentricity
    pub eccentricity: f64,
    /// Argument of perigee (degrees)
    pub arg_perigee_deg: f64,
    /// Mean anomaly (degrees)
    pub mean_anomaly_deg: f64,
    /// Mean motion (revolutions per day)
    pub mean_motion_rev_day: f64,
}

impl TwoLineElements {
    /// Parses both lines of an element set.
    /// Leading and trailing whitespaces are tolerated, columns
    /// beyond the 69th are ignored.
    /// Checksum mismatches are reported (warning) but tolerated.
    pub fn parse(line1: &str, line2: &str) -> Result<Self, ParsingError> {
        let (line1, line2) = (line1.trim(), line2.trim());
        check_line(line1, 1)?;
        check_line(line2, 2)?;

        let catalog_number = columns(line1, 3..=7, "catalog number")?.to_string();
        let catalog_number_2 = columns(line2, 3..=7, "catalog number")?;
        if catalog_number != catalog_number_2 {
            return Err(ParsingError::CatalogNumberMismatch(
                catalog_number,
                catalog_number_2.to_string(),
            ));
        }

        let epoch_year = parse_columns::<i32>(line1, 19..=20, "epoch year")?;
        let epoch_year = if epoch_year < TLE_CENTURY_PIVOT {
            epoch_year + 2000
        } else {
            epoch_year + 1900
        };

        let epoch_day = parse_columns::<f64>(line1, 21..=32, "epoch day")?;
        let bstar = parse_implied_decimal(line1, 54..=61, "bstar")?;

        let eccentricity = columns(line2, 27..=33, "eccentricity")?;
        let eccentricity = if eccentricity.chars().all(|c| c.is_ascii_digit()) {
            format!("0.{}", eccentricity).parse::<f64>().ok()
        } else {
            None
        }
        .ok_or_else(|| ParsingError::InvalidField {
            field: "eccentricity",
            value: eccentricity.to_string(),
        })?;

        let elements = Self {
            catalog_number,
            epoch_year,
            epoch_day,
            bstar,
            eccentricity,
            inclination_deg: parse_columns(line2, 9..=16, "inclination")?,
            raan_deg: parse_columns(line2, 18..=25, "raan")?,
            arg_perigee_deg: parse_columns(line2, 35..=42, "argument of perigee")?,
            mean_anomaly_deg: parse_columns(line2, 44..=51, "mean anomaly")?,
            mean_motion_rev_day: parse_columns(line2, 53..=63, "mean motion")?,
        };

        elements.validate()?;
        Ok(elements)
    }

    /// Verifies these elements describe a closed orbit.
    pub fn validate(&self) -> Result<(), ParsingError> {
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(ParsingError::InvalidEccentricity(self.eccentricity));
        }
        if !(self.mean_motion_rev_day.is_finite() && self.mean_motion_rev_day > 0.0) {
            return Err(ParsingError::InvalidMeanMotion(self.mean_motion_rev_day));
        }
        for (field, value) in [
            ("epoch day", self.epoch_day),
            ("bstar", self.bstar),
            ("inclination", self.inclination_deg),
            ("raan", self.raan_deg),
            ("argument of perigee", self.arg_perigee_deg),
            ("mean anomaly", self.mean_anomaly_deg),
        ] {
            if !value.is_finite() {
                return Err(ParsingError::InvalidField {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Julian Date of the element set epoch
    pub fn epoch_julian_day(&self) -> f64 {
        julian_day(self.epoch_year, 1, 0, 0, 0, 0.0) + self.epoch_day
    }
}

/// Named element set, as found in three-line catalogs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementSet {
    /// Object name
    pub name: String,
    /// First line
    pub line1: String,
    /// Second line
    pub line2: String,
}

impl ElementSet {
    pub fn new(name: &str, line1: &str, line2: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
        }
    }

    /// Splits a three-line catalog (name, line 1, line 2) into [ElementSet]s.
    /// Blank lines are ignored. An incomplete trailing group is dropped.
    /// Nothing is parsed here: malformed sets are reported once initialized.
    pub fn parse_catalog(content: &str) -> Vec<Self> {
        let mut groups = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .tuples::<(_, _, _)>();

        let sets = groups
            .by_ref()
            .map(|(name, line1, line2)| Self::new(name, line1, line2))
            .collect::<Vec<_>>();

        let leftover = groups.into_buffer().count();
        if leftover > 0 {
            warn!("catalog: dropping {} trailing line(s)", leftover);
        }

        sets
    }

    /// Parses and initializes this set
    pub fn orbital_state(&self) -> Result<OrbitalState, ParsingError> {
        let elements = TwoLineElements::parse(&self.line1, &self.line2)?;
        OrbitalState::initialize(&elements)
    }
}
