//! Two-Line Element sets
use sgp4::Elements;

use crate::{
    constants::{
        EARTH_GRAVITATION_MU_KM3_S2, EARTH_SEMI_MAJOR_AXIS_WGS84_KM, SECONDS_PER_DAY,
        TLE_LINE_WIDTH, UNKNOWN_OBJECT_NAME,
    },
    error::FormatError,
    prelude::Epoch,
    time::epoch_from_naive_utc,
};

/// Modulo 10 checksum of a TLE element line: sum of all digits
/// of the first 68 columns, minus signs counting for one.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .chars()
        .take(TLE_LINE_WIDTH - 1)
        .map(|c| match c {
            '0'..='9' => c as u32 - '0' as u32,
            '-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Verifies the fixed width layout of element line number `line`.
fn check_columns(content: &str, line: u8) -> Result<(), FormatError> {
    if !content.is_ascii() {
        return Err(FormatError::Field {
            line,
            columns: "1-69",
            cause: "non ascii content".to_string(),
        });
    }

    let found = content.len();
    if found != TLE_LINE_WIDTH {
        return Err(FormatError::LineWidth { line, found });
    }

    let prefix = format!("{} ", line);
    if !content.starts_with(&prefix) {
        return Err(FormatError::LineNumber { line });
    }

    let catalog = &content[2..7];
    if !catalog.trim().chars().all(|c| c.is_ascii_alphanumeric()) || catalog.trim().is_empty() {
        return Err(FormatError::Field {
            line,
            columns: "3-7",
            cause: format!("invalid catalog number \"{}\"", catalog),
        });
    }

    let found = content.as_bytes()[TLE_LINE_WIDTH - 1];
    if !found.is_ascii_digit() {
        return Err(FormatError::Field {
            line,
            columns: "69",
            cause: "checksum is not a digit".to_string(),
        });
    }

    let found = found - b'0';
    let computed = checksum(content);
    if found != computed {
        return Err(FormatError::Checksum {
            line,
            found,
            computed,
        });
    }

    Ok(())
}

/// Title lines of 3LE files are sometimes prefixed with "0 ".
fn object_name(title: &str) -> String {
    let title = title.trim();
    let title = title.strip_prefix("0 ").unwrap_or(title).trim();
    if title.is_empty() {
        UNKNOWN_OBJECT_NAME.to_string()
    } else {
        title.to_string()
    }
}

/// [TleRecord] is a validated element set. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct TleRecord {
    name: String,
    line1: String,
    line2: String,
    epoch: Epoch,
    elements: Elements,
}

impl TleRecord {
    /// Parses a [TleRecord] from its title and both element lines.
    /// Each element line must be exactly 69 columns wide, start with
    /// its line number, share the catalog number and pass its checksum.
    pub fn parse(name: &str, line1: &str, line2: &str) -> Result<Self, FormatError> {
        let (line1, line2) = (line1.trim(), line2.trim());

        check_columns(line1, 1)?;
        check_columns(line2, 2)?;

        let (cat1, cat2) = (line1[2..7].trim(), line2[2..7].trim());
        if cat1 != cat2 {
            return Err(FormatError::CatalogNumberMismatch(
                cat1.to_string(),
                cat2.to_string(),
            ));
        }

        let name = object_name(name);

        let elements = Elements::from_tle(Some(name.clone()), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| FormatError::Elements(format!("{:?}", e)))?;

        let epoch = epoch_from_naive_utc(&elements.datetime);

        Ok(Self {
            name,
            epoch,
            elements,
            line1: line1.to_string(),
            line2: line2.to_string(),
        })
    }

    /// Parses a [TleRecord] from a text block: either title + two element lines,
    /// or both element lines only (the object is then named "Unknown").
    /// Blank lines are ignored.
    pub fn from_text(content: &str) -> Result<Self, FormatError> {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();

        match lines.as_slice() {
            [name, line1, line2] => Self::parse(name, line1, line2),
            [line1, line2] => Self::parse(UNKNOWN_OBJECT_NAME, line1, line2),
            _ => Err(FormatError::LineCount {
                expected: 3,
                found: lines.len(),
            }),
        }
    }

    /// Object name (title line)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First element line
    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Second element line
    pub fn line2(&self) -> &str {
        &self.line2
    }

    /// Elements reference [Epoch] (UTC)
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// NORAD catalog number
    pub fn catalog_number(&self) -> u64 {
        self.elements.norad_id
    }

    /// International designator, when published
    pub fn international_designator(&self) -> Option<&str> {
        self.elements.international_designator.as_deref()
    }

    /// Orbit inclination in degrees
    pub fn inclination_deg(&self) -> f64 {
        self.elements.inclination
    }

    /// Mean motion in revolutions per day
    pub fn mean_motion(&self) -> f64 {
        self.elements.mean_motion
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    /// Mean altitude above the equatorial radius, in km, deduced from the mean motion.
    pub fn mean_altitude_km(&self) -> f64 {
        let n_rad_s = self.mean_motion() * 2.0 * std::f64::consts::PI / SECONDS_PER_DAY;
        let a_km = (EARTH_GRAVITATION_MU_KM3_S2 / n_rad_s.powi(2)).powf(1.0 / 3.0);
        a_km - EARTH_SEMI_MAJOR_AXIS_WGS84_KM
    }

    pub(crate) fn elements(&self) -> &Elements {
        &self.elements
    }
}
