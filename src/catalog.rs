//! Satellite catalog (SATCAT) launch search
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::Level;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    error::{Error, FormatError},
    prelude::Epoch,
    source::{Fetch, TleSource},
};

/// Catalog entry of a launched object
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SatcatEntry {
    pub object_name: String,
    /// International designator
    pub object_id: String,
    pub norad_cat_id: u32,
    /// YYYY-MM-DD
    pub launch_date: String,
}

/// Validates a YYYY-MM-DD date description.
fn validate_date(date: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidParameter(format!("\"{}\" is not a YYYY-MM-DD date", date));

    let fields = date.split('-').collect::<Vec<_>>();
    let [year, month, day] = fields.as_slice() else {
        return Err(invalid());
    };

    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return Err(invalid());
    }

    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u8>().map_err(|_| invalid())?;
    let day = day.parse::<u8>().map_err(|_| invalid())?;

    Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0).map_err(|_| invalid())?;
    Ok(())
}

fn column(headers: &StringRecord, name: &str) -> Result<usize, FormatError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| FormatError::Catalog(format!("missing \"{}\" column", name)))
}

/// Parses a SATCAT CSV table, keeping the objects launched on `date` (YYYY-MM-DD).
pub fn parse_satcat<R: Read>(reader: R, date: &str) -> Result<Vec<SatcatEntry>, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| FormatError::Catalog(e.to_string()))?
        .clone();

    let name_idx = column(&headers, "OBJECT_NAME")?;
    let id_idx = column(&headers, "OBJECT_ID")?;
    let norad_idx = column(&headers, "NORAD_CAT_ID")?;
    let date_idx = column(&headers, "LAUNCH_DATE")?;

    let mut entries = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| FormatError::Catalog(e.to_string()))?;

        if record.get(date_idx) != Some(date) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let norad = record.get(norad_idx).unwrap_or_default();

        let norad_cat_id = norad.parse::<u32>().map_err(|e| {
            FormatError::Catalog(format!("line {}: NORAD_CAT_ID \"{}\": {}", line, norad, e))
        })?;

        entries.push(SatcatEntry {
            norad_cat_id,
            object_name: record.get(name_idx).unwrap_or_default().to_string(),
            object_id: record.get(id_idx).unwrap_or_default().to_string(),
            launch_date: date.to_string(),
        });
    }

    Ok(entries)
}

/// Lists the objects launched on `date` (YYYY-MM-DD), from the catalog
/// served by this [TleSource] (same retry policy).
pub fn launches_on<F: Fetch>(source: &TleSource<F>, date: &str) -> Result<Vec<SatcatEntry>, Error> {
    validate_date(date)?;

    let url = format!("{}/pub/satcat.csv", source.base_url().trim_end_matches('/'));
    let content = source.fetch_with_retry(&url)?;

    let entries = parse_satcat(content.as_bytes(), date)?;
    source.recorder().record(
        &format!("{}: {} launched object(s)", date, entries.len()),
        Level::Info,
    );
    Ok(entries)
}

#[cfg(test)]
mod test {
    use super::validate_date;

    #[test]
    fn date_validation() {
        assert!(validate_date("1998-11-20").is_ok());
        assert!(validate_date("2024-02-29").is_ok());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("1998-13-01").is_err());
        assert!(validate_date("98-11-20").is_err());
        assert!(validate_date("yesterday").is_err());
    }
}
