//! Ground stations (static overlay)
use std::{io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use log::Level;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    error::{Error, FormatError},
    logger::Recorder,
};

/// [GroundStation] is read-only for the whole run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GroundStation {
    /// Station name (free text)
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl GroundStation {
    pub fn new(name: &str, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
        }
    }
}

fn parse_coordinate(
    value: Option<&str>,
    field: &str,
    bound: f64,
    line: u64,
) -> Result<f64, FormatError> {
    let value = value.ok_or_else(|| FormatError::StationRecord {
        line,
        cause: format!("missing {}", field),
    })?;

    let parsed = value
        .parse::<f64>()
        .map_err(|e| FormatError::StationRecord {
            line,
            cause: format!("{} \"{}\": {}", field, value, e),
        })?;

    if !parsed.is_finite() || parsed.abs() > bound {
        return Err(FormatError::StationRecord {
            line,
            cause: format!("{} {} out of [-{}, {}]", field, parsed, bound, bound),
        });
    }

    Ok(parsed)
}

/// Parses a `name,lat,lon` table (header row first).
pub fn parse_stations<R: Read>(reader: R) -> Result<Vec<GroundStation>, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| FormatError::StationHeader(e.to_string()))?
        .clone();

    let columns = headers
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect::<Vec<_>>();

    let index_of = |name: &str| columns.iter().position(|c| c == name);

    let (name_idx, lat_idx, lon_idx) = match (index_of("name"), index_of("lat"), index_of("lon")) {
        (Some(name), Some(lat), Some(lon)) => (name, lat, lon),
        _ => {
            return Err(FormatError::StationHeader(
                headers.iter().collect::<Vec<_>>().join(","),
            ))
        },
    };

    let mut stations = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| FormatError::StationRecord {
            line: e.position().map(|p| p.line()).unwrap_or_default(),
            cause: e.to_string(),
        })?;

        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let name = record
            .get(name_idx)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| FormatError::StationRecord {
                line,
                cause: "missing name".to_string(),
            })?;

        let lat = parse_coordinate(record.get(lat_idx), "lat", 90.0, line)?;
        let lon = parse_coordinate(record.get(lon_idx), "lon", 180.0, line)?;

        stations.push(GroundStation::new(name, lat, lon));
    }

    Ok(stations)
}

/// Loads ground stations from a `name,lat,lon` CSV file,
/// reporting to said [Recorder].
pub fn load_stations<R: Recorder>(path: &Path, recorder: R) -> Result<Vec<GroundStation>, Error> {
    let fd = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let stations = parse_stations(fd)?;
    recorder.record(
        &format!("loaded {} ground stations from {}", stations.len(), path.display()),
        Level::Info,
    );
    Ok(stations)
}
