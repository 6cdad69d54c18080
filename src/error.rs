use std::path::PathBuf;

use thiserror::Error;

use crate::prelude::Epoch;

/// Malformed TLE, station or catalog content.
/// Never retried: the offending line (and field, when known) is reported as is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// TLE content does not have the expected number of (non empty) lines.
    #[error("expecting {expected} non empty lines, got {found}")]
    LineCount { expected: usize, found: usize },

    /// TLE element line does not respect the 69 columns format.
    #[error("tle line {line}: expecting 69 columns, got {found}")]
    LineWidth { line: u8, found: usize },

    /// TLE element line does not start with its line number.
    #[error("tle line {line}: should start with \"{line} \"")]
    LineNumber { line: u8 },

    /// Both element lines should describe the same catalog entry.
    #[error("tle catalog number mismatch: \"{0}\" (line 1) \"{1}\" (line 2)")]
    CatalogNumberMismatch(String, String),

    /// Modulo 10 checksum (column 69) does not match the line content.
    #[error("tle line {line}: checksum is {found}, computed {computed}")]
    Checksum { line: u8, found: u8, computed: u8 },

    /// The element set was rejected by the TLE decoder.
    #[error("tle elements: {0}")]
    Elements(String),

    /// A fixed width field could not be interpreted.
    #[error("tle line {line}, columns {columns}: {cause}")]
    Field {
        line: u8,
        columns: &'static str,
        cause: String,
    },

    /// Station file does not describe the `name,lat,lon` columns.
    #[error("stations: invalid header \"{0}\" (expecting name,lat,lon)")]
    StationHeader(String),

    /// Station row could not be interpreted.
    #[error("stations line {line}: {cause}")]
    StationRecord { line: u64, cause: String },

    /// Catalog (SATCAT) content could not be interpreted.
    #[error("catalog: {0}")]
    Catalog(String),
}

/// [PropagationError] aborts the complete track build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    /// The propagation model rejected the orbital elements.
    #[error("model rejected orbital elements: {0}")]
    InvalidElements(String),

    /// Requested instant exceeds the validity span of the elements.
    #[error("{t} is out of the model validity span ({epoch} ± {max_span_days} days)")]
    OutOfRange {
        t: Epoch,
        epoch: Epoch,
        max_span_days: f64,
    },

    /// The model failed at this instant (decayed object, diverging elements..).
    #[error("{t}: propagation failure: {cause}")]
    Model { t: Epoch, cause: String },

    /// Error raised at a specific step of a track build.
    #[error("step #{index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: Box<PropagationError>,
    },
}

/// Any failure from the remote catalog, transport or status.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("http status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed content (TLE, stations, catalog).
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Remote retrieval exhausted its retry budget.
    #[error("source unavailable after {attempts} attempt(s): {last}")]
    SourceUnavailable { attempts: usize, last: FetchError },

    /// The propagation model rejected input, or the requested time is out of range.
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),

    /// Invalid pipeline parameter, rejected prior any I/O or propagation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Local file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
