#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod error;
mod time;

// public modules
pub mod catalog;
pub mod constants;
pub mod frame;
pub mod logger;
pub mod orbit;
pub mod source;
pub mod station;
pub mod tle;
pub mod track;
pub mod viz;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::catalog::{launches_on, SatcatEntry};
    pub use crate::cfg::Config;
    pub use crate::error::{Error, FetchError, FormatError, PropagationError};
    pub use crate::frame::{to_earth_fixed_and_geodetic, Geodetic};
    pub use crate::logger::{LogRecorder, Recorder};
    pub use crate::orbit::{state_at, InertialState, OrbitModel, Sgp4Model};
    pub use crate::source::{CatalogQuery, Fetch, HttpFetcher, RetryPolicy, TleSource};
    pub use crate::station::{load_stations, parse_stations, GroundStation};
    pub use crate::tle::TleRecord;
    pub use crate::track::{
        build_track, build_track_with, build_track_within, StateVector, Track, TrackModel,
        TrackSegment,
    };
    pub use crate::viz::{
        build_frames, format_title, AnimationControls, AnimationFrame, MapLayout, Projection,
        Visualization,
    };
    // re-export
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
