//! Ground track assembly
use log::{debug, info};

#[cfg(feature = "serde")]
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    error::{Error, PropagationError},
    frame::to_earth_fixed_and_geodetic,
    orbit::{InertialState, OrbitModel, Sgp4Model},
    prelude::{Duration, Epoch, Unit, Vector3},
    tle::TleRecord,
};

mod segment;
pub use segment::{segment, segment_bounds, TrackSegment};

/// [StateVector] describes the tracked object at a single instant,
/// in all three frames.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StateVector {
    /// Sampling instant (UTC)
    pub time: Epoch,
    /// Inertial position (km)
    pub eci: Vector3<f64>,
    /// Inertial velocity (km/s)
    pub eci_velocity: Vector3<f64>,
    /// Earth fixed position (km)
    pub ecef: Vector3<f64>,
    /// Geodetic latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lon: f64,
    /// Altitude above the WGS84 ellipsoid (km)
    pub alt: f64,
}

impl StateVector {
    /// Builds a [StateVector] from the model output at [Epoch].
    pub fn from_inertial(time: Epoch, state: &InertialState) -> Self {
        let geo = to_earth_fixed_and_geodetic(&state.position_km, time);
        Self {
            time,
            eci: state.position_km,
            eci_velocity: state.velocity_km_s,
            ecef: geo.ecef,
            lat: geo.lat,
            lon: geo.lon,
            alt: geo.alt,
        }
    }
}

/// Models the [Track] may be built from.
#[cfg(not(feature = "parallel"))]
pub trait TrackModel: OrbitModel {}

#[cfg(not(feature = "parallel"))]
impl<M: OrbitModel> TrackModel for M {}

/// Models the [Track] may be built from.
/// Steps are propagated concurrently, the model is shared across threads.
#[cfg(feature = "parallel")]
pub trait TrackModel: OrbitModel + Sync {}

#[cfg(feature = "parallel")]
impl<M: OrbitModel + Sync> TrackModel for M {}

/// [Track] exclusively owns the ordered [StateVector] sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    step: Duration,
    states: Vec<StateVector>,
}

impl Track {
    /// Ordered [StateVector]s, strictly increasing in time.
    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    /// Time step between two [StateVector]s
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// A built [Track] is never empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// First [Epoch] of the [Track]
    pub fn start(&self) -> Option<Epoch> {
        self.states.first().map(|s| s.time)
    }

    /// Last [Epoch] of the [Track]
    pub fn end(&self) -> Option<Epoch> {
        self.states.last().map(|s| s.time)
    }

    /// Splits the [Track] into [TrackSegment]s, at every antimeridian crossing.
    pub fn segments(&self) -> Vec<TrackSegment<'_>> {
        segment(&self.states)
    }
}

/// Rejects invalid grids, prior any propagation.
pub(crate) fn validate_grid(step_seconds: f64, count: usize) -> Result<(), Error> {
    if !step_seconds.is_finite() || step_seconds <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "step must be strictly positive (got {}s)",
            step_seconds
        )));
    }
    if step_seconds * Unit::Second < 1.0 * Unit::Nanosecond {
        return Err(Error::InvalidParameter(format!(
            "step {}s is below the 1ns time resolution",
            step_seconds
        )));
    }
    if count == 0 {
        return Err(Error::InvalidParameter(
            "step count must be strictly positive".to_string(),
        ));
    }
    let span_seconds = step_seconds * (count - 1) as f64;
    if span_seconds >= Duration::MAX.to_seconds() {
        return Err(Error::InvalidParameter(format!(
            "{} steps of {}s exceed the representable time span",
            count, step_seconds
        )));
    }
    Ok(())
}

/// Time grid `t_i = start + i * step`, `i` in `[0, count)`.
pub fn time_grid(start: Epoch, step_seconds: f64, count: usize) -> Vec<Epoch> {
    (0..count)
        .map(|i| start + (step_seconds * i as f64) * Unit::Second)
        .collect()
}

/// [time_grid] that must be strictly increasing: saturates
/// neither at the [Epoch] bounds nor at the time resolution.
fn checked_time_grid(start: Epoch, step_seconds: f64, count: usize) -> Result<Vec<Epoch>, Error> {
    let grid = time_grid(start, step_seconds, count);
    if let Some(index) = grid.windows(2).position(|t| t[1] <= t[0]) {
        return Err(Error::InvalidParameter(format!(
            "time grid from {} ({}s step) is not representable beyond step #{}",
            start, step_seconds, index
        )));
    }
    Ok(grid)
}

fn propagate_step<M: OrbitModel>(
    model: &M,
    index: usize,
    t: Epoch,
) -> Result<StateVector, PropagationError> {
    let state = model.state_at(t).map_err(|e| PropagationError::Step {
        index,
        source: Box::new(e),
    })?;
    Ok(StateVector::from_inertial(t, &state))
}

#[cfg(not(feature = "parallel"))]
fn propagate_grid<M: TrackModel>(
    model: &M,
    grid: &[Epoch],
) -> Result<Vec<StateVector>, PropagationError> {
    grid.iter()
        .enumerate()
        .map(|(i, t)| propagate_step(model, i, *t))
        .collect()
}

#[cfg(feature = "parallel")]
fn propagate_grid<M: TrackModel>(
    model: &M,
    grid: &[Epoch],
) -> Result<Vec<StateVector>, PropagationError> {
    // indexed collect preserves the grid order
    grid.par_iter()
        .enumerate()
        .map(|(i, t)| propagate_step(model, i, *t))
        .collect()
}

/// Builds a [Track] from any [OrbitModel].
/// ## Inputs
/// - model: [OrbitModel]
/// - start: first [Epoch]
/// - step_seconds: strictly positive time step
/// - count: strictly positive number of steps
///
/// Any failing step aborts the whole build: there is no partial [Track].
pub fn build_track_with<M: TrackModel>(
    model: &M,
    start: Epoch,
    step_seconds: f64,
    count: usize,
) -> Result<Track, Error> {
    validate_grid(step_seconds, count)?;

    let grid = checked_time_grid(start, step_seconds, count)?;
    debug!("propagating {} steps from {}", count, start);

    let states = propagate_grid(model, &grid)?;

    Ok(Track {
        states,
        step: step_seconds * Unit::Second,
    })
}

/// Builds the [Track] of [TleRecord] using the SGP4 model,
/// valid within 30 days of the elements epoch.
pub fn build_track(
    tle: &TleRecord,
    start: Epoch,
    step_seconds: f64,
    count: usize,
) -> Result<Track, Error> {
    build_track_within(
        tle,
        start,
        step_seconds,
        count,
        Sgp4Model::DEFAULT_MAX_SPAN_DAYS * Unit::Day,
    )
}

/// [build_track] with custom model validity span.
pub fn build_track_within(
    tle: &TleRecord,
    start: Epoch,
    step_seconds: f64,
    count: usize,
    max_span: Duration,
) -> Result<Track, Error> {
    validate_grid(step_seconds, count)?;

    let model = Sgp4Model::new(tle, max_span)?;
    let track = build_track_with(&model, start, step_seconds, count)?;

    info!(
        "{}: {} states from {} ({}s step)",
        tle.name(),
        track.len(),
        start,
        step_seconds
    );

    Ok(track)
}
