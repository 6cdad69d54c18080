use sgp4::{Constants, MinutesSinceEpoch};

use crate::{
    error::PropagationError,
    prelude::{Duration, Epoch, Unit, Vector3},
    time::minutes_since,
    tle::TleRecord,
};

/// Earth centered inertial state, as produced by the propagation model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialState {
    /// Position (km)
    pub position_km: Vector3<f64>,
    /// Velocity (km/s)
    pub velocity_km_s: Vector3<f64>,
}

/// Any propagation model should implement the [OrbitModel] trait
/// to contribute to the track build.
pub trait OrbitModel {
    /// Provide the inertial state at requested [Epoch].
    ///
    /// The model must reject (and not clamp) any [Epoch] it cannot serve.
    /// Requests are independent from one another: there is no guarantee
    /// they are issued in chronological order.
    fn state_at(&self, t: Epoch) -> Result<InertialState, PropagationError>;
}

impl<M: OrbitModel + ?Sized> OrbitModel for &M {
    fn state_at(&self, t: Epoch) -> Result<InertialState, PropagationError> {
        (**self).state_at(t)
    }
}

/// [Sgp4Model] wraps the SGP4 propagator. Positions are expressed in
/// the True Equator Mean Equinox (TEME) inertial frame.
#[derive(Debug, Clone)]
pub struct Sgp4Model {
    epoch: Epoch,
    max_span: Duration,
    constants: Constants,
}

impl Sgp4Model {
    /// Default validity span around the elements [Epoch]
    pub const DEFAULT_MAX_SPAN_DAYS: f64 = 30.0;

    /// Builds a new [Sgp4Model] from [TleRecord], valid within `max_span` of its [Epoch].
    pub fn new(tle: &TleRecord, max_span: Duration) -> Result<Self, PropagationError> {
        let constants = Constants::from_elements(tle.elements())
            .map_err(|e| PropagationError::InvalidElements(format!("{:?}", e)))?;
        Ok(Self {
            constants,
            max_span,
            epoch: tle.epoch(),
        })
    }

    /// Elements reference [Epoch]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Validity span around the elements [Epoch]
    pub fn max_span(&self) -> Duration {
        self.max_span
    }
}

impl OrbitModel for Sgp4Model {
    fn state_at(&self, t: Epoch) -> Result<InertialState, PropagationError> {
        let dt = t - self.epoch;
        if dt.abs() > self.max_span {
            return Err(PropagationError::OutOfRange {
                t,
                epoch: self.epoch,
                max_span_days: self.max_span.to_unit(Unit::Day),
            });
        }

        let prediction = self
            .constants
            .propagate(MinutesSinceEpoch(minutes_since(self.epoch, t)))
            .map_err(|e| PropagationError::Model {
                t,
                cause: format!("{:?}", e),
            })?;

        let [x, y, z] = prediction.position;
        let [vx, vy, vz] = prediction.velocity;

        if ![x, y, z, vx, vy, vz].iter().all(|v| v.is_finite()) {
            return Err(PropagationError::Model {
                t,
                cause: "non finite state".to_string(),
            });
        }

        Ok(InertialState {
            position_km: Vector3::new(x, y, z),
            velocity_km_s: Vector3::new(vx, vy, vz),
        })
    }
}

/// Inertial position (km) and velocity (km/s) of [TleRecord] at [Epoch],
/// using the default validity span.
pub fn state_at(tle: &TleRecord, t: Epoch) -> Result<(Vector3<f64>, Vector3<f64>), PropagationError> {
    let model = Sgp4Model::new(tle, Sgp4Model::DEFAULT_MAX_SPAN_DAYS * Unit::Day)?;
    let state = model.state_at(t)?;
    Ok((state.position_km, state.velocity_km_s))
}
