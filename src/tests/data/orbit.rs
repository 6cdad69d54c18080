use crate::{
    constants::EARTH_GRAVITATION_MU_KM3_S2,
    prelude::{Epoch, InertialState, OrbitModel, PropagationError, Vector3},
};

/// Keplerian circular orbit, in the inertial frame.
#[derive(Debug, Clone, Copy)]
pub struct CircularOrbit {
    pub epoch: Epoch,
    pub radius_km: f64,
    pub inclination_deg: f64,
}

impl CircularOrbit {
    pub fn new(epoch: Epoch, radius_km: f64, inclination_deg: f64) -> Self {
        Self {
            epoch,
            radius_km,
            inclination_deg,
        }
    }

    /// Mean motion (rad/s)
    pub fn mean_motion(&self) -> f64 {
        (EARTH_GRAVITATION_MU_KM3_S2 / self.radius_km.powi(3)).sqrt()
    }
}

impl OrbitModel for CircularOrbit {
    fn state_at(&self, t: Epoch) -> Result<InertialState, PropagationError> {
        let n = self.mean_motion();
        let theta = n * (t - self.epoch).to_seconds();

        let (sin_i, cos_i) = self.inclination_deg.to_radians().sin_cos();
        let (sin_t, cos_t) = theta.sin_cos();
        let r = self.radius_km;

        Ok(InertialState {
            position_km: Vector3::new(r * cos_t, r * sin_t * cos_i, r * sin_t * sin_i),
            velocity_km_s: Vector3::new(-r * n * sin_t, r * n * cos_t * cos_i, r * n * cos_t * sin_i),
        })
    }
}
