#[cfg(feature = "serde")]
use serde::Serialize;

use crate::track::StateVector;

/// Playback controls. The slider browses a decimated subset of the frames,
/// the frames themselves are never decimated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AnimationControls {
    /// Frame indices the slider steps through
    pub slider_steps: Vec<usize>,
    /// Playback duration of a single frame (ms)
    pub frame_duration_ms: u32,
    /// Transition between frames (ms)
    pub transition_duration_ms: u32,
}

impl AnimationControls {
    /// Builds [AnimationControls] for `num_frames`, with at most `max_steps` slider steps.
    /// `max_steps = 0` disables decimation.
    pub fn new(num_frames: usize, max_steps: usize, frame_duration_ms: u32) -> Self {
        let stride = if max_steps > 0 && num_frames > max_steps {
            num_frames.div_ceil(max_steps)
        } else {
            1
        };
        Self {
            slider_steps: (0..num_frames).step_by(stride).collect(),
            frame_duration_ms,
            transition_duration_ms: 0,
        }
    }

    /// Slider label of each step
    pub fn labels(&self) -> Vec<String> {
        self.slider_steps.iter().map(|k| k.to_string()).collect()
    }
}

/// Map projections
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Projection {
    /// 2D map, longitude/latitude plate carrée
    Equirectangular,
    /// 3D globe, centered on (lon, lat) in degrees
    Orthographic { lon: f64, lat: f64 },
}

/// Dual projection layout: 2D map (left) and 3D globe (right).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MapLayout {
    pub map: Projection,
    pub globe: Projection,
    /// Graticule spacing (degrees)
    pub graticule_step_deg: i32,
    pub annotation: String,
}

impl MapLayout {
    /// Builds a [MapLayout] whose globe faces `first` (or 0°N 0°E).
    pub fn centered_on(first: Option<&StateVector>) -> Self {
        let (lon, lat) = first.map(|s| (s.lon, s.lat)).unwrap_or_default();
        Self {
            map: Projection::Equirectangular,
            globe: Projection::Orthographic { lon, lat },
            graticule_step_deg: 30,
            annotation: "Propagated with SGP4 Model".to_string(),
        }
    }

    fn graticule(&self, bound: i32) -> Vec<(i32, String)> {
        let step = self.graticule_step_deg.max(1) as usize;
        (-bound..=bound)
            .step_by(step)
            .map(|deg| (deg, format!("{}°", deg)))
            .collect()
    }

    /// Latitude graticule labels, from the south pole
    pub fn latitude_labels(&self) -> Vec<(i32, String)> {
        self.graticule(90)
    }

    /// Longitude graticule labels, from the antimeridian
    pub fn longitude_labels(&self) -> Vec<(i32, String)> {
        self.graticule(180)
    }
}
