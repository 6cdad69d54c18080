//! Animation payload handed to the rendering layer
use log::info;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    cfg::Config,
    prelude::{Epoch, TimeScale},
    station::GroundStation,
    tle::TleRecord,
    track::{segment, StateVector, Track, TrackSegment},
};

mod controls;
pub use controls::{AnimationControls, MapLayout, Projection};

/// One [AnimationFrame] per time step.
/// Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AnimationFrame<'a> {
    /// Time step index
    pub index: usize,
    /// Current position marker
    pub state: StateVector,
    /// Track history: every segment restricted to points up to this time step.
    pub track_so_far: Vec<TrackSegment<'a>>,
    /// Static overlay, serialized once at the [Visualization] level.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub stations: &'a [GroundStation],
    /// Frame title
    pub title: String,
}

/// Frame title: object, elements epoch, current time and position.
pub fn format_title(object_name: &str, tle_epoch: Epoch, time: Epoch, lat: f64, lon: f64) -> String {
    format!(
        "Satellite: {} (TLE: {})\nUTCG : {}\nLat. : {:>11.6}\nLon. : {:>11.6}",
        object_name,
        tle_epoch.to_time_scale(TimeScale::UTC),
        time.to_time_scale(TimeScale::UTC),
        lat,
        lon,
    )
}

/// Builds one [AnimationFrame] per [StateVector].
/// ## Inputs
/// - states: ordered [StateVector]s, as produced by the [Track]
/// - stations: static [GroundStation]s overlay
/// - object_name: tracked object name
/// - tle_epoch: elements reference [Epoch]
///
/// Frame `i` marks `states[i]` and its history grows with `i`.
pub fn build_frames<'a>(
    states: &'a [StateVector],
    stations: &'a [GroundStation],
    object_name: &str,
    tle_epoch: Epoch,
) -> Vec<AnimationFrame<'a>> {
    let segments = segment(states);

    states
        .iter()
        .enumerate()
        .map(|(index, state)| {
            let track_so_far = segments
                .iter()
                .take_while(|seg| seg.first_index <= index)
                .filter_map(|seg| seg.up_to(index))
                .collect();

            AnimationFrame {
                index,
                state: *state,
                track_so_far,
                stations,
                title: format_title(object_name, tle_epoch, state.time, state.lat, state.lon),
            }
        })
        .collect()
}

/// Complete, self contained [Visualization] payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Visualization<'a> {
    /// Tracked object name
    pub object_name: String,
    /// Elements reference [Epoch]
    pub tle_epoch: Epoch,
    /// Complete ordered state sequence
    pub states: &'a [StateVector],
    /// Complete track, split at antimeridian crossings
    pub segments: Vec<TrackSegment<'a>>,
    /// One frame per state
    pub frames: Vec<AnimationFrame<'a>>,
    /// Static overlay
    pub stations: &'a [GroundStation],
    /// Playback controls
    pub controls: AnimationControls,
    /// Dual projection layout
    pub layout: MapLayout,
}

impl<'a> Visualization<'a> {
    /// Assembles the [Visualization] of a [Track].
    pub fn build(
        tle: &TleRecord,
        track: &'a Track,
        stations: &'a [GroundStation],
        cfg: &Config,
    ) -> Self {
        let states = track.states();
        let frames = build_frames(states, stations, tle.name(), tle.epoch());

        let controls = AnimationControls::new(
            frames.len(),
            cfg.max_animation_frames,
            cfg.play_frame_duration_ms,
        );

        let layout = MapLayout::centered_on(states.first());

        info!(
            "{}: {} frames ({} slider steps), {} stations",
            tle.name(),
            frames.len(),
            controls.slider_steps.len(),
            stations.len()
        );

        Self {
            object_name: tle.name().to_string(),
            tle_epoch: tle.epoch(),
            states,
            segments: track.segments(),
            frames,
            stations,
            controls,
            layout,
        }
    }
}
