use std::ops::Range;

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{constants::ANTIMERIDIAN_JUMP_DEG, track::StateVector};

/// [TrackSegment] is a contiguous run of [StateVector]s that may be drawn
/// as a single polyline: no two consecutive points differ by more than 180°
/// in longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegment<'a> {
    /// Index of the first point, in the complete sequence
    pub first_index: usize,
    /// Points of this segment
    pub points: &'a [StateVector],
}

impl<'a> TrackSegment<'a> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the last point, in the complete sequence
    pub fn last_index(&self) -> usize {
        self.first_index + self.points.len().saturating_sub(1)
    }

    /// Returns this [TrackSegment] restricted to points up to
    /// (and including) `index` in the complete sequence.
    pub fn up_to(&self, index: usize) -> Option<Self> {
        if index < self.first_index || self.points.is_empty() {
            return None;
        }
        let len = (index - self.first_index + 1).min(self.points.len());
        Some(Self {
            first_index: self.first_index,
            points: &self.points[..len],
        })
    }
}

// Points are serialized as a range of the shared state sequence.
#[cfg(feature = "serde")]
impl Serialize for TrackSegment<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TrackSegment", 2)?;
        state.serialize_field("first_index", &self.first_index)?;
        state.serialize_field("len", &self.points.len())?;
        state.end()
    }
}

/// Index ranges of the segments of a longitude sequence (degrees).
/// A new segment starts whenever two consecutive longitudes differ by more than 180°.
pub fn segment_bounds(longitudes: &[f64]) -> Vec<Range<usize>> {
    if longitudes.is_empty() {
        return Vec::new();
    }

    let mut bounds = Vec::new();
    let mut start = 0;

    for (i, (prev, next)) in longitudes.iter().tuple_windows().enumerate() {
        if (next - prev).abs() > ANTIMERIDIAN_JUMP_DEG {
            bounds.push(start..i + 1);
            start = i + 1;
        }
    }

    bounds.push(start..longitudes.len());
    bounds
}

/// Splits an ordered [StateVector] sequence into [TrackSegment]s.
pub fn segment(states: &[StateVector]) -> Vec<TrackSegment<'_>> {
    let longitudes = states.iter().map(|s| s.lon).collect::<Vec<_>>();
    segment_bounds(&longitudes)
        .into_iter()
        .map(|range| TrackSegment {
            first_index: range.start,
            points: &states[range],
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::segment_bounds;

    #[test]
    fn empty_sequence() {
        assert!(segment_bounds(&[]).is_empty());
        assert_eq!(segment_bounds(&[42.0]), vec![0..1]);
    }

    #[test]
    fn exact_half_turn_is_continuous() {
        assert_eq!(segment_bounds(&[-90.0, 90.0]), vec![0..2]);
    }
}
