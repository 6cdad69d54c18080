use rand::{rngs::SmallRng, Rng, SeedableRng};
use rstest::*;

use crate::{
    frame::normalize_longitude,
    prelude::Epoch,
    track::{segment, segment_bounds},
    tests::{epoch, init_logger, state_at},
};

#[fixture]
fn t0() -> Epoch {
    epoch("2025-01-01T00:00:00 UTC")
}

#[rstest]
#[case(&[170.0, -170.0], 2)]
#[case(&[10.0, 20.0, 30.0], 1)]
#[case(&[170.0, -170.0, 160.0], 3)]
#[case(&[-179.0, 179.0, -179.0, 179.0], 4)]
#[case(&[0.0, 180.0, 0.0], 1)]
#[case(&[150.0, 175.0, -160.0, -130.0, -100.0], 2)]
fn antimeridian_crossings(t0: Epoch, #[case] longitudes: &[f64], #[case] expected: usize) {
    init_logger();

    let states = longitudes
        .iter()
        .enumerate()
        .map(|(i, lon)| state_at(t0, i, 0.0, *lon))
        .collect::<Vec<_>>();

    let segments = segment(&states);
    assert_eq!(segments.len(), expected);

    // segments cover the whole sequence, in order
    let mut next = 0;
    for seg in segments.iter() {
        assert_eq!(seg.first_index, next);
        assert!(!seg.is_empty());
        assert_eq!(seg.points, &states[seg.first_index..=seg.last_index()]);
        next += seg.len();
    }
    assert_eq!(next, states.len());
}

#[rstest]
fn segment_prefix(t0: Epoch) {
    let states = [150.0, 175.0, -160.0, -130.0]
        .iter()
        .enumerate()
        .map(|(i, lon)| state_at(t0, i, 0.0, *lon))
        .collect::<Vec<_>>();

    let segments = segment(&states);
    assert_eq!(segments.len(), 2);

    let (west, east) = (segments[0], segments[1]);

    assert_eq!(west.up_to(0).map(|s| s.len()), Some(1));
    assert_eq!(west.up_to(3), Some(west));
    assert_eq!(east.up_to(1), None);
    assert_eq!(east.up_to(2).map(|s| s.len()), Some(1));
    assert_eq!(east.up_to(3).map(|s| s.last_index()), Some(3));
}

/// Verifies the segmentation of a longitude sequence.
fn verify_bounds(longitudes: &[f64]) {
    let bounds = segment_bounds(longitudes);

    assert_eq!(bounds.first().map(|r| r.start), Some(0));
    assert_eq!(bounds.last().map(|r| r.end), Some(longitudes.len()));

    for range in bounds.iter() {
        assert!(!range.is_empty());
        for pair in longitudes[range.clone()].windows(2) {
            assert!(
                (pair[1] - pair[0]).abs() <= 180.0,
                "discontinuity within segment: {:?}",
                pair
            );
        }
    }

    for pair in bounds.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        assert_eq!(before.end, after.start, "gap between segments");
        let jump = longitudes[after.start] - longitudes[before.end - 1];
        assert!(jump.abs() > 180.0, "needless split: {}", jump);
    }
}

#[test]
fn random_longitudes() {
    init_logger();
    let mut rng = SmallRng::seed_from_u64(0);

    for _ in 0..200 {
        let len = rng.random_range(1..300);
        let longitudes = (0..len)
            .map(|_| normalize_longitude(rng.random_range(-180.0..180.0)))
            .collect::<Vec<_>>();

        verify_bounds(&longitudes);
    }
}

#[test]
fn random_ground_tracks() {
    init_logger();
    let mut rng = SmallRng::seed_from_u64(1);

    for _ in 0..50 {
        let mut lon = rng.random_range(-180.0..180.0);
        let rate = rng.random_range(-40.0..40.0);

        let longitudes = (0..500)
            .map(|_| {
                lon = normalize_longitude(lon + rate);
                lon
            })
            .collect::<Vec<_>>();

        verify_bounds(&longitudes);

        // every wrap around is a crossing
        let crossings = segment_bounds(&longitudes).len() - 1;
        let turns = (rate.abs() * 499.0 / 360.0).floor() as usize;
        assert!(crossings >= turns && crossings <= turns + 1);
    }
}
