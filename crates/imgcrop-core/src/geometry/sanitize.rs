//! Loop sanitizing.
//!
//! Host geometry often arrives with gaps (missing or non-finite coordinates),
//! repeated points from curve tessellation, and an explicit closing point
//! that repeats the first. This module turns such input into a clean open
//! loop.

use super::{Loop, RawPoint};

/// Clean a raw point sequence into an open loop.
///
/// # Behavior
///
/// - Entries with a missing, NaN or infinite coordinate are dropped
/// - A point equal to the previously kept point is dropped
/// - If the first and last kept points are equal, the last one is dropped
/// - The order of the remaining points is preserved
///
/// Sanitizing an already clean loop returns it unchanged.
pub fn sanitize_loop<P>(raw: &[P]) -> Loop
where
    P: Into<RawPoint> + Copy,
{
    let mut clean: Loop = Vec::with_capacity(raw.len());

    for point in raw.iter().filter_map(|&p| p.into().to_point()) {
        if clean.last() != Some(&point) {
            clean.push(point);
        }
    }

    if clean.len() >= 2 && clean.first() == clean.last() {
        clean.pop();
    }

    clean
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::Point;
    use proptest::prelude::*;

    /// Strategy for raw loops on a small grid so duplicates actually occur.
    fn raw_loop_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0i32..4, 0i32..4), 0..20).prop_map(|v| {
            v.into_iter()
                .map(|(x, y)| (x as f64, y as f64))
                .collect()
        })
    }

    proptest! {
        /// Property: Sanitizing is idempotent.
        #[test]
        fn prop_sanitize_idempotent(raw in raw_loop_strategy()) {
            let once = sanitize_loop(&raw);
            let twice = sanitize_loop(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: No two adjacent output points are equal.
        #[test]
        fn prop_no_adjacent_duplicates(raw in raw_loop_strategy()) {
            let clean = sanitize_loop(&raw);
            for pair in clean.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
        }

        /// Property: Output is never longer than input and contains only finite points.
        #[test]
        fn prop_output_finite_and_shorter(
            raw in prop::collection::vec(
                (prop_oneof![Just(f64::NAN), -10.0f64..10.0], -10.0f64..10.0),
                0..30,
            ),
        ) {
            let clean = sanitize_loop(&raw);
            prop_assert!(clean.len() <= raw.len());
            prop_assert!(clean.iter().all(Point::is_finite));
        }

        /// Property: Open loops never start and end on the same point.
        #[test]
        fn prop_not_explicitly_closed(raw in raw_loop_strategy()) {
            let clean = sanitize_loop(&raw);
            if clean.len() >= 2 {
                prop_assert_ne!(clean.first(), clean.last());
            }
        }
    }
}
