//! Interval overlap algorithms behind the schedule grid.
//!
//! Every function here works on a slice of [`Interval`]s belonging to a single
//! resource/day and returns one value per input interval, in input order.
//! Intervals are half-open: `[start, end)`.

mod columns;
mod density;
mod lanes;
mod partition;

pub use columns::assign_columns;
pub use density::max_overlaps;
pub use lanes::{cluster_lane_counts, direct_lane_counts, overlap_clusters};
pub use partition::{partition_timeline, Timeline};

/// A validated, half-open time range in minutes since midnight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub id: String,
    pub start: u16,
    pub end: u16,
}

impl Interval {
    pub fn new(id: impl Into<String>, start: u16, end: u16) -> Self {
        debug_assert!(start < end, "interval must be non-empty");
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Strict overlap; touching endpoints do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Indices of `intervals` ordered by start, ties broken by id.
///
/// This is the canonical processing order; every algorithm that depends on
/// order goes through it so results do not depend on input order.
pub(crate) fn sweep_order(intervals: &[Interval]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&a, &b| {
        let (x, y) = (&intervals[a], &intervals[b]);
        x.start.cmp(&y.start).then_with(|| x.id.cmp(&y.id))
    });
    order
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Interval;

    pub fn iv(id: &str, start: &str, end: &str) -> Interval {
        let parse = |s: &str| crate::time_codec::ClockTime::parse(s).unwrap().minutes();
        Interval::new(id, parse(start), parse(end))
    }

    /// Deterministic pseudo-random intervals for invariant checks.
    pub fn generated(seed: u64, count: usize) -> Vec<Interval> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let mut next = move |bound: u64| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % bound
        };
        (0..count)
            .map(|i| {
                // 15-minute grid between 08:00 and 18:00, up to 2h long
                let start = 480 + 15 * next(40) as u16;
                let len = 15 * (1 + next(8) as u16);
                Interval::new(format!("e{i:03}"), start, start + len)
            })
            .collect()
    }
}
