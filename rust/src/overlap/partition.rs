//! Elementary-slice partition of a day for occupancy queries.

use crate::models::Slice;

use super::Interval;

/// Ordered slices covering the union of a set of intervals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    pub slices: Vec<Slice>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Ids active anywhere inside `[start, end)`, sorted and deduplicated.
    pub fn active_during(&self, start: u16, end: u16) -> Vec<String> {
        let mut ids: Vec<String> = self
            .slices
            .iter()
            .filter(|s| s.start_minutes < end && start < s.end_minutes)
            .flat_map(|s| s.active_entry_ids.iter().cloned())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Largest number of simultaneously active entries.
    pub fn peak_concurrency(&self) -> usize {
        self.slices
            .iter()
            .map(|s| s.active_entry_ids.len())
            .max()
            .unwrap_or(0)
    }
}

/// Cut the day at every distinct start and end, keeping each piece that has
/// at least one active interval.
///
/// O(n·m) in intervals × boundaries, which is fine for a day's worth of
/// entries on one resource.
pub fn partition_timeline(intervals: &[Interval]) -> Timeline {
    let mut boundaries: Vec<u16> = intervals
        .iter()
        .flat_map(|iv| [iv.start, iv.end])
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let slices = boundaries
        .windows(2)
        .filter_map(|pair| {
            let (lo, hi) = (pair[0], pair[1]);
            let mut active: Vec<String> = intervals
                .iter()
                .filter(|iv| iv.start < hi && iv.end > lo)
                .map(|iv| iv.id.clone())
                .collect();
            if active.is_empty() {
                return None;
            }
            active.sort_unstable();
            Some(Slice {
                start_minutes: lo,
                end_minutes: hi,
                active_entry_ids: active,
            })
        })
        .collect();

    Timeline { slices }
}
