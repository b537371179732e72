//! Sweep-line column assignment.

use super::{sweep_order, Interval};

/// Assign each interval the smallest column not used by any still-active
/// interval at its start.
///
/// Intervals are swept by start (ties by id). Before placing an interval,
/// every active interval with `end <= start` expires. Two overlapping
/// intervals never share a column.
///
/// Returns one column index per input interval, in input order.
pub fn assign_columns(intervals: &[Interval]) -> Vec<usize> {
    let mut columns = vec![0; intervals.len()];
    // (end, column) of intervals still on screen
    let mut active: Vec<(u16, usize)> = Vec::new();
    let mut taken: Vec<bool> = Vec::new();

    for idx in sweep_order(intervals) {
        let current = &intervals[idx];
        active.retain(|&(end, _)| end > current.start);

        taken.clear();
        taken.resize(active.len() + 1, false);
        for &(_, column) in &active {
            // Columns >= active.len() + 1 cannot be the smallest free one
            if column < taken.len() {
                taken[column] = true;
            }
        }
        let column = taken.iter().position(|&t| !t).unwrap_or(active.len());

        columns[idx] = column;
        active.push((current.end, column));
    }

    columns
}
