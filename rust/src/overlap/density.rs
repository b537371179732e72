//! Two-hop congestion estimate used as an alternate width signal.

use super::{sweep_order, Interval};

/// For each interval `e`, the largest overlap count among `e` and its
/// direct neighbours, where the overlap count of `b` is the number of
/// intervals intersecting `b` (including `b` itself).
///
/// An entry sitting next to a heavily contended neighbour therefore reports
/// the neighbour's congestion, not only its own. The value is independent of
/// the column assignment.
pub fn max_overlaps(intervals: &[Interval]) -> Vec<usize> {
    let n = intervals.len();
    let order = sweep_order(intervals);

    // neighbours[i] holds every j != i overlapping i
    let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (pos, &i) in order.iter().enumerate() {
        for &j in &order[pos + 1..] {
            if intervals[j].start >= intervals[i].end {
                break;
            }
            if intervals[i].overlaps(&intervals[j]) {
                neighbours[i].push(j);
                neighbours[j].push(i);
            }
        }
    }

    let counts: Vec<usize> = neighbours.iter().map(|list| list.len() + 1).collect();

    (0..n)
        .map(|i| {
            neighbours[i]
                .iter()
                .map(|&j| counts[j])
                .fold(counts[i], usize::max)
        })
        .collect()
}
