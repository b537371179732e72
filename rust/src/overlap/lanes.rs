//! Lane counts: how many columns the width of an entry is divided into.

use super::{sweep_order, Interval};

/// Lane count from direct overlaps only.
///
/// `lane(e) = 1 + max(column(x))` over `e` and every interval overlapping `e`
/// pairwise. Not transitive: two intervals that only share a neighbour can
/// end up with different lane counts.
pub fn direct_lane_counts(intervals: &[Interval], columns: &[usize]) -> Vec<usize> {
    debug_assert_eq!(intervals.len(), columns.len());
    let order = sweep_order(intervals);
    let mut lanes: Vec<usize> = columns.iter().map(|&c| c + 1).collect();

    for (pos, &i) in order.iter().enumerate() {
        // Later intervals in sweep order start no earlier, so stop at the
        // first one starting at or after our end.
        for &j in &order[pos + 1..] {
            if intervals[j].start >= intervals[i].end {
                break;
            }
            if intervals[i].overlaps(&intervals[j]) {
                lanes[i] = lanes[i].max(columns[j] + 1);
                lanes[j] = lanes[j].max(columns[i] + 1);
            }
        }
    }

    lanes
}

/// Connected components of the overlap graph.
///
/// Returns a cluster number per interval (input order). Clusters are numbered
/// from 0 in sweep order.
pub fn overlap_clusters(intervals: &[Interval]) -> Vec<usize> {
    let mut clusters = vec![0; intervals.len()];
    let mut current: Option<(usize, u16)> = None;

    for idx in sweep_order(intervals) {
        let interval = &intervals[idx];
        let (cluster, reach) = match current {
            Some((cluster, reach)) if interval.start < reach => {
                (cluster, reach.max(interval.end))
            }
            Some((cluster, _)) => (cluster + 1, interval.end),
            None => (0, interval.end),
        };
        clusters[idx] = cluster;
        current = Some((cluster, reach));
    }

    clusters
}

/// Lane count over the whole transitive overlap cluster.
///
/// Every member of a cluster gets `1 + max column` within the cluster, so
/// entries drawn next to each other always share a width.
pub fn cluster_lane_counts(intervals: &[Interval], columns: &[usize]) -> Vec<usize> {
    debug_assert_eq!(intervals.len(), columns.len());
    let clusters = overlap_clusters(intervals);
    let cluster_count = clusters.iter().max().map_or(0, |&c| c + 1);

    let mut widest = vec![1; cluster_count];
    for (&cluster, &column) in clusters.iter().zip(columns) {
        widest[cluster] = widest[cluster].max(column + 1);
    }

    clusters.iter().map(|&cluster| widest[cluster]).collect()
}

#[cfg(test)]
mod tests {
    use super::super::assign_columns;
    use super::super::testing::{generated, iv};
    use super::*;

    fn reference() -> Vec<Interval> {
        vec![
            iv("A", "09:00", "10:00"),
            iv("B", "09:30", "10:30"),
            iv("C", "10:15", "11:00"),
        ]
    }

    #[test]
    fn test_reference_scenario_direct() {
        let intervals = reference();
        let columns = assign_columns(&intervals);
        assert_eq!(direct_lane_counts(&intervals, &columns), vec![2, 2, 2]);
    }

    #[test]
    fn test_isolated_entry_has_one_lane() {
        let intervals = vec![iv("a", "09:00", "10:00"), iv("b", "11:00", "12:00")];
        let columns = assign_columns(&intervals);
        assert_eq!(direct_lane_counts(&intervals, &columns), vec![1, 1]);
        assert_eq!(cluster_lane_counts(&intervals, &columns), vec![1, 1]);
    }

    #[test]
    fn test_direct_undercounts_where_cluster_does_not() {
        // a(0) b(1) c(2) stacked at 09:00; d only touches c's tail after a and
        // b end, e only overlaps d.
        let intervals = vec![
            iv("a", "09:00", "09:30"),
            iv("b", "09:00", "09:30"),
            iv("c", "09:00", "10:30"),
            iv("d", "10:00", "11:00"),
            iv("e", "10:45", "11:30"),
        ];
        let columns = assign_columns(&intervals);
        assert_eq!(columns, vec![0, 1, 2, 0, 1]);

        let direct = direct_lane_counts(&intervals, &columns);
        assert_eq!(direct, vec![3, 3, 3, 3, 2]);

        let cluster = cluster_lane_counts(&intervals, &columns);
        assert_eq!(cluster, vec![3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_clusters_split_on_touching_endpoints() {
        let intervals = vec![
            iv("a", "09:00", "10:00"),
            iv("b", "09:30", "10:00"),
            iv("c", "10:00", "11:00"),
            iv("d", "12:00", "12:30"),
        ];
        assert_eq!(overlap_clusters(&intervals), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_cluster_chains_through_long_entry() {
        // b and c never overlap each other but both overlap a
        let intervals = vec![
            iv("c", "11:00", "12:00"),
            iv("a", "09:00", "12:00"),
            iv("b", "09:30", "10:00"),
        ];
        assert_eq!(overlap_clusters(&intervals), vec![0, 0, 0]);
    }

    #[test]
    fn test_lane_bounds_hold_on_generated_days() {
        for seed in 0..25 {
            let intervals = generated(seed, 30);
            let columns = assign_columns(&intervals);
            let direct = direct_lane_counts(&intervals, &columns);
            let cluster = cluster_lane_counts(&intervals, &columns);
            for i in 0..intervals.len() {
                assert!(direct[i] > columns[i]);
                assert!(cluster[i] >= direct[i]);
            }
        }
    }
}
