//! Layout pipeline: validation, per-resource grouping, and the overlap passes.
//!
//! Entries are grouped by resource; within a resource the scheduled and the
//! actual ranges form two independent layers. Each layer goes through
//! column assignment, lane sizing, density estimation and geometry.
//! A bad entry is rejected on its own and never aborts the rest of the call.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::config::{ConfigError, LaneSizing, LayoutConfig, WindowPolicy};
use crate::models::{Entry, LayoutRecord, LayoutResult, Layer, Placement, RejectedEntry};
use crate::overlap::{
    assign_columns, cluster_lane_counts, direct_lane_counts, max_overlaps, partition_timeline,
    Interval, Timeline,
};
use crate::position::{horizontal_placement, vertical_geometry};
use crate::time_codec::{ClockTime, ClockTimeError};
use crate::{log_debug, log_rejects, log_steps};

/// Why a single entry range was left out of the layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("invalid {field}: {error}")]
    MalformedTime {
        field: &'static str,
        error: ClockTimeError,
    },
    #[error("start {start} is not before end {end}")]
    EmptyRange { start: ClockTime, end: ClockTime },
    #[error("range {start}-{end} lies outside the displayed window {window_start}-{window_end}")]
    OutsideWindow {
        start: ClockTime,
        end: ClockTime,
        window_start: ClockTime,
        window_end: ClockTime,
    },
    #[error("actual range needs both actual_start and actual_end")]
    IncompleteActualRange,
    #[error("duplicate entry id {0:?} on this resource")]
    DuplicateId(String),
}

/// Slice partitions per resource, plus the ranges that failed validation.
#[derive(Clone, Debug, Default)]
pub struct PartitionResult {
    /// Sorted by resource id
    pub timelines: Vec<(String, Timeline)>,
    pub rejected: Vec<RejectedEntry>,
}

/// A validated range in minutes since midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: u16,
    pub end: u16,
    /// Trimmed to the displayed window
    pub clamped: bool,
}

/// Parse and check one range against the displayed window.
///
/// `start >= end` is always an error; only the window check is subject to
/// the clamp policy.
pub fn resolve_range(
    start: &str,
    end: &str,
    window: (u16, u16),
    policy: WindowPolicy,
    fields: (&'static str, &'static str),
) -> Result<ResolvedRange, EntryError> {
    let start = ClockTime::parse(start).map_err(|error| EntryError::MalformedTime {
        field: fields.0,
        error,
    })?;
    let end = ClockTime::parse(end).map_err(|error| EntryError::MalformedTime {
        field: fields.1,
        error,
    })?;
    if start >= end {
        return Err(EntryError::EmptyRange { start, end });
    }

    let (lo, hi) = window;
    let (s, e) = (start.minutes(), end.minutes());
    if s >= lo && e <= hi {
        return Ok(ResolvedRange {
            start: s,
            end: e,
            clamped: false,
        });
    }

    let outside = || EntryError::OutsideWindow {
        start,
        end,
        window_start: ClockTime::from_minutes(lo as i64).unwrap_or(ClockTime::MIDNIGHT),
        window_end: ClockTime::from_minutes(hi as i64).unwrap_or(ClockTime::END_OF_DAY),
    };
    match policy {
        WindowPolicy::Reject => Err(outside()),
        WindowPolicy::Clamp => {
            let (s, e) = (s.max(lo), e.min(hi));
            if s < e {
                Ok(ResolvedRange {
                    start: s,
                    end: e,
                    clamped: true,
                })
            } else {
                Err(outside())
            }
        }
    }
}

/// Lay out every entry: one [`Placement`] per valid range, one
/// [`RejectedEntry`] per invalid one.
///
/// Only a bad configuration fails the whole call. Placements are sorted by
/// resource, layer, start and id; for entries with unique ids they do not
/// depend on input order. Which duplicate survives and the order of
/// `rejected` follow input order.
pub fn layout_entries(
    entries: &[Entry],
    config: &LayoutConfig,
) -> Result<LayoutResult, ConfigError> {
    config.validate()?;
    let policy = config.window_policy()?;
    let sizing = config.lane_sizing()?;
    let verbosity = config.verbosity;

    let mut result = LayoutResult::default();
    for (resource_id, group) in group_by_resource(entries, verbosity, &mut result.rejected) {
        for layer in [Layer::Scheduled, Layer::Actual] {
            let items = validated_layer(&group, layer, config, policy, &mut result.rejected);
            if items.is_empty() {
                continue;
            }
            log_steps!(
                verbosity,
                "Resource {} ({:?}): laying out {} entries",
                resource_id,
                layer,
                items.len()
            );
            result
                .placements
                .extend(layout_layer(&items, layer, sizing, config));
        }
    }

    Ok(result)
}

/// Build the slice partition of one layer for every resource.
pub fn partition_entries(
    entries: &[Entry],
    layer: Layer,
    config: &LayoutConfig,
) -> Result<PartitionResult, ConfigError> {
    config.validate()?;
    let policy = config.window_policy()?;

    let mut result = PartitionResult::default();
    for (resource_id, group) in group_by_resource(entries, config.verbosity, &mut result.rejected)
    {
        let items = validated_layer(&group, layer, config, policy, &mut result.rejected);
        let intervals: Vec<Interval> = items.into_iter().map(|(interval, _)| interval).collect();
        let timeline = partition_timeline(&intervals);
        if !timeline.is_empty() {
            result.timelines.push((resource_id.to_string(), timeline));
        }
    }

    Ok(result)
}

fn reject(
    rejected: &mut Vec<RejectedEntry>,
    entry: &Entry,
    layer: Layer,
    error: EntryError,
    verbosity: u8,
) {
    log_rejects!(
        verbosity,
        "Rejected {} ({:?}) on {}: {}",
        entry.id,
        layer,
        entry.resource_id,
        error
    );
    rejected.push(RejectedEntry {
        entry_id: entry.id.clone(),
        resource_id: entry.resource_id.clone(),
        layer,
        reason: error.to_string(),
    });
}

/// Group by resource id (sorted), dropping repeated ids within a resource.
///
/// The first occurrence of an id wins; later ones are rejected on every layer
/// they carry.
fn group_by_resource<'a>(
    entries: &'a [Entry],
    verbosity: u8,
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<(&'a str, Vec<&'a Entry>)> {
    let mut groups: FxHashMap<&str, Vec<&Entry>> = FxHashMap::default();
    let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();

    for entry in entries {
        if !seen.insert((entry.resource_id.as_str(), entry.id.as_str())) {
            let error = EntryError::DuplicateId(entry.id.clone());
            reject(rejected, entry, Layer::Scheduled, error.clone(), verbosity);
            if entry.actual_start.is_some() || entry.actual_end.is_some() {
                reject(rejected, entry, Layer::Actual, error, verbosity);
            }
            continue;
        }
        groups
            .entry(entry.resource_id.as_str())
            .or_default()
            .push(entry);
    }

    let mut groups: Vec<(&str, Vec<&Entry>)> = groups.into_iter().collect();
    groups.sort_unstable_by_key(|(resource_id, _)| *resource_id);
    groups
}

/// Valid intervals of one layer, paired with their source entry.
fn validated_layer<'a>(
    group: &[&'a Entry],
    layer: Layer,
    config: &LayoutConfig,
    policy: WindowPolicy,
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<(Interval, &'a Entry)> {
    let window = (config.day_start_minutes, config.day_end_minutes);
    let mut items = Vec::with_capacity(group.len());

    for &entry in group {
        let resolved = match layer {
            Layer::Scheduled => {
                resolve_range(&entry.start, &entry.end, window, policy, ("start", "end"))
            }
            Layer::Actual => match (&entry.actual_start, &entry.actual_end) {
                (None, None) => continue,
                (Some(start), Some(end)) => {
                    resolve_range(start, end, window, policy, ("actual_start", "actual_end"))
                }
                _ => Err(EntryError::IncompleteActualRange),
            },
        };

        match resolved {
            Ok(range) => {
                if range.clamped {
                    log_rejects!(
                        config.verbosity,
                        "Clamped {} ({:?}) on {} to [{}-{})",
                        entry.id,
                        layer,
                        entry.resource_id,
                        range.start,
                        range.end
                    );
                }
                items.push((Interval::new(entry.id.clone(), range.start, range.end), entry));
            }
            Err(error) => reject(rejected, entry, layer, error, config.verbosity),
        }
    }

    items
}

/// Run the overlap passes and geometry over one validated layer.
fn layout_layer(
    items: &[(Interval, &Entry)],
    layer: Layer,
    sizing: LaneSizing,
    config: &LayoutConfig,
) -> Vec<Placement> {
    let intervals: Vec<Interval> = items.iter().map(|(interval, _)| interval.clone()).collect();

    let columns = assign_columns(&intervals);
    let lanes = match sizing {
        LaneSizing::Direct => direct_lane_counts(&intervals, &columns),
        LaneSizing::Cluster => cluster_lane_counts(&intervals, &columns),
    };
    let density = max_overlaps(&intervals);

    let mut placements: Vec<Placement> = items
        .iter()
        .enumerate()
        .map(|(i, (interval, entry))| {
            log_debug!(
                config.verbosity,
                "  {} [{}-{}) column={} lanes={} max_overlap={}",
                interval.id,
                interval.start,
                interval.end,
                columns[i],
                lanes[i],
                density[i]
            );
            Placement {
                entry_id: entry.id.clone(),
                resource_id: entry.resource_id.clone(),
                layer,
                start_minutes: interval.start,
                end_minutes: interval.end,
                record: LayoutRecord {
                    entry_id: entry.id.clone(),
                    column_index: columns[i],
                    lane_count: lanes[i],
                },
                max_overlap: density[i],
                geometry: vertical_geometry(interval.start, interval.end, config),
                horizontal: horizontal_placement(columns[i], lanes[i], config),
                payload: entry.payload.clone(),
            }
        })
        .collect();

    placements.sort_by(|a, b| {
        a.start_minutes
            .cmp(&b.start_minutes)
            .then_with(|| a.entry_id.cmp(&b.entry_id))
    });
    placements
}
