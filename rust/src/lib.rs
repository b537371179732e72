//! Interval overlap layout engine for day/week schedule grids.
//!
//! Given the entries of one resource on one day (a doctor's visits, an
//! assistant's scheduled and actual windows, a cabinet's reservations) this
//! crate assigns every entry a column and a lane count so that concurrent
//! entries render side by side, and maps time ranges to pixel geometry.
//!
//! Everything is a pure function of the entry set and a [`LayoutConfig`];
//! a Python extension module exposes the same surface.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

pub mod cache;
mod config;
pub mod layout;
pub mod logging;
mod models;
pub mod overlap;
pub mod position;
pub mod time_codec;

pub use cache::{content_key, LayoutCache};
pub use config::{ConfigError, LaneSizing, LayoutConfig, WindowPolicy};
pub use layout::{
    layout_entries, partition_entries, resolve_range, EntryError, PartitionResult, ResolvedRange,
};
pub use models::{
    Entry, Geometry, HorizontalPlacement, Layer, LayoutRecord, LayoutResult, Placement,
    RejectedEntry, Slice,
};
pub use time_codec::{ClockTime, ClockTimeError, MINUTES_PER_DAY};

/// Lay out entries for the schedule grid.
///
/// # Arguments
/// * `entries` - Entries of any number of resources; grouped by `resource_id`
/// * `config` - Grid geometry and policy (defaults when omitted)
///
/// # Returns
/// * LayoutResult with one placement per valid range and the rejected ranges
///
/// # Raises
/// * ValueError if the configuration is invalid
#[pyfunction]
#[pyo3(name = "layout_entries", signature = (entries, config=None))]
fn py_layout_entries(
    entries: Vec<Entry>,
    config: Option<LayoutConfig>,
) -> PyResult<LayoutResult> {
    let config = config.unwrap_or_default();
    layout_entries(&entries, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Partition each resource's day into slices with a constant active set.
///
/// # Returns
/// * (dict of resource_id -> list of Slice, list of RejectedEntry)
///
/// # Raises
/// * ValueError if the configuration is invalid
#[pyfunction]
#[pyo3(name = "partition_timeline", signature = (entries, layer=Layer::Scheduled, config=None))]
fn py_partition_timeline(
    entries: Vec<Entry>,
    layer: Layer,
    config: Option<LayoutConfig>,
) -> PyResult<(HashMap<String, Vec<Slice>>, Vec<RejectedEntry>)> {
    let config = config.unwrap_or_default();
    match partition_entries(&entries, layer, &config) {
        Ok(result) => {
            let timelines = result
                .timelines
                .into_iter()
                .map(|(resource_id, timeline)| (resource_id, timeline.slices))
                .collect();
            Ok((timelines, result.rejected))
        }
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Decode "HH:MM" into minutes since midnight.
#[pyfunction]
fn parse_clock_time(text: &str) -> PyResult<u16> {
    ClockTime::parse(text)
        .map(ClockTime::minutes)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Encode minutes since midnight as "HH:MM".
#[pyfunction]
fn format_clock_time(minutes: i64) -> PyResult<String> {
    ClockTime::from_minutes(minutes)
        .map(|t| t.to_string())
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Memoizing layout front-end (PyO3 wrapper around [`LayoutCache`]).
#[pyclass(name = "LayoutCache")]
pub struct PyLayoutCache {
    inner: LayoutCache,
}

#[pymethods]
impl PyLayoutCache {
    #[new]
    #[pyo3(signature = (capacity=64))]
    fn new(capacity: usize) -> Self {
        Self {
            inner: LayoutCache::with_capacity(capacity),
        }
    }

    #[pyo3(signature = (entries, config=None))]
    fn layout(
        &mut self,
        entries: Vec<Entry>,
        config: Option<LayoutConfig>,
    ) -> PyResult<LayoutResult> {
        let config = config.unwrap_or_default();
        self.inner
            .layout(&entries, &config)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        let (hits, misses) = self.inner.stats();
        format!(
            "LayoutCache(entries={}, hits={}, misses={})",
            self.inner.len(),
            hits,
            misses
        )
    }
}

/// The schedule_layout.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Layer>()?;
    m.add_class::<Entry>()?;
    m.add_class::<LayoutRecord>()?;
    m.add_class::<Geometry>()?;
    m.add_class::<HorizontalPlacement>()?;
    m.add_class::<Placement>()?;
    m.add_class::<RejectedEntry>()?;
    m.add_class::<LayoutResult>()?;
    m.add_class::<Slice>()?;

    // Config and caching
    m.add_class::<LayoutConfig>()?;
    m.add_class::<PyLayoutCache>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_layout_entries, m)?)?;
    m.add_function(wrap_pyfunction!(py_partition_timeline, m)?)?;
    m.add_function(wrap_pyfunction!(parse_clock_time, m)?)?;
    m.add_function(wrap_pyfunction!(format_clock_time, m)?)?;

    Ok(())
}
