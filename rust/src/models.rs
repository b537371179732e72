//! Core data types for the layout engine.

use pyo3::prelude::*;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

// Note: We use std HashMap here for PyO3 interface compatibility

/// Which time range of an entry a placement was computed from.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// The booked range (`start`..`end`).
    Scheduled,
    /// The recorded range (`actual_start`..`actual_end`), drawn behind.
    Actual,
}

impl Layer {
    /// Stacking order for the renderer; higher is drawn on top.
    pub fn z_order(self) -> u8 {
        match self {
            Layer::Actual => 0,
            Layer::Scheduled => 1,
        }
    }
}

/// A time-bounded record on one resource for one day.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct Entry {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub resource_id: String,
    /// "HH:MM"
    #[pyo3(get, set)]
    pub start: String,
    /// "HH:MM"
    #[pyo3(get, set)]
    pub end: String,
    #[pyo3(get, set)]
    pub actual_start: Option<String>,
    #[pyo3(get, set)]
    pub actual_end: Option<String>,
    /// Opaque fields passed through to the placement untouched
    #[pyo3(get, set)]
    pub payload: HashMap<String, String>,
}

impl Entry {
    /// Convenience constructor for a scheduled-only entry without payload.
    pub fn scheduled(id: &str, resource_id: &str, start: &str, end: &str) -> Self {
        Self {
            id: id.to_string(),
            resource_id: resource_id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            ..Self::default()
        }
    }

    /// Attach an actual (recorded) range.
    pub fn with_actual(mut self, start: &str, end: &str) -> Self {
        self.actual_start = Some(start.to_string());
        self.actual_end = Some(end.to_string());
        self
    }
}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.resource_id.hash(state);
        self.start.hash(state);
        self.end.hash(state);
        self.actual_start.hash(state);
        self.actual_end.hash(state);
        let mut payload: Vec<(&String, &String)> = self.payload.iter().collect();
        payload.sort_unstable();
        payload.hash(state);
    }
}

#[pymethods]
impl Entry {
    #[new]
    #[pyo3(signature = (id, resource_id, start, end, actual_start=None, actual_end=None, payload=None))]
    fn new(
        id: String,
        resource_id: String,
        start: String,
        end: String,
        actual_start: Option<String>,
        actual_end: Option<String>,
        payload: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            id,
            resource_id,
            start,
            end,
            actual_start,
            actual_end,
            payload: payload.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Entry(id={:?}, resource_id={:?}, start={:?}, end={:?})",
            self.id, self.resource_id, self.start, self.end
        )
    }
}

/// Column assignment for one entry. Invariant: `column_index < lane_count`.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutRecord {
    #[pyo3(get)]
    pub entry_id: String,
    #[pyo3(get)]
    pub column_index: usize,
    #[pyo3(get)]
    pub lane_count: usize,
}

#[pymethods]
impl LayoutRecord {
    fn __repr__(&self) -> String {
        format!(
            "LayoutRecord(entry_id={:?}, column_index={}, lane_count={})",
            self.entry_id, self.column_index, self.lane_count
        )
    }
}

/// Vertical pixel geometry.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    #[pyo3(get)]
    pub top: f64,
    #[pyo3(get)]
    pub height: f64,
}

#[pymethods]
impl Geometry {
    fn __repr__(&self) -> String {
        format!("Geometry(top={}, height={})", self.top, self.height)
    }
}

/// Horizontal pixel geometry within a resource track.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalPlacement {
    #[pyo3(get)]
    pub left: f64,
    #[pyo3(get)]
    pub width: f64,
}

#[pymethods]
impl HorizontalPlacement {
    fn __repr__(&self) -> String {
        format!("HorizontalPlacement(left={}, width={})", self.left, self.width)
    }
}

/// Everything the grid renderer needs for one laid-out range.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    #[pyo3(get)]
    pub entry_id: String,
    #[pyo3(get)]
    pub resource_id: String,
    #[pyo3(get)]
    pub layer: Layer,
    /// Effective start in minutes (after clamping, if any)
    #[pyo3(get)]
    pub start_minutes: u16,
    #[pyo3(get)]
    pub end_minutes: u16,
    #[pyo3(get)]
    pub record: LayoutRecord,
    /// Two-hop local concurrency; reported next to `record.lane_count`
    #[pyo3(get)]
    pub max_overlap: usize,
    #[pyo3(get)]
    pub geometry: Geometry,
    #[pyo3(get)]
    pub horizontal: HorizontalPlacement,
    #[pyo3(get)]
    pub payload: HashMap<String, String>,
}

#[pymethods]
impl Placement {
    #[getter]
    fn z_order(&self) -> u8 {
        self.layer.z_order()
    }

    fn __repr__(&self) -> String {
        format!(
            "Placement(entry_id={:?}, layer={:?}, column={}, lanes={}, top={}, height={})",
            self.entry_id,
            self.layer,
            self.record.column_index,
            self.record.lane_count,
            self.geometry.top,
            self.geometry.height
        )
    }
}

/// A range that was left out of the layout, with the reason.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedEntry {
    #[pyo3(get)]
    pub entry_id: String,
    #[pyo3(get)]
    pub resource_id: String,
    #[pyo3(get)]
    pub layer: Layer,
    #[pyo3(get)]
    pub reason: String,
}

#[pymethods]
impl RejectedEntry {
    fn __repr__(&self) -> String {
        format!(
            "RejectedEntry(entry_id={:?}, layer={:?}, reason={:?})",
            self.entry_id, self.layer, self.reason
        )
    }
}

/// Result of one layout call.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
    #[pyo3(get)]
    pub placements: Vec<Placement>,
    #[pyo3(get)]
    pub rejected: Vec<RejectedEntry>,
}

impl LayoutResult {
    /// Find the placement for an entry on a given layer.
    pub fn placement(&self, entry_id: &str, layer: Layer) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|p| p.entry_id == entry_id && p.layer == layer)
    }
}

#[pymethods]
impl LayoutResult {
    fn __repr__(&self) -> String {
        format!(
            "LayoutResult(placements={}, rejected={})",
            self.placements.len(),
            self.rejected.len()
        )
    }
}

/// Elementary sub-interval of the day with a constant, non-empty active set.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    #[pyo3(get)]
    pub start_minutes: u16,
    #[pyo3(get)]
    pub end_minutes: u16,
    /// Sorted ids of the entries active in this slice
    #[pyo3(get)]
    pub active_entry_ids: Vec<String>,
}

#[pymethods]
impl Slice {
    fn __repr__(&self) -> String {
        format!(
            "Slice(start={}, end={}, active={:?})",
            self.start_minutes, self.end_minutes, self.active_entry_ids
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHasher;

    fn hash_of(entry: &Entry) -> u64 {
        let mut hasher = FxHasher::default();
        entry.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_actual_layer_drawn_behind() {
        assert!(Layer::Actual.z_order() < Layer::Scheduled.z_order());
    }

    #[test]
    fn test_entry_hash_ignores_payload_order() {
        let mut a = Entry::scheduled("v1", "dr", "09:00", "10:00");
        a.payload.insert("patient".to_string(), "p1".to_string());
        a.payload.insert("room".to_string(), "3".to_string());

        let mut b = Entry::scheduled("v1", "dr", "09:00", "10:00");
        b.payload.insert("room".to_string(), "3".to_string());
        b.payload.insert("patient".to_string(), "p1".to_string());

        assert_eq!(hash_of(&a), hash_of(&b));

        b.payload.insert("room".to_string(), "4".to_string());
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_with_actual() {
        let entry = Entry::scheduled("v1", "dr", "09:00", "10:00").with_actual("09:05", "09:50");
        assert_eq!(entry.actual_start.as_deref(), Some("09:05"));
        assert_eq!(entry.actual_end.as_deref(), Some("09:50"));
    }
}
