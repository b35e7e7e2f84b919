//! Per-truck history lookup over the loaded dataset

use std::collections::BTreeSet;

use crate::model::{CategoricalField, HistoricalDataset, TruckRecord};

/// Read-only view over a [`HistoricalDataset`]
#[derive(Debug, Clone, Copy)]
pub struct HistoryLookup<'a> {
    dataset: &'a HistoricalDataset,
}

impl<'a> HistoryLookup<'a> {
    pub fn new(dataset: &'a HistoricalDataset) -> Self {
        Self { dataset }
    }

    /// Every row for the plate, most recent first. Unknown or blank
    /// plates yield an empty list.
    pub fn find_by_plate(&self, plate: &str) -> Vec<&'a TruckRecord> {
        if plate.trim().is_empty() {
            return Vec::new();
        }
        self.dataset.rows_for_plate(plate)
    }

    /// Most recent row for the plate
    pub fn latest(&self, plate: &str) -> Option<&'a TruckRecord> {
        self.find_by_plate(plate).into_iter().next()
    }

    /// Request template from the latest row, with the target cleared
    pub fn autofill(&self, plate: &str) -> Option<TruckRecord> {
        self.latest(plate).map(TruckRecord::as_request)
    }

    /// Sorted distinct non-blank values seen for a categorical field
    pub fn distinct_categories(&self, field: CategoricalField) -> Vec<String> {
        self.dataset
            .records()
            .iter()
            .filter_map(|r| r.categorical(field))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn plates(&self) -> Vec<&'a str> {
        self.dataset.plates()
    }
}
