//! In-memory historical dataset with a plate index

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::warn;

use super::truck_record::TruckRecord;

/// Normalise a plate for lookup: trim surrounding whitespace and upper-case
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Read-only collection of past service rows, keyed by plate.
///
/// Row indices per plate are kept most-recent-first: newest
/// `service_date` first, undated rows last, and rows sharing a date ordered
/// with the later row first.
#[derive(Debug, Clone, Default)]
pub struct HistoricalDataset {
    records: Vec<TruckRecord>,
    by_plate: HashMap<String, Vec<usize>>,
}

impl HistoricalDataset {
    /// Build the dataset and its plate index. Rows with a blank plate are
    /// dropped.
    pub fn new(records: Vec<TruckRecord>) -> Self {
        let total = records.len();
        let records: Vec<TruckRecord> = records
            .into_iter()
            .filter(|r| !r.plate.trim().is_empty())
            .collect();
        if records.len() < total {
            warn!(
                skipped = total - records.len(),
                "dropped historical rows without a plate"
            );
        }

        let mut by_plate: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_plate
                .entry(normalize_plate(&record.plate))
                .or_default()
                .push(idx);
        }
        for indices in by_plate.values_mut() {
            indices.sort_by(|&a, &b| most_recent_first(&records, a, b));
        }

        Self { records, by_plate }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// All rows in load order
    pub fn records(&self) -> &[TruckRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct trucks
    pub fn distinct_plates(&self) -> usize {
        self.by_plate.len()
    }

    /// Rows for a plate, most recent first. Empty when the plate is unknown.
    pub fn rows_for_plate(&self, plate: &str) -> Vec<&TruckRecord> {
        self.by_plate
            .get(&normalize_plate(plate))
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Per-plate history slices, each most recent first, ordered by plate
    pub fn histories(&self) -> Vec<(&str, Vec<&TruckRecord>)> {
        let mut plates: Vec<&String> = self.by_plate.keys().collect();
        plates.sort();
        plates
            .into_iter()
            .map(|plate| {
                let rows = self.by_plate[plate]
                    .iter()
                    .map(|&i| &self.records[i])
                    .collect();
                (plate.as_str(), rows)
            })
            .collect()
    }

    /// Normalised plates in sorted order
    pub fn plates(&self) -> Vec<&str> {
        let mut plates: Vec<&str> = self.by_plate.keys().map(String::as_str).collect();
        plates.sort_unstable();
        plates
    }
}

fn most_recent_first(records: &[TruckRecord], a: usize, b: usize) -> Ordering {
    let by_date = match (records[a].service_date, records[b].service_date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| b.cmp(&a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(plate: &str, date: Option<(i32, u32, u32)>, days: f64) -> TruckRecord {
        TruckRecord {
            plate: plate.to_string(),
            service_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            days_until_next_service: Some(days),
            ..Default::default()
        }
    }

    #[test]
    fn test_rows_most_recent_first() {
        let dataset = HistoricalDataset::new(vec![
            row("MH12AB1234", Some((2023, 1, 10)), 1.0),
            row("MH12AB1234", Some((2024, 6, 1)), 2.0),
            row("KA01ZZ0001", Some((2024, 1, 1)), 9.0),
            row("MH12AB1234", None, 3.0),
            row("MH12AB1234", Some((2023, 8, 20)), 4.0),
        ]);

        let days: Vec<f64> = dataset
            .rows_for_plate("MH12AB1234")
            .iter()
            .filter_map(|r| r.days_until_next_service)
            .collect();
        assert_eq!(days, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_same_date_later_row_first() {
        let dataset = HistoricalDataset::new(vec![
            row("MH12AB1234", Some((2024, 6, 1)), 1.0),
            row("MH12AB1234", Some((2024, 6, 1)), 2.0),
        ]);
        let rows = dataset.rows_for_plate("MH12AB1234");
        assert_eq!(rows[0].days_until_next_service, Some(2.0));
    }

    #[test]
    fn test_lookup_normalizes_plate() {
        let dataset = HistoricalDataset::new(vec![row("mh12ab1234", None, 1.0)]);
        assert_eq!(dataset.rows_for_plate("  MH12AB1234 ").len(), 1);
    }

    #[test]
    fn test_blank_plates_dropped() {
        let dataset = HistoricalDataset::new(vec![row("  ", None, 1.0), row("A1", None, 2.0)]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.distinct_plates(), 1);
    }

    #[test]
    fn test_unknown_plate_is_empty() {
        let dataset = HistoricalDataset::new(vec![row("A1", None, 2.0)]);
        assert!(dataset.rows_for_plate("XYZ123").is_empty());
    }
}
