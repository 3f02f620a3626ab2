//! Fixed-schema dataset assembly and export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::pbp::ShotRecord;

/// Ordered collection of shot records sharing one player/season scope.
/// Append-only during construction, immutable once built; owned exclusively
/// by whoever built it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ShotRecord>,
}

impl Dataset {
    /// Export column order. Every writer follows it.
    pub const COLUMNS: [&'static str; 5] = ["home", "distance", "type", "assisted", "result"];

    pub fn from_records(records: Vec<ShotRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[ShotRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShotRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seeded shuffle split into `(train, test)`. The same seed always
    /// produces the same partition.
    pub fn split(&self, test_fraction: f64, seed: u64) -> (Dataset, Dataset) {
        let mut shuffled = self.records.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);
        let test_len = ((shuffled.len() as f64) * test_fraction).round() as usize;
        let test = shuffled.split_off(shuffled.len() - test_len.min(shuffled.len()));
        (Dataset::from_records(shuffled), Dataset::from_records(test))
    }

    /// Render as CSV in the fixed column order. Booleans are written as
    /// 0/1 to keep the file directly loadable as a numeric table.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&Self::COLUMNS.join(","));
        out.push('\n');
        for r in &self.records {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                u8::from(r.is_home),
                r.distance_ft,
                csv_field(&r.shot_type),
                u8::from(r.assisted),
                u8::from(r.made),
            ));
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.records).context("failed to serialize dataset")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ShotRecord;
    type IntoIter = std::slice::Iter<'a, ShotRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Quote a CSV field only when it needs it.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(distance_ft: u32, made: bool) -> ShotRecord {
        ShotRecord {
            is_home: distance_ft % 2 == 0,
            distance_ft,
            shot_type: "jump shot".to_string(),
            assisted: made,
            made,
        }
    }

    #[test]
    fn round_trip_preserves_records_and_order() {
        let records: Vec<ShotRecord> = (0..10).map(|i| record(i, i % 3 == 0)).collect();
        let dataset = Dataset::from_records(records.clone());
        assert_eq!(dataset.records(), records.as_slice());
        let collected: Vec<&ShotRecord> = dataset.iter().collect();
        assert_eq!(collected.len(), 10);
        assert_eq!(collected[0], &records[0]);
        assert_eq!(collected[9], &records[9]);
    }

    #[test]
    fn csv_has_fixed_header_and_numeric_booleans() {
        let dataset = Dataset::from_records(vec![
            ShotRecord {
                is_home: true,
                distance_ft: 25,
                shot_type: "3-pt jump shot".into(),
                assisted: true,
                made: true,
            },
            ShotRecord {
                is_home: false,
                distance_ft: 0,
                shot_type: "dunk".into(),
                assisted: false,
                made: false,
            },
        ]);
        let csv = dataset.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "home,distance,type,assisted,result");
        assert_eq!(lines[1], "1,25,3-pt jump shot,1,1");
        assert_eq!(lines[2], "0,0,dunk,0,0");
    }

    #[test]
    fn csv_quotes_fields_only_when_needed() {
        assert_eq!(csv_field("layup"), "layup");
        assert_eq!(csv_field("tip, in"), "\"tip, in\"");
        assert_eq!(csv_field("a \"b\""), "\"a \"\"b\"\"\"");
    }

    #[test]
    fn split_is_deterministic_and_partitions_the_data() {
        let dataset = Dataset::from_records((0..100).map(|i| record(i, i % 2 == 0)).collect());
        let (train_a, test_a) = dataset.split(0.25, 7);
        let (train_b, test_b) = dataset.split(0.25, 7);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(test_a.len(), 25);
        assert_eq!(train_a.len() + test_a.len(), dataset.len());
    }

    #[test]
    fn json_export_shape() {
        let dataset = Dataset::from_records(vec![record(25, true)]);
        let json = serde_json::to_value(dataset.records()).unwrap();
        assert_eq!(json[0]["distance_ft"], 25);
        assert_eq!(json[0]["made"], true);
    }
}
