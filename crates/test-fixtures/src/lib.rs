//! Test fixture loader for taxonomy datasets.
//!
//! Each dataset lives in `data/<name>/` as `facilities.json`,
//! `evidence.json` and an optional `column_summary.json`. When the summary
//! is absent it is computed from the facility table.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use taxon_core::errors::InputError;
use taxon_core::models::{ColumnSummary, EvidenceRow, FacilityTable, RawRow};
use taxon_core::traits::ITableSource;

pub const FACILITIES_FILE: &str = "facilities.json";
pub const EVIDENCE_FILE: &str = "evidence.json";
pub const COLUMN_SUMMARY_FILE: &str = "column_summary.json";

/// Columns every facility table header carries, in header order.
const HEADER_COLUMNS: &[&str] = &[
    "id", "site", "service", "is_active", "type", "desc", "category", "info0", "info1",
];

/// Root directory of the bundled datasets.
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Column summary computed from a facility table: fixed header columns
/// first, then every attribute column seen, sorted.
pub fn summarize(table: &FacilityTable) -> ColumnSummary {
    let attributes: BTreeSet<&str> = table
        .iter()
        .flat_map(|r| r.attributes.keys().map(String::as_str))
        .collect();

    let mut summary = ColumnSummary::new(table.len());
    for column in HEADER_COLUMNS.iter().copied().chain(attributes) {
        let values: Vec<&str> = table.iter().filter_map(|r| r.field(column)).collect();
        let distinct: HashSet<&str> = values.iter().copied().collect();
        summary = summary.with_column(column, values.len(), distinct.len());
    }
    summary
}

/// An [`ITableSource`] backed by one fixture dataset directory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    dataset: String,
    dir: PathBuf,
}

impl FixtureSource {
    /// Source for `data/<dataset>/`.
    pub fn new(dataset: &str) -> Self {
        Self::at(dataset, fixtures_root().join(dataset))
    }

    /// Source for an arbitrary directory laid out like a fixture dataset.
    pub fn at(dataset: &str, dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset: dataset.to_string(),
            dir: dir.into(),
        }
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, InputError> {
        let missing = |reason: String| InputError::MissingInput {
            dataset: self.dataset.clone(),
            input: file.to_string(),
            reason,
        };
        let content =
            std::fs::read_to_string(self.dir.join(file)).map_err(|e| missing(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| missing(e.to_string()))
    }
}

impl ITableSource for FixtureSource {
    fn dataset_name(&self) -> &str {
        &self.dataset
    }

    fn load_facilities(&self) -> Result<FacilityTable, InputError> {
        let rows: Vec<RawRow> = self.read(FACILITIES_FILE)?;
        FacilityTable::from_raw_rows(rows)
    }

    fn load_column_summary(&self) -> Result<ColumnSummary, InputError> {
        if self.dir.join(COLUMN_SUMMARY_FILE).exists() {
            self.read(COLUMN_SUMMARY_FILE)
        } else {
            Ok(summarize(&self.load_facilities()?))
        }
    }

    fn load_evidence(&self) -> Result<Vec<EvidenceRow>, InputError> {
        self.read(EVIDENCE_FILE)
    }
}

/// Facility ids of a dataset, in table order.
pub fn facility_ids(dataset: &str) -> Vec<String> {
    let rows: Vec<BTreeMap<String, Option<String>>> =
        load_fixture(&format!("{dataset}/{FACILITIES_FILE}"));
    rows.into_iter()
        .filter_map(|mut row| row.remove("id").flatten())
        .collect()
}
