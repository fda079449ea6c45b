use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::constants::ID_COLUMN;
use crate::errors::InputError;

/// One untyped source row, as handed over by the storage collaborator.
pub type RawRow = BTreeMap<String, Option<String>>;

/// Maximum characters of a description kept on a display snapshot.
const SNAPSHOT_DESC_CHARS: usize = 100;

/// One row of the facility table.
///
/// Known columns are explicit fields; the sparse `attrN` / `tableN` /
/// flag columns live in `attributes`. Every stored value is trimmed and
/// non-empty, so "present" and "populated" mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRow")]
pub struct FacilityRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info1: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl FacilityRecord {
    /// Create a record with only an id. Fails on a blank id.
    pub fn new(id: impl Into<String>) -> Result<Self, InputError> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err(InputError::InvalidRecord {
                row: 0,
                reason: "facility id is blank".to_string(),
            });
        }
        Ok(Self {
            id: id.to_string(),
            site: None,
            service: None,
            is_active: None,
            kind: None,
            desc: None,
            category: None,
            info0: None,
            info1: None,
            attributes: BTreeMap::new(),
        })
    }

    /// Build a record from `(column, value)` pairs; one pair must be `id`.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, InputError> {
        let row: RawRow = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect();
        Self::try_from(row)
    }

    /// Set a column value. Blank values clear the column.
    pub fn set_field(&mut self, column: &str, value: Option<&str>) {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let slot = match column.to_ascii_lowercase().as_str() {
            "site" => &mut self.site,
            "service" => &mut self.service,
            "is_active" => &mut self.is_active,
            "type" => &mut self.kind,
            "desc" => &mut self.desc,
            "category" => &mut self.category,
            "info0" => &mut self.info0,
            "info1" => &mut self.info1,
            _ => {
                match value {
                    Some(v) => self.attributes.insert(column.to_string(), v),
                    None => self.attributes.remove(column),
                };
                return;
            }
        };
        *slot = value;
    }

    /// The populated value of `column`, or `None` if it is empty.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column.to_ascii_lowercase().as_str() {
            ID_COLUMN => Some(self.id.as_str()),
            "site" => self.site.as_deref(),
            "service" => self.service.as_deref(),
            "is_active" => self.is_active.as_deref(),
            "type" => self.kind.as_deref(),
            "desc" => self.desc.as_deref(),
            "category" => self.category.as_deref(),
            "info0" => self.info0.as_deref(),
            "info1" => self.info1.as_deref(),
            _ => self.attributes.get(column).map(String::as_str),
        }
    }

    /// True iff `column` holds a non-empty value.
    pub fn is_populated(&self, column: &str) -> bool {
        self.field(column).is_some()
    }

    /// Short display projection of this record.
    pub fn snapshot(&self) -> FacilitySnapshot {
        FacilitySnapshot {
            id: self.id.clone(),
            desc: self
                .desc
                .as_ref()
                .map(|d| d.chars().take(SNAPSHOT_DESC_CHARS).collect()),
            kind: self.kind.clone(),
        }
    }
}

impl TryFrom<RawRow> for FacilityRecord {
    type Error = InputError;

    fn try_from(row: RawRow) -> Result<Self, Self::Error> {
        let id = row
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(ID_COLUMN))
            .and_then(|(_, v)| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| InputError::InvalidRecord {
                row: 0,
                reason: "missing required field 'id'".to_string(),
            })?;

        let mut record = Self::new(id)?;
        for (column, value) in &row {
            if column.eq_ignore_ascii_case(ID_COLUMN) {
                continue;
            }
            record.set_field(column, value.as_deref());
        }
        Ok(record)
    }
}

/// Id plus the short text fields retained for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitySnapshot {
    pub id: String,
    pub desc: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The full facility table for one run, indexed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<FacilityRecord>", into = "Vec<FacilityRecord>")]
pub struct FacilityTable {
    records: Vec<FacilityRecord>,
    index: HashMap<String, usize>,
}

impl FacilityTable {
    /// Build a table, rejecting duplicate ids.
    pub fn new(records: Vec<FacilityRecord>) -> Result<Self, InputError> {
        let mut index = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), row).is_some() {
                return Err(InputError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }
        Ok(Self { records, index })
    }

    /// Build a table from raw rows, reporting the offending row index on failure.
    pub fn from_raw_rows(rows: Vec<RawRow>) -> Result<Self, InputError> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, raw)| {
                FacilityRecord::try_from(raw).map_err(|e| match e {
                    InputError::InvalidRecord { reason, .. } => {
                        InputError::InvalidRecord { row, reason }
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&FacilityRecord> {
        self.index.get(id).map(|&row| &self.records[row])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

impl TryFrom<Vec<FacilityRecord>> for FacilityTable {
    type Error = InputError;

    fn try_from(records: Vec<FacilityRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<FacilityTable> for Vec<FacilityRecord> {
    fn from(table: FacilityTable) -> Self {
        table.records
    }
}
