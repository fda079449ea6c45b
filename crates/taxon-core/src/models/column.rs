use serde::{Deserialize, Serialize};

/// Pre-aggregated statistics for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    /// Rows with a non-empty value.
    pub non_empty: usize,
    /// Distinct non-empty values.
    pub distinct: usize,
}

/// Column summary for the facility table, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub total_rows: usize,
    pub columns: Vec<ColumnStats>,
}

impl ColumnSummary {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            columns: Vec::new(),
        }
    }

    /// Append a column (builder style).
    pub fn with_column(mut self, name: &str, non_empty: usize, distinct: usize) -> Self {
        self.columns.push(ColumnStats {
            name: name.to_string(),
            non_empty,
            distinct,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// What kind of information a column carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnCategory {
    Structural,
    Identity,
    Descriptive,
    UnusedAttribute,
    RareAttribute,
    ModerateAttribute,
    CommonAttribute,
    UnusedTable,
    TableRef,
    BooleanFlag,
    Comment,
    Other,
}

impl ColumnCategory {
    /// Categories whose columns may take part in an attribute signature.
    pub fn is_signature_candidate(self) -> bool {
        matches!(
            self,
            Self::Descriptive | Self::CommonAttribute | Self::ModerateAttribute | Self::RareAttribute
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Identity => "identity",
            Self::Descriptive => "descriptive",
            Self::UnusedAttribute => "unused_attribute",
            Self::RareAttribute => "rare_attribute",
            Self::ModerateAttribute => "moderate_attribute",
            Self::CommonAttribute => "common_attribute",
            Self::UnusedTable => "unused_table",
            Self::TableRef => "table_ref",
            Self::BooleanFlag => "boolean_flag",
            Self::Comment => "comment",
            Self::Other => "other",
        }
    }
}

/// Per-column profile derived from the column summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub column: String,
    /// Fraction of rows with a value (0.0–1.0).
    pub fill_rate: f64,
    pub filled_count: usize,
    pub distinct_count: usize,
    /// distinct / filled, 0.0 for empty columns.
    pub uniqueness_ratio: f64,
    /// How useful the column is for telling facilities apart (0.0–1.0).
    pub discriminative_score: f64,
    pub category: ColumnCategory,
}
