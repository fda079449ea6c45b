use crate::errors::InputError;
use crate::models::{ColumnSummary, EvidenceRow, FacilityTable};

/// Bulk loads of the three source tables for one dataset.
///
/// Every load is blocking and all-or-nothing. A table that does not exist
/// is reported as [`InputError::MissingInput`].
pub trait ITableSource {
    /// Name of the dataset, used in errors and logs.
    fn dataset_name(&self) -> &str;

    fn load_facilities(&self) -> Result<FacilityTable, InputError>;

    fn load_column_summary(&self) -> Result<ColumnSummary, InputError>;

    /// The facility ↔ measurement-code join table.
    fn load_evidence(&self) -> Result<Vec<EvidenceRow>, InputError>;
}
