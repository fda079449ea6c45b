/// Taxonomy pipeline version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Known structural column names (always present, low information).
pub const STRUCTURAL_COLUMNS: &[&str] = &["site", "service", "is_active"];

/// Known descriptive column names (free text describing the facility).
pub const DESCRIPTIVE_COLUMNS: &[&str] = &["desc", "type", "category", "info0", "info1"];

/// Column name carrying the facility identifier.
pub const ID_COLUMN: &str = "id";

/// Prefix of sparse attribute columns (`attr0`, `attr27`, ...).
pub const ATTRIBUTE_PREFIX: &str = "attr";

/// Prefix of table-reference columns (`table0`, ...).
pub const TABLE_PREFIX: &str = "table";

/// Prefix of yes/no flag columns.
pub const BOOLEAN_FLAG_PREFIX: &str = "yes_no";

/// Free-text comment column.
pub const COMMENT_COLUMN: &str = "comment";

/// Name given to a group whose keyword list is empty.
pub const UNKNOWN_EQUIPMENT_NAME: &str = "Unknown Equipment Type";

/// Column holding the facility type label.
pub const TYPE_COLUMN: &str = "type";

/// Column holding the facility category label.
pub const CATEGORY_COLUMN: &str = "category";
