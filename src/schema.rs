//! Database schema definitions
//!
//! This module provides constants for table and column names used with rusqlite.
//! Keeping the names in one place keeps the hand-written SQL in `db` honest.

/// Category table schema
pub mod category {
    /// Table name
    pub const TABLE: &str = "category";
    /// Primary key column
    pub const ID: &str = "id";
    /// Category name column
    pub const NAME: &str = "name";
    /// Derived mapping-completion percentage column
    pub const PERCENT_MAPPED: &str = "percent_mapped";
    /// Display ordering column
    pub const SEQ_NO: &str = "seq_no";
}

/// Sub-category table schema
pub mod sub_category {
    /// Table name
    pub const TABLE: &str = "sub_category";
    /// Primary key column
    pub const ID: &str = "id";
    /// Sub-category name column
    pub const NAME: &str = "name";
    /// Foreign key to category table
    pub const CATEGORY_ID: &str = "category_id";
    /// Free-text comment column
    pub const COMMENT: &str = "comment";
    /// Display ordering column
    pub const SEQ_NO: &str = "seq_no";
}

/// ERP table metadata schema
pub mod erp_table {
    /// Table name
    pub const TABLE: &str = "erp_table";
    /// Primary key column
    pub const ID: &str = "id";
    /// ERP table name column
    pub const NAME: &str = "name";
    /// Description column
    pub const DESCRIPTION: &str = "description";
}

/// ERP column metadata schema
pub mod erp_column {
    /// Table name
    pub const TABLE: &str = "erp_column";
    /// Primary key column
    pub const ID: &str = "id";
    /// ERP column name column
    pub const NAME: &str = "name";
    /// Free-text comment column
    pub const COMMENT: &str = "comment";
    /// Declared SQL type column
    pub const COLUMN_TYPE: &str = "column_type";
    /// Foreign key to erp_table
    pub const TABLE_ID: &str = "table_id";
    /// NOT NULL constraint flag column
    pub const NOT_NULL: &str = "not_null";
    /// PRIMARY KEY constraint flag column
    pub const PRIMARY_KEY: &str = "primary_key";
    /// UNIQUE constraint flag column
    pub const IS_UNIQUE: &str = "is_unique";
    /// Declared default value column
    pub const DEFAULT_VALUE: &str = "default_value";
}

/// Requirement lines table schema
pub mod lines {
    /// Table name
    pub const TABLE: &str = "lines";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to category table
    pub const CATEGORYID: &str = "categoryid";
    /// Default value column ("default" on the wire)
    pub const DEFAULT_VALUE: &str = "default_value";
    /// Customer settings column
    pub const CUSTOMER_SETTINGS: &str = "customer_settings";
    /// Character count column
    pub const NO_OF_CHARS: &str = "no_of_chars";
    /// Field name column; only lines with a non-blank field name count
    /// toward the mapping percentage
    pub const FIELD_NAME: &str = "field_name";
    /// Mapping rationale column
    pub const REASON: &str = "reason";
    /// Line name column
    pub const NAME: &str = "name";
    /// Free-text comment column
    pub const COMMENT: &str = "comment";
    /// Foreign key to sub_category
    pub const SUB_CATEGORY_ID: &str = "sub_category_id";
    /// Foreign key to erp_table
    pub const TABLE_ID: &str = "table_id";
    /// Foreign key to erp_column
    pub const COLUMN_ID: &str = "column_id";
}
