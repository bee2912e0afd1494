//! Data models for the mapping service
//!
//! This module contains the database records for the five entities and the
//! explicit request/response types used by the HTTP layer. Response shapes
//! are constructed field-by-field rather than derived from ORM state.

use serde::{Deserialize, Serialize};

/// Database representation of a category
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Database primary key
    pub id: i64,
    /// Category display name
    pub name: String,
    /// Derived share of mapped lines, 0.0 to 100.0; never written by clients
    pub percent_mapped: f64,
    /// Display ordering key
    pub seq_no: Option<i64>,
}

/// Database representation of a sub-category
#[derive(Debug, Clone, Serialize)]
pub struct SubCategory {
    /// Database primary key
    pub id: i64,
    /// Sub-category display name
    pub name: String,
    /// Foreign key to the owning category
    pub category_id: i64,
    /// Free-text comment
    pub comment: Option<String>,
    /// Display ordering key
    pub seq_no: Option<i64>,
}

/// Database representation of an ERP table
#[derive(Debug, Clone, Serialize)]
pub struct ErpTable {
    /// Database primary key
    pub id: i64,
    /// ERP table name
    pub name: String,
    /// Human-written description
    pub description: Option<String>,
}

/// Database representation of an ERP column
#[derive(Debug, Clone, Serialize)]
pub struct ErpColumn {
    /// Database primary key
    pub id: i64,
    /// ERP column name
    pub name: String,
    /// Free-text comment
    pub comment: Option<String>,
    /// Declared SQL type
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    /// Foreign key to the owning ERP table
    pub table_id: Option<i64>,
    /// NOT NULL constraint flag
    pub not_null: bool,
    /// PRIMARY KEY constraint flag
    pub primary_key: bool,
    /// UNIQUE constraint flag
    #[serde(rename = "unique")]
    pub is_unique: bool,
    /// Declared default value
    #[serde(rename = "default")]
    pub default_value: Option<String>,
}

/// Database representation of a requirement line
#[derive(Debug, Clone)]
pub struct Line {
    /// Database primary key
    pub id: i64,
    /// Foreign key to the owning category
    pub categoryid: i64,
    /// Default value for the field
    pub default_value: Option<String>,
    /// Customer-specific settings
    pub customer_settings: Option<String>,
    /// Character count annotation
    pub no_of_chars: Option<String>,
    /// Field name; lines without one are excluded from the percentage
    pub field_name: Option<String>,
    /// Mapping rationale, surfaced as the column description on export
    pub reason: Option<String>,
    /// Line display name
    pub name: String,
    /// Free-text comment
    pub comment: Option<String>,
    /// Optional foreign key to a sub-category
    pub sub_category_id: Option<i64>,
    /// Optional foreign key to the mapped ERP table
    pub table_id: Option<i64>,
    /// Optional foreign key to the mapped ERP column
    pub column_id: Option<i64>,
}

impl Line {
    /// A line counts as mapped when both ends of the mapping are set.
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        self.table_id.is_some() && self.column_id.is_some()
    }
}

/// A line joined with the names of its mapped ERP table and column
#[derive(Debug, Clone, Serialize)]
pub struct LineWithNames {
    pub id: i64,
    pub categoryid: i64,
    #[serde(rename = "default")]
    pub default_value: Option<String>,
    pub customer_settings: Option<String>,
    pub no_of_chars: Option<String>,
    pub field_name: Option<String>,
    pub reason: Option<String>,
    pub name: String,
    pub comment: Option<String>,
    pub sub_category_id: Option<i64>,
    pub table_id: Option<i64>,
    pub column_id: Option<i64>,
    /// Resolved via join; None when the line is unmapped
    pub table_name: Option<String>,
    /// Resolved via join; None when no column is mapped
    pub column_name: Option<String>,
}

/// Data for creating a new category (administrative insert)
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub seq_no: Option<i64>,
}

/// Data for creating a new sub-category (administrative insert)
#[derive(Debug, Clone)]
pub struct NewSubCategory {
    pub name: String,
    pub category_id: i64,
    pub comment: Option<String>,
    pub seq_no: Option<i64>,
}

/// Data for creating a new ERP table (administrative insert)
#[derive(Debug, Clone)]
pub struct NewErpTable {
    pub name: String,
    pub description: Option<String>,
}

/// Data for creating a new ERP column (administrative insert)
#[derive(Debug, Clone, Default)]
pub struct NewErpColumn {
    pub name: String,
    pub comment: Option<String>,
    pub column_type: Option<String>,
    pub table_id: Option<i64>,
    pub not_null: bool,
    pub primary_key: bool,
    pub is_unique: bool,
    pub default_value: Option<String>,
}

/// Data for creating a new requirement line (administrative insert)
#[derive(Debug, Clone, Default)]
pub struct NewLine {
    pub categoryid: i64,
    pub default_value: Option<String>,
    pub customer_settings: Option<String>,
    pub no_of_chars: Option<String>,
    pub field_name: Option<String>,
    pub reason: Option<String>,
    pub name: String,
    pub comment: Option<String>,
    pub sub_category_id: Option<i64>,
    pub table_id: Option<i64>,
    pub column_id: Option<i64>,
}

/// Request body for `PATCH /api/lines/{id}`
///
/// `table_id` absent or 0 clears the whole mapping; `column_id` 0 clears
/// just the column. `comment` is applied independently of the mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineMappingUpdate {
    pub table_id: Option<i64>,
    pub column_id: Option<i64>,
    pub comment: Option<String>,
}

/// Response body for `PATCH /api/lines/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct LineMappingResponse {
    pub id: i64,
    pub categoryid: i64,
    pub table_id: Option<i64>,
    pub column_id: Option<i64>,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub comment: Option<String>,
    /// "updated", "cleared_table_id", or "cleared_column_id"
    pub action: String,
}

/// Request body for `PATCH .../sub-categories/{id}` (comment edit only)
#[derive(Debug, Clone, Deserialize)]
pub struct SubCategoryUpdate {
    pub comment: Option<String>,
}

/// Request body for `PUT .../sub-categories/{id}` (upsert by id)
#[derive(Debug, Clone, Deserialize)]
pub struct SubCategoryUpsert {
    pub name: String,
    pub comment: Option<String>,
    pub seq_no: Option<i64>,
}

/// One hit from the column search
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSearchResult {
    pub column_name: String,
    pub table_name: String,
    pub column_id: i64,
    pub table_id: i64,
    /// "exact" or "partial"
    pub match_type: String,
}

/// Request body for `POST /api/find-table-matches`
#[derive(Debug, Clone, Deserialize)]
pub struct TableMatchRequest {
    pub column_names: Vec<String>,
}

/// One ranked table from the table-match finder
#[derive(Debug, Clone, Serialize)]
pub struct TableMatchResult {
    pub table_id: i64,
    pub table_name: String,
    pub match_count: usize,
    /// The table's column names that matched, in the table's column order
    pub matched_columns: Vec<String>,
}

/// Constraint flags carried on an exported column
#[derive(Debug, Clone, Serialize)]
pub struct SchemaConstraints {
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default: Option<String>,
}

/// One exported column of a mapped table
#[derive(Debug, Clone, Serialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub constraints: SchemaConstraints,
    pub comment: Option<String>,
    /// Copied from the first non-blank `Lines.reason` seen for this column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One exported table with its mapped columns
#[derive(Debug, Clone, Serialize)]
pub struct SchemaTable {
    pub name: String,
    pub description: String,
    pub columns: Vec<SchemaColumn>,
}

/// The mapped-schema export document
#[derive(Debug, Clone, Serialize)]
pub struct MappedSchema {
    /// Tables sorted by name
    pub tables: Vec<SchemaTable>,
    /// RFC 3339 UTC generation timestamp
    pub generated_at: String,
    pub total_tables: usize,
    pub total_mapped_columns: usize,
}

/// Response body for the batch percent-mapped recalculation
#[derive(Debug, Clone, Serialize)]
pub struct RecalculateSummary {
    pub message: String,
    pub updated_count: usize,
}

/// Service banner returned from `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct ServiceBanner {
    pub message: String,
}

/// Liveness response returned from `GET /api/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
}
