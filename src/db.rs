use std::fs;
use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{ApiError, Result};
use crate::models::{
    Category, ErpColumn, ErpTable, Line, LineWithNames, NewCategory, NewErpColumn, NewErpTable,
    NewLine, NewSubCategory, SubCategory,
};
use crate::schema::{category, erp_column, erp_table, lines, sub_category};

// Type alias for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// One (column, owning table) pair, as scanned by the column search and
/// grouped by the table-match finder. Ordered by column id.
#[derive(Debug, Clone)]
pub struct ColumnTableRow {
    pub column_id: i64,
    pub column_name: String,
    pub table_id: i64,
    pub table_name: String,
}

/// One mapped line joined with its ERP table and column, as consumed by the
/// schema exporter. Ordered by line id.
#[derive(Debug, Clone)]
pub struct MappedLineRow {
    pub table_name: String,
    pub table_description: Option<String>,
    pub column: ErpColumn,
    pub reason: Option<String>,
}

/// Database handle wrapping a connection pool.
///
/// Constructed once at process start and passed down; every operation
/// acquires a pooled connection for its own scope, so connections are
/// released regardless of outcome.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a new database connection pool and run migrations
    pub fn new(path: &str, max_connections: u32) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Set up connection manager and pool
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(max_connections).build(manager)?;

        // Run migrations
        let conn = pool.get()?;
        Self::run_migrations(&conn)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(include_str!(
            "../migrations/2025-06-20-000000_create_tables/up.sql"
        ))?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        self.pool.get().map_err(ApiError::from)
    }

    /// Number of connections the pool may hold
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool.max_size()
    }

    // ---- row mappers ----

    fn map_category(row: &Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(category::ID)?,
            name: row.get(category::NAME)?,
            percent_mapped: row.get(category::PERCENT_MAPPED)?,
            seq_no: row.get(category::SEQ_NO)?,
        })
    }

    fn map_sub_category(row: &Row) -> rusqlite::Result<SubCategory> {
        Ok(SubCategory {
            id: row.get(sub_category::ID)?,
            name: row.get(sub_category::NAME)?,
            category_id: row.get(sub_category::CATEGORY_ID)?,
            comment: row.get(sub_category::COMMENT)?,
            seq_no: row.get(sub_category::SEQ_NO)?,
        })
    }

    fn map_erp_table(row: &Row) -> rusqlite::Result<ErpTable> {
        Ok(ErpTable {
            id: row.get(erp_table::ID)?,
            name: row.get(erp_table::NAME)?,
            description: row.get(erp_table::DESCRIPTION)?,
        })
    }

    fn map_erp_column(row: &Row) -> rusqlite::Result<ErpColumn> {
        Ok(ErpColumn {
            id: row.get(erp_column::ID)?,
            name: row.get(erp_column::NAME)?,
            comment: row.get(erp_column::COMMENT)?,
            column_type: row.get(erp_column::COLUMN_TYPE)?,
            table_id: row.get(erp_column::TABLE_ID)?,
            not_null: row.get(erp_column::NOT_NULL)?,
            primary_key: row.get(erp_column::PRIMARY_KEY)?,
            is_unique: row.get(erp_column::IS_UNIQUE)?,
            default_value: row.get(erp_column::DEFAULT_VALUE)?,
        })
    }

    fn map_line(row: &Row) -> rusqlite::Result<Line> {
        Ok(Line {
            id: row.get(lines::ID)?,
            categoryid: row.get(lines::CATEGORYID)?,
            default_value: row.get(lines::DEFAULT_VALUE)?,
            customer_settings: row.get(lines::CUSTOMER_SETTINGS)?,
            no_of_chars: row.get(lines::NO_OF_CHARS)?,
            field_name: row.get(lines::FIELD_NAME)?,
            reason: row.get(lines::REASON)?,
            name: row.get(lines::NAME)?,
            comment: row.get(lines::COMMENT)?,
            sub_category_id: row.get(lines::SUB_CATEGORY_ID)?,
            table_id: row.get(lines::TABLE_ID)?,
            column_id: row.get(lines::COLUMN_ID)?,
        })
    }

    fn map_line_with_names(row: &Row) -> rusqlite::Result<LineWithNames> {
        Ok(LineWithNames {
            id: row.get(lines::ID)?,
            categoryid: row.get(lines::CATEGORYID)?,
            default_value: row.get(lines::DEFAULT_VALUE)?,
            customer_settings: row.get(lines::CUSTOMER_SETTINGS)?,
            no_of_chars: row.get(lines::NO_OF_CHARS)?,
            field_name: row.get(lines::FIELD_NAME)?,
            reason: row.get(lines::REASON)?,
            name: row.get(lines::NAME)?,
            comment: row.get(lines::COMMENT)?,
            sub_category_id: row.get(lines::SUB_CATEGORY_ID)?,
            table_id: row.get(lines::TABLE_ID)?,
            column_id: row.get(lines::COLUMN_ID)?,
            table_name: row.get("table_name")?,
            column_name: row.get("column_name")?,
        })
    }

    // ---- categories ----

    /// Get all categories ordered by seq_no, then id
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {} NULLS LAST, {}",
            category::TABLE,
            category::SEQ_NO,
            category::ID
        ))?;
        let rows = stmt.query_map(params![], |row| Self::map_category(row))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Get a category by id
    pub fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        let conn = self.get_connection()?;

        let result = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?1",
                    category::TABLE,
                    category::ID
                ),
                params![category_id],
                |row| Self::map_category(row),
            )
            .optional()?;

        Ok(result)
    }

    /// Get all category ids, for batch recalculation
    pub fn list_category_ids(&self) -> Result<Vec<i64>> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY {}",
            category::ID,
            category::TABLE,
            category::ID
        ))?;
        let rows = stmt.query_map(params![], |row| row.get::<_, i64>(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Recompute and persist a category's percent_mapped statistic.
    ///
    /// total = lines of the category with a non-blank field_name;
    /// mapped = the subset with both table_id and column_id set. The counts
    /// and the update commit as a single transaction. Returns the new value.
    pub fn recalculate_percent_mapped(&self, category_id: i64) -> Result<f64> {
        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;

        let total: i64 = tx.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE {} = ?1 AND {} IS NOT NULL AND {} != ''",
                lines::TABLE,
                lines::CATEGORYID,
                lines::FIELD_NAME,
                lines::FIELD_NAME
            ),
            params![category_id],
            |row| row.get(0),
        )?;

        let percent_mapped = if total == 0 {
            0.0
        } else {
            let mapped: i64 = tx.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {} = ?1 AND {} IS NOT NULL AND {} != '' \
                     AND {} IS NOT NULL AND {} IS NOT NULL",
                    lines::TABLE,
                    lines::CATEGORYID,
                    lines::FIELD_NAME,
                    lines::FIELD_NAME,
                    lines::TABLE_ID,
                    lines::COLUMN_ID
                ),
                params![category_id],
                |row| row.get(0),
            )?;

            (mapped as f64 / total as f64) * 100.0
        };

        tx.execute(
            &format!(
                "UPDATE {} SET {} = ?1 WHERE {} = ?2",
                category::TABLE,
                category::PERCENT_MAPPED,
                category::ID
            ),
            params![percent_mapped, category_id],
        )?;
        tx.commit()?;

        Ok(percent_mapped)
    }

    /// Insert a new category (administrative/seed path)
    pub fn insert_category(&self, new_category: NewCategory) -> Result<Category> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
                category::TABLE,
                category::NAME,
                category::SEQ_NO
            ),
            params![new_category.name, new_category.seq_no],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Category {
            id,
            name: new_category.name,
            percent_mapped: 0.0,
            seq_no: new_category.seq_no,
        })
    }

    // ---- sub-categories ----

    /// Get all sub-categories of a category, ordered by seq_no nulls-last, then id
    pub fn list_sub_categories(&self, category_id: i64) -> Result<Vec<SubCategory>> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} WHERE {} = ?1 ORDER BY {} NULLS LAST, {}",
            sub_category::TABLE,
            sub_category::CATEGORY_ID,
            sub_category::SEQ_NO,
            sub_category::ID
        ))?;
        let rows = stmt.query_map(params![category_id], |row| Self::map_sub_category(row))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Get a sub-category by id, regardless of owning category
    pub fn get_sub_category(&self, sub_category_id: i64) -> Result<Option<SubCategory>> {
        let conn = self.get_connection()?;

        let result = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?1",
                    sub_category::TABLE,
                    sub_category::ID
                ),
                params![sub_category_id],
                |row| Self::map_sub_category(row),
            )
            .optional()?;

        Ok(result)
    }

    /// Get a sub-category by id scoped to a category
    pub fn get_sub_category_in_category(
        &self,
        category_id: i64,
        sub_category_id: i64,
    ) -> Result<Option<SubCategory>> {
        let conn = self.get_connection()?;

        let result = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?1 AND {} = ?2",
                    sub_category::TABLE,
                    sub_category::ID,
                    sub_category::CATEGORY_ID
                ),
                params![sub_category_id, category_id],
                |row| Self::map_sub_category(row),
            )
            .optional()?;

        Ok(result)
    }

    /// Update a sub-category's comment only
    pub fn update_sub_category_comment(&self, sub_category_id: i64, comment: &str) -> Result<()> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?1 WHERE {} = ?2",
                sub_category::TABLE,
                sub_category::COMMENT,
                sub_category::ID
            ),
            params![comment, sub_category_id],
        )?;

        Ok(())
    }

    /// Update a sub-category's name, comment, and ordering key
    pub fn update_sub_category(
        &self,
        sub_category_id: i64,
        name: &str,
        comment: Option<&str>,
        seq_no: Option<i64>,
    ) -> Result<()> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2, {} = ?3 WHERE {} = ?4",
                sub_category::TABLE,
                sub_category::NAME,
                sub_category::COMMENT,
                sub_category::SEQ_NO,
                sub_category::ID
            ),
            params![name, comment, seq_no, sub_category_id],
        )?;

        Ok(())
    }

    /// Insert a sub-category with a client-supplied id (upsert path)
    pub fn insert_sub_category_with_id(
        &self,
        sub_category_id: i64,
        category_id: i64,
        name: &str,
        comment: Option<&str>,
        seq_no: Option<i64>,
    ) -> Result<()> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4, ?5)",
                sub_category::TABLE,
                sub_category::ID,
                sub_category::NAME,
                sub_category::CATEGORY_ID,
                sub_category::COMMENT,
                sub_category::SEQ_NO
            ),
            params![sub_category_id, name, category_id, comment, seq_no],
        )?;

        Ok(())
    }

    /// Insert a new sub-category (administrative/seed path)
    pub fn insert_sub_category(&self, new_sub_category: NewSubCategory) -> Result<SubCategory> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4)",
                sub_category::TABLE,
                sub_category::NAME,
                sub_category::CATEGORY_ID,
                sub_category::COMMENT,
                sub_category::SEQ_NO
            ),
            params![
                new_sub_category.name,
                new_sub_category.category_id,
                new_sub_category.comment,
                new_sub_category.seq_no
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(SubCategory {
            id,
            name: new_sub_category.name,
            category_id: new_sub_category.category_id,
            comment: new_sub_category.comment,
            seq_no: new_sub_category.seq_no,
        })
    }

    // ---- ERP tables and columns ----

    /// Get all ERP tables ordered by id
    pub fn list_tables(&self) -> Result<Vec<ErpTable>> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {}",
            erp_table::TABLE,
            erp_table::ID
        ))?;
        let rows = stmt.query_map(params![], |row| Self::map_erp_table(row))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Get an ERP table by id
    pub fn get_table(&self, table_id: i64) -> Result<Option<ErpTable>> {
        let conn = self.get_connection()?;

        let result = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?1",
                    erp_table::TABLE,
                    erp_table::ID
                ),
                params![table_id],
                |row| Self::map_erp_table(row),
            )
            .optional()?;

        Ok(result)
    }

    /// Get all columns of an ERP table ordered by id
    pub fn list_columns_by_table(&self, table_id: i64) -> Result<Vec<ErpColumn>> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} WHERE {} = ?1 ORDER BY {}",
            erp_column::TABLE,
            erp_column::TABLE_ID,
            erp_column::ID
        ))?;
        let rows = stmt.query_map(params![table_id], |row| Self::map_erp_column(row))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Get an ERP column by id
    pub fn get_column(&self, column_id: i64) -> Result<Option<ErpColumn>> {
        let conn = self.get_connection()?;

        let result = conn
            .query_row(
                &format!(
                    "SELECT * FROM {} WHERE {} = ?1",
                    erp_column::TABLE,
                    erp_column::ID
                ),
                params![column_id],
                |row| Self::map_erp_column(row),
            )
            .optional()?;

        Ok(result)
    }

    /// Every (column, owning table) pair, ordered by column id.
    ///
    /// Scan input for the column search; grouped by table id for the
    /// table-match finder.
    pub fn list_columns_with_tables(&self) -> Result<Vec<ColumnTableRow>> {
        let conn = self.get_connection()?;

        let sql = format!(
            "SELECT c.{} AS column_id, c.{} AS column_name, t.{} AS table_id, t.{} AS table_name \
             FROM {} c JOIN {} t ON c.{} = t.{} ORDER BY c.{}",
            erp_column::ID,
            erp_column::NAME,
            erp_table::ID,
            erp_table::NAME,
            erp_column::TABLE,
            erp_table::TABLE,
            erp_column::TABLE_ID,
            erp_table::ID,
            erp_column::ID
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![], |row| {
            Ok(ColumnTableRow {
                column_id: row.get("column_id")?,
                column_name: row.get("column_name")?,
                table_id: row.get("table_id")?,
                table_name: row.get("table_name")?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Insert a new ERP table (administrative/seed path)
    pub fn insert_erp_table(&self, new_table: NewErpTable) -> Result<ErpTable> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
                erp_table::TABLE,
                erp_table::NAME,
                erp_table::DESCRIPTION
            ),
            params![new_table.name, new_table.description],
        )?;
        let id = conn.last_insert_rowid();

        Ok(ErpTable {
            id,
            name: new_table.name,
            description: new_table.description,
        })
    }

    /// Insert a new ERP column (administrative/seed path)
    pub fn insert_erp_column(&self, new_column: NewErpColumn) -> Result<ErpColumn> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                erp_column::TABLE,
                erp_column::NAME,
                erp_column::COMMENT,
                erp_column::COLUMN_TYPE,
                erp_column::TABLE_ID,
                erp_column::NOT_NULL,
                erp_column::PRIMARY_KEY,
                erp_column::IS_UNIQUE,
                erp_column::DEFAULT_VALUE
            ),
            params![
                new_column.name,
                new_column.comment,
                new_column.column_type,
                new_column.table_id,
                new_column.not_null,
                new_column.primary_key,
                new_column.is_unique,
                new_column.default_value
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(ErpColumn {
            id,
            name: new_column.name,
            comment: new_column.comment,
            column_type: new_column.column_type,
            table_id: new_column.table_id,
            not_null: new_column.not_null,
            primary_key: new_column.primary_key,
            is_unique: new_column.is_unique,
            default_value: new_column.default_value,
        })
    }

    // ---- lines ----

    /// Get all lines of a category with resolved table/column names, ordered by id
    pub fn list_lines_with_names(&self, category_id: i64) -> Result<Vec<LineWithNames>> {
        let conn = self.get_connection()?;

        let sql = format!(
            "SELECT l.*, t.{} AS table_name, c.{} AS column_name \
             FROM {} l \
             LEFT JOIN {} t ON l.{} = t.{} \
             LEFT JOIN {} c ON l.{} = c.{} \
             WHERE l.{} = ?1 ORDER BY l.{}",
            erp_table::NAME,
            erp_column::NAME,
            lines::TABLE,
            erp_table::TABLE,
            lines::TABLE_ID,
            erp_table::ID,
            erp_column::TABLE,
            lines::COLUMN_ID,
            erp_column::ID,
            lines::CATEGORYID,
            lines::ID
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![category_id], |row| Self::map_line_with_names(row))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Get a line by id
    pub fn get_line(&self, line_id: i64) -> Result<Option<Line>> {
        let conn = self.get_connection()?;

        let result = conn
            .query_row(
                &format!("SELECT * FROM {} WHERE {} = ?1", lines::TABLE, lines::ID),
                params![line_id],
                |row| Self::map_line(row),
            )
            .optional()?;

        Ok(result)
    }

    /// Get a line by id with resolved table/column names
    pub fn get_line_with_names(&self, line_id: i64) -> Result<Option<LineWithNames>> {
        let conn = self.get_connection()?;

        let sql = format!(
            "SELECT l.*, t.{} AS table_name, c.{} AS column_name \
             FROM {} l \
             LEFT JOIN {} t ON l.{} = t.{} \
             LEFT JOIN {} c ON l.{} = c.{} \
             WHERE l.{} = ?1",
            erp_table::NAME,
            erp_column::NAME,
            lines::TABLE,
            erp_table::TABLE,
            lines::TABLE_ID,
            erp_table::ID,
            erp_column::TABLE,
            lines::COLUMN_ID,
            erp_column::ID,
            lines::ID
        );

        let result = conn
            .query_row(&sql, params![line_id], |row| Self::map_line_with_names(row))
            .optional()?;

        Ok(result)
    }

    /// Set or clear a line's mapping in one statement
    pub fn set_line_mapping(
        &self,
        line_id: i64,
        table_id: Option<i64>,
        column_id: Option<i64>,
    ) -> Result<()> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?1, {} = ?2 WHERE {} = ?3",
                lines::TABLE,
                lines::TABLE_ID,
                lines::COLUMN_ID,
                lines::ID
            ),
            params![table_id, column_id, line_id],
        )?;

        Ok(())
    }

    /// Set a line's comment
    pub fn set_line_comment(&self, line_id: i64, comment: &str) -> Result<()> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "UPDATE {} SET {} = ?1 WHERE {} = ?2",
                lines::TABLE,
                lines::COMMENT,
                lines::ID
            ),
            params![comment, line_id],
        )?;

        Ok(())
    }

    /// Every mapped line joined with its ERP table and column, ordered by
    /// line id. Input to the schema exporter.
    pub fn list_mapped_lines(&self) -> Result<Vec<MappedLineRow>> {
        let conn = self.get_connection()?;

        let sql = format!(
            "SELECT t.{} AS table_name, t.{} AS table_description, \
             c.{} AS id, c.{} AS name, c.{} AS comment, c.{} AS column_type, \
             c.{} AS table_id, c.{} AS not_null, c.{} AS primary_key, \
             c.{} AS is_unique, c.{} AS default_value, l.{} AS reason \
             FROM {} l \
             JOIN {} t ON l.{} = t.{} \
             JOIN {} c ON l.{} = c.{} \
             WHERE l.{} IS NOT NULL AND l.{} IS NOT NULL \
             ORDER BY l.{}",
            erp_table::NAME,
            erp_table::DESCRIPTION,
            erp_column::ID,
            erp_column::NAME,
            erp_column::COMMENT,
            erp_column::COLUMN_TYPE,
            erp_column::TABLE_ID,
            erp_column::NOT_NULL,
            erp_column::PRIMARY_KEY,
            erp_column::IS_UNIQUE,
            erp_column::DEFAULT_VALUE,
            lines::REASON,
            lines::TABLE,
            erp_table::TABLE,
            lines::TABLE_ID,
            erp_table::ID,
            erp_column::TABLE,
            lines::COLUMN_ID,
            erp_column::ID,
            lines::TABLE_ID,
            lines::COLUMN_ID,
            lines::ID
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![], |row| {
            Ok(MappedLineRow {
                table_name: row.get("table_name")?,
                table_description: row.get("table_description")?,
                column: Self::map_erp_column(row)?,
                reason: row.get("reason")?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }

    /// Insert a new line (administrative/seed path)
    pub fn insert_line(&self, new_line: NewLine) -> Result<Line> {
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                lines::TABLE,
                lines::CATEGORYID,
                lines::DEFAULT_VALUE,
                lines::CUSTOMER_SETTINGS,
                lines::NO_OF_CHARS,
                lines::FIELD_NAME,
                lines::REASON,
                lines::NAME,
                lines::COMMENT,
                lines::SUB_CATEGORY_ID,
                lines::TABLE_ID,
                lines::COLUMN_ID
            ),
            params![
                new_line.categoryid,
                new_line.default_value,
                new_line.customer_settings,
                new_line.no_of_chars,
                new_line.field_name,
                new_line.reason,
                new_line.name,
                new_line.comment,
                new_line.sub_category_id,
                new_line.table_id,
                new_line.column_id
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Line {
            id,
            categoryid: new_line.categoryid,
            default_value: new_line.default_value,
            customer_settings: new_line.customer_settings,
            no_of_chars: new_line.no_of_chars,
            field_name: new_line.field_name,
            reason: new_line.reason,
            name: new_line.name,
            comment: new_line.comment,
            sub_category_id: new_line.sub_category_id,
            table_id: new_line.table_id,
            column_id: new_line.column_id,
        })
    }
}
