use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::logging::OperationTimer;
use crate::metrics::MetricsCollector;
use crate::models::{
    ColumnSearchResult, LineMappingResponse, LineMappingUpdate, MappedSchema, SchemaColumn,
    SchemaConstraints, SchemaTable, SubCategory, SubCategoryUpdate, SubCategoryUpsert,
    TableMatchRequest, TableMatchResult,
};
use crate::validation::InputValidator;

/// Business operations over the mapping store.
///
/// Holds the store handle; every method is one request's worth of work.
#[derive(Clone)]
pub struct MappingService {
    db: Arc<Database>,
    metrics: MetricsCollector,
}

impl MappingService {
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            metrics: MetricsCollector::default(),
        }
    }

    /// Update a line's mapping per the clearing/validation rules.
    ///
    /// `table_id` absent or 0 clears the whole mapping. A present, nonzero
    /// `table_id` must exist; a present, nonzero `column_id` must exist and
    /// belong to that table. The comment, when present, applies regardless
    /// of which branch is taken. Any mapping change recomputes the owning
    /// category's percent_mapped.
    pub fn update_line_mapping(
        &self,
        line_id: i64,
        update: &LineMappingUpdate,
    ) -> Result<LineMappingResponse> {
        let line = self
            .db
            .get_line(line_id)?
            .ok_or_else(|| ApiError::NotFound("Line not found".to_string()))?;

        if let Some(comment) = &update.comment {
            InputValidator::validate_comment(comment)?;
        }

        let action = match update.table_id {
            None | Some(0) => {
                if let Some(comment) = &update.comment {
                    self.db.set_line_comment(line_id, comment)?;
                }
                self.db.set_line_mapping(line_id, None, None)?;
                "cleared_table_id"
            }
            Some(table_id) => {
                self.db
                    .get_table(table_id)?
                    .ok_or_else(|| ApiError::NotFound("ERP table not found".to_string()))?;

                let (column_id, action) = match update.column_id {
                    Some(0) => (None, "cleared_column_id"),
                    None => (None, "updated"),
                    Some(requested_column) => {
                        let column = self.db.get_column(requested_column)?.ok_or_else(|| {
                            ApiError::NotFound("ERP column not found".to_string())
                        })?;

                        if column.table_id != Some(table_id) {
                            return Err(ApiError::Validation(
                                "Column does not belong to the specified table".to_string(),
                            ));
                        }

                        (Some(requested_column), "updated")
                    }
                };

                if let Some(comment) = &update.comment {
                    self.db.set_line_comment(line_id, comment)?;
                }
                self.db.set_line_mapping(line_id, Some(table_id), column_id)?;
                action
            }
        };

        // Keep the derived statistic consistent with the mutation
        let percent = self.db.recalculate_percent_mapped(line.categoryid)?;
        debug!(
            category_id = line.categoryid,
            percent_mapped = percent,
            "recomputed percent_mapped"
        );

        let updated = self
            .db
            .get_line_with_names(line_id)?
            .ok_or_else(|| ApiError::Other("Failed to reload line after update".to_string()))?;

        self.metrics.record_line_update(action);

        Ok(LineMappingResponse {
            id: updated.id,
            categoryid: updated.categoryid,
            table_id: updated.table_id,
            column_id: updated.column_id,
            table_name: updated.table_name,
            column_name: updated.column_name,
            comment: updated.comment,
            action: action.to_string(),
        })
    }

    /// Search every (column, table) pair by column name.
    ///
    /// Case-insensitive; exact matches come first, then substring matches,
    /// each group in scan order.
    pub fn search_columns(&self, raw_term: &str) -> Result<Vec<ColumnSearchResult>> {
        let term = InputValidator::validate_search_term(raw_term)?;

        let mut exact_matches = Vec::new();
        let mut partial_matches = Vec::new();

        for row in self.db.list_columns_with_tables()? {
            let column_name_lower = row.column_name.to_lowercase();

            if column_name_lower == term {
                exact_matches.push(ColumnSearchResult {
                    column_name: row.column_name,
                    table_name: row.table_name,
                    column_id: row.column_id,
                    table_id: row.table_id,
                    match_type: "exact".to_string(),
                });
            } else if column_name_lower.contains(&term) {
                partial_matches.push(ColumnSearchResult {
                    column_name: row.column_name,
                    table_name: row.table_name,
                    column_id: row.column_id,
                    table_id: row.table_id,
                    match_type: "partial".to_string(),
                });
            }
        }

        let mut results = exact_matches;
        results.append(&mut partial_matches);

        self.metrics.record_column_search(results.len());

        Ok(results)
    }

    /// Rank ERP tables by how many of their columns appear in the candidate
    /// set (exact, case-insensitive matches only).
    ///
    /// Tables with zero matches are excluded; the rest sort by descending
    /// match count, ties broken by ascending table name.
    pub fn find_table_matches(&self, request: &TableMatchRequest) -> Result<Vec<TableMatchResult>> {
        let candidates = InputValidator::normalize_column_names(&request.column_names)?;

        let mut table_order: Vec<i64> = Vec::new();
        let mut matches_by_table: HashMap<i64, TableMatchResult> = HashMap::new();

        for row in self.db.list_columns_with_tables()? {
            if !candidates.contains(&row.column_name.to_lowercase()) {
                continue;
            }

            let entry = matches_by_table.entry(row.table_id).or_insert_with(|| {
                table_order.push(row.table_id);
                TableMatchResult {
                    table_id: row.table_id,
                    table_name: row.table_name.clone(),
                    match_count: 0,
                    matched_columns: Vec::new(),
                }
            });
            entry.match_count += 1;
            entry.matched_columns.push(row.column_name);
        }

        let mut table_matches: Vec<TableMatchResult> = table_order
            .into_iter()
            .filter_map(|table_id| matches_by_table.remove(&table_id))
            .collect();

        table_matches.sort_by(|a, b| {
            b.match_count
                .cmp(&a.match_count)
                .then_with(|| a.table_name.cmp(&b.table_name))
        });

        self.metrics.record_table_match(table_matches.len());

        Ok(table_matches)
    }

    /// Recompute percent_mapped for every category. Returns the count.
    pub fn recalculate_all(&self) -> Result<usize> {
        let start = Instant::now();
        let category_ids = self.db.list_category_ids()?;

        for category_id in &category_ids {
            self.db.recalculate_percent_mapped(*category_id)?;
        }

        self.metrics
            .record_recalculation(category_ids.len(), start.elapsed());
        info!(
            categories = category_ids.len(),
            "recalculated percent_mapped"
        );

        Ok(category_ids.len())
    }

    /// Build the mapped-schema export document.
    ///
    /// Only tables/columns referenced by at least one mapped line appear.
    /// Columns dedupe by name in first-seen order; tables sort by name.
    pub fn export_mapped_schema(&self) -> Result<MappedSchema> {
        let timer = OperationTimer::new("export_mapped_schema");

        let mut tables: BTreeMap<String, SchemaTable> = BTreeMap::new();

        for row in self.db.list_mapped_lines()? {
            let entry = tables
                .entry(row.table_name.clone())
                .or_insert_with(|| SchemaTable {
                    name: row.table_name.clone(),
                    description: row
                        .table_description
                        .clone()
                        .unwrap_or_else(|| format!("Table {}", row.table_name)),
                    columns: Vec::new(),
                });

            let reason = row
                .reason
                .as_deref()
                .filter(|reason| !reason.trim().is_empty())
                .map(ToString::to_string);

            if let Some(existing) = entry
                .columns
                .iter_mut()
                .find(|column| column.name == row.column.name)
            {
                // Duplicate mapping of the same column; keep the first
                // non-blank reason as its description.
                if existing.description.is_none() {
                    existing.description = reason;
                }
                continue;
            }

            entry.columns.push(SchemaColumn {
                name: row.column.name.clone(),
                column_type: row
                    .column
                    .column_type
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
                constraints: SchemaConstraints {
                    not_null: row.column.not_null,
                    primary_key: row.column.primary_key,
                    unique: row.column.is_unique,
                    default: row.column.default_value.clone(),
                },
                comment: row.column.comment.clone(),
                description: reason,
            });
        }

        let tables: Vec<SchemaTable> = tables.into_values().collect();
        let total_tables = tables.len();
        let total_mapped_columns = tables.iter().map(|table| table.columns.len()).sum();

        self.metrics
            .record_schema_export(total_tables, total_mapped_columns);
        timer.finish();

        Ok(MappedSchema {
            tables,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            total_tables,
            total_mapped_columns,
        })
    }

    /// Edit a sub-category's comment. The name is immutable on this path.
    pub fn update_sub_category_comment(
        &self,
        category_id: i64,
        sub_category_id: i64,
        update: &SubCategoryUpdate,
    ) -> Result<SubCategory> {
        self.db
            .get_category(category_id)?
            .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

        self.db
            .get_sub_category_in_category(category_id, sub_category_id)?
            .ok_or_else(|| ApiError::NotFound("Sub-category not found".to_string()))?;

        if let Some(comment) = &update.comment {
            InputValidator::validate_comment(comment)?;
            self.db
                .update_sub_category_comment(sub_category_id, comment)?;
        }

        self.db
            .get_sub_category_in_category(category_id, sub_category_id)?
            .ok_or_else(|| {
                ApiError::Other("Failed to reload sub-category after update".to_string())
            })
    }

    /// Upsert a sub-category under a category by client-supplied id.
    ///
    /// An id already owned by a different category is a conflict.
    pub fn upsert_sub_category(
        &self,
        category_id: i64,
        sub_category_id: i64,
        data: &SubCategoryUpsert,
    ) -> Result<SubCategory> {
        self.db
            .get_category(category_id)?
            .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

        InputValidator::validate_sub_category_name(&data.name)?;
        if let Some(comment) = &data.comment {
            InputValidator::validate_comment(comment)?;
        }

        match self.db.get_sub_category(sub_category_id)? {
            Some(existing) if existing.category_id != category_id => {
                return Err(ApiError::Conflict(
                    "Sub-category id already exists under a different category".to_string(),
                ));
            }
            Some(_) => {
                self.db.update_sub_category(
                    sub_category_id,
                    &data.name,
                    data.comment.as_deref(),
                    data.seq_no,
                )?;
            }
            None => {
                self.db.insert_sub_category_with_id(
                    sub_category_id,
                    category_id,
                    &data.name,
                    data.comment.as_deref(),
                    data.seq_no,
                )?;
            }
        }

        self.db
            .get_sub_category_in_category(category_id, sub_category_id)?
            .ok_or_else(|| {
                ApiError::Other("Failed to reload sub-category after upsert".to_string())
            })
    }
}
