use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Metric names for the mapping service
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    pub line_updates_total: &'static str,
    pub recalculations_total: &'static str,
    pub recalculation_duration: &'static str,
    pub column_searches_total: &'static str,
    pub table_match_requests_total: &'static str,
    pub schema_exports_total: &'static str,
    pub schema_export_columns: &'static str,
    pub db_connection_pool_size: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            line_updates_total: "duo_mapping_line_updates_total",
            recalculations_total: "duo_mapping_recalculations_total",
            recalculation_duration: "duo_mapping_recalculation_duration_seconds",
            column_searches_total: "duo_mapping_column_searches_total",
            table_match_requests_total: "duo_mapping_table_match_requests_total",
            schema_exports_total: "duo_mapping_schema_exports_total",
            schema_export_columns: "duo_mapping_schema_export_columns",
            db_connection_pool_size: "duo_mapping_db_connection_pool_size",
        }
    }
}

impl MetricsCollector {
    /// Record a line mapping update and the action taken
    pub fn record_line_update(&self, action: &str) {
        counter!(self.line_updates_total, "action" => action.to_string()).increment(1);
    }

    /// Record a percent-mapped recalculation run
    pub fn record_recalculation(&self, categories: usize, duration: Duration) {
        counter!(self.recalculations_total).increment(categories as u64);
        histogram!(self.recalculation_duration).record(duration.as_secs_f64());
    }

    /// Record a column search and its hit count
    pub fn record_column_search(&self, hits: usize) {
        counter!(self.column_searches_total).increment(1);
        histogram!("duo_mapping_column_search_hits").record(hits as f64);
    }

    /// Record a table-match request
    pub fn record_table_match(&self, matched_tables: usize) {
        counter!(self.table_match_requests_total).increment(1);
        histogram!("duo_mapping_table_match_tables").record(matched_tables as f64);
    }

    /// Record a mapped-schema export
    pub fn record_schema_export(&self, total_tables: usize, total_columns: usize) {
        counter!(self.schema_exports_total).increment(1);
        histogram!(self.schema_export_columns).record(total_columns as f64);
        histogram!("duo_mapping_schema_export_tables").record(total_tables as f64);
    }

    /// Update connection pool size
    pub fn update_connection_pool_size(&self, size: usize) {
        gauge!(self.db_connection_pool_size).set(size as f64);
    }
}
