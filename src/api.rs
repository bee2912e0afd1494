//! HTTP layer: routing, extraction, and response shaping.
//!
//! Handlers perform existence checks against the store, delegate business
//! rules to [`MappingService`], and serialize explicit response records.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{AppendHeaders, IntoResponse};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{
    Category, ColumnSearchResult, ErpColumn, ErpTable, HealthStatus, LineMappingResponse,
    LineMappingUpdate, LineWithNames, RecalculateSummary, ServiceBanner, SubCategory,
    SubCategoryUpdate, SubCategoryUpsert, TableMatchRequest, TableMatchResult,
};
use crate::service::MappingService;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub service: MappingService,
}

impl AppState {
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        let service = MappingService::new(db.clone());
        Self { db, service }
    }
}

/// Build the application router with CORS and request tracing applied
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{category_id}", get(get_category))
        .route(
            "/api/categories/{category_id}/sub-categories",
            get(list_sub_categories),
        )
        .route(
            "/api/categories/{category_id}/sub-categories/{sub_category_id}",
            get(get_sub_category)
                .patch(update_sub_category)
                .put(upsert_sub_category),
        )
        .route("/api/categories/{category_id}/lines", get(list_lines))
        .route(
            "/api/categories/recalculate-percent-mapped",
            post(recalculate_percent_mapped),
        )
        .route("/api/tables", get(list_tables))
        .route("/api/tables/{table_id}/columns", get(list_table_columns))
        .route("/api/lines/{line_id}", patch(update_line))
        .route("/api/search-columns", get(search_columns))
        .route("/api/find-table-matches", post(find_table_matches))
        .route("/api/download-schema", get(download_schema))
        .layer(TraceLayer::new_for_http())
        // Public API; allow any origin, method, and header
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        message: "Duo Mapping API is running".to_string(),
    })
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.db.list_categories()?))
}

async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Category>> {
    let category = state
        .db
        .get_category(category_id)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

async fn list_sub_categories(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<SubCategory>>> {
    state
        .db
        .get_category(category_id)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(state.db.list_sub_categories(category_id)?))
}

async fn get_sub_category(
    State(state): State<AppState>,
    Path((category_id, sub_category_id)): Path<(i64, i64)>,
) -> Result<Json<SubCategory>> {
    state
        .db
        .get_category(category_id)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    let sub_category = state
        .db
        .get_sub_category_in_category(category_id, sub_category_id)?
        .ok_or_else(|| ApiError::NotFound("Sub-category not found".to_string()))?;

    Ok(Json(sub_category))
}

async fn update_sub_category(
    State(state): State<AppState>,
    Path((category_id, sub_category_id)): Path<(i64, i64)>,
    Json(update): Json<SubCategoryUpdate>,
) -> Result<Json<SubCategory>> {
    let sub_category =
        state
            .service
            .update_sub_category_comment(category_id, sub_category_id, &update)?;

    Ok(Json(sub_category))
}

async fn upsert_sub_category(
    State(state): State<AppState>,
    Path((category_id, sub_category_id)): Path<(i64, i64)>,
    Json(data): Json<SubCategoryUpsert>,
) -> Result<Json<SubCategory>> {
    let sub_category = state
        .service
        .upsert_sub_category(category_id, sub_category_id, &data)?;

    Ok(Json(sub_category))
}

async fn list_lines(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<LineWithNames>>> {
    state
        .db
        .get_category(category_id)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(state.db.list_lines_with_names(category_id)?))
}

async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<ErpTable>>> {
    Ok(Json(state.db.list_tables()?))
}

async fn list_table_columns(
    State(state): State<AppState>,
    Path(table_id): Path<i64>,
) -> Result<Json<Vec<ErpColumn>>> {
    state
        .db
        .get_table(table_id)?
        .ok_or_else(|| ApiError::NotFound("ERP table not found".to_string()))?;

    Ok(Json(state.db.list_columns_by_table(table_id)?))
}

async fn update_line(
    State(state): State<AppState>,
    Path(line_id): Path<i64>,
    Json(update): Json<LineMappingUpdate>,
) -> Result<Json<LineMappingResponse>> {
    Ok(Json(state.service.update_line_mapping(line_id, &update)?))
}

#[derive(Debug, Deserialize)]
struct SearchColumnsQuery {
    #[serde(rename = "columnName", default)]
    column_name: String,
}

async fn search_columns(
    State(state): State<AppState>,
    Query(query): Query<SearchColumnsQuery>,
) -> Result<Json<Vec<ColumnSearchResult>>> {
    Ok(Json(state.service.search_columns(&query.column_name)?))
}

async fn find_table_matches(
    State(state): State<AppState>,
    Json(request): Json<TableMatchRequest>,
) -> Result<Json<Vec<TableMatchResult>>> {
    Ok(Json(state.service.find_table_matches(&request)?))
}

async fn recalculate_percent_mapped(
    State(state): State<AppState>,
) -> Result<Json<RecalculateSummary>> {
    let updated_count = state.service.recalculate_all()?;

    Ok(Json(RecalculateSummary {
        message: format!("Successfully recalculated percent_mapped for {updated_count} categories"),
        updated_count,
    }))
}

async fn download_schema(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let schema = state.service.export_mapped_schema()?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("mapped_schema_{timestamp}.json");

    Ok((
        AppendHeaders([(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        )]),
        Json(schema),
    ))
}
