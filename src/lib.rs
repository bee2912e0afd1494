//! Duo Mapping API - ERP Mapping Service
//!
//! A Rust library implementing a small CRUD web service over categories,
//! sub-categories, and ERP table/column metadata, with endpoints to map
//! requirement lines onto ERP tables/columns, keep per-category
//! mapping-completion percentages current, and export the mapped subset
//! of the schema as a JSON document.
//!
//! # Features
//!
//! - Category, sub-category, line, and ERP metadata reads
//! - Line mapping updates with existence/ownership validation
//! - Derived percent-mapped statistics, recomputed on mutation
//! - Column search and table-match ranking
//! - Mapped-schema export with constraint flags

/// HTTP routing and handlers
pub mod api;
/// Configuration management
pub mod config;
/// Database operations and connection pooling
pub mod db;
/// Error types and HTTP status mapping
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Database schema definitions
pub mod schema;
/// Business operations over the store
pub mod service;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use db::Database;
pub use error::{ApiError, Result};
pub use service::MappingService;
