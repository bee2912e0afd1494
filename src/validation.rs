use std::collections::HashSet;

use crate::error::{ApiError, Result};

/// Maximum length for free-text comment fields
const MAX_COMMENT_LEN: usize = 800;
/// Maximum length for entity names
const MAX_NAME_LEN: usize = 200;

/// Validation utilities for input sanitization and edge case handling
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate and normalize a column search term.
    ///
    /// Returns the trimmed, lowercased term.
    pub fn validate_search_term(term: &str) -> Result<String> {
        if term.trim().is_empty() {
            return Err(ApiError::Validation(
                "columnName parameter is required and cannot be empty".to_string(),
            ));
        }

        Ok(term.trim().to_lowercase())
    }

    /// Validate and normalize candidate column names for table matching.
    ///
    /// Blank entries are dropped; the remainder is trimmed and lowercased.
    pub fn normalize_column_names(names: &[String]) -> Result<HashSet<String>> {
        if names.is_empty() {
            return Err(ApiError::Validation(
                "column_names list cannot be empty".to_string(),
            ));
        }

        let normalized: HashSet<String> = names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.trim().to_lowercase())
            .collect();

        if normalized.is_empty() {
            return Err(ApiError::Validation(
                "No valid column names provided".to_string(),
            ));
        }

        Ok(normalized)
    }

    /// Validate a free-text comment
    pub fn validate_comment(comment: &str) -> Result<()> {
        if comment.len() > MAX_COMMENT_LEN {
            return Err(ApiError::Validation(format!(
                "Comment too long (max {MAX_COMMENT_LEN} characters)"
            )));
        }

        Ok(())
    }

    /// Validate a sub-category name
    pub fn validate_sub_category_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Sub-category name cannot be empty".to_string(),
            ));
        }

        if name.len() > MAX_NAME_LEN {
            return Err(ApiError::Validation(format!(
                "Sub-category name too long (max {MAX_NAME_LEN} characters)"
            )));
        }

        // Check for potentially dangerous characters
        if name.contains('\0') || name.contains('\r') || name.contains('\n') {
            return Err(ApiError::Validation(
                "Sub-category name contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}
