use std::sync::Arc;

use duo_mapping_api::db::Database;
use duo_mapping_api::error::ApiError;
use duo_mapping_api::models::{
    LineMappingUpdate, NewCategory, NewErpColumn, NewErpTable, NewLine, SubCategoryUpsert,
    TableMatchRequest,
};
use duo_mapping_api::MappingService;
use tempfile::TempDir;

struct Fixture {
    _temp_dir: TempDir,
    db: Arc<Database>,
    service: MappingService,
    category_id: i64,
    customer_table_id: i64,
    invoice_table_id: i64,
    customer_id_col: i64,
    customer_fk_col: i64,
    invoice_id_col: i64,
    invoice_amount_col: i64,
    mapped_line_id: i64,
    unmapped_line_id: i64,
}

/// Two ERP tables with overlapping column names and one category with four
/// countable lines, two of them mapped.
fn setup() -> Fixture {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db = Arc::new(
        Database::new(db_path.to_str().expect("non-utf8 temp path"), 4)
            .expect("Failed to create database"),
    );
    let service = MappingService::new(db.clone());

    let category = db
        .insert_category(NewCategory {
            name: "Customer Master".to_string(),
            seq_no: Some(1),
        })
        .expect("insert category");

    let customer = db
        .insert_erp_table(NewErpTable {
            name: "customer".to_string(),
            description: Some("Customer master data".to_string()),
        })
        .expect("insert table");
    let invoice = db
        .insert_erp_table(NewErpTable {
            name: "invoice".to_string(),
            description: None,
        })
        .expect("insert table");

    let customer_id_col = db
        .insert_erp_column(NewErpColumn {
            name: "id".to_string(),
            column_type: Some("INTEGER".to_string()),
            table_id: Some(customer.id),
            not_null: true,
            primary_key: true,
            ..NewErpColumn::default()
        })
        .expect("insert column");
    let customer_fk_col = db
        .insert_erp_column(NewErpColumn {
            name: "customer_id".to_string(),
            column_type: Some("INTEGER".to_string()),
            table_id: Some(customer.id),
            ..NewErpColumn::default()
        })
        .expect("insert column");
    db.insert_erp_column(NewErpColumn {
        name: "name".to_string(),
        column_type: Some("TEXT".to_string()),
        table_id: Some(customer.id),
        ..NewErpColumn::default()
    })
    .expect("insert column");
    let invoice_id_col = db
        .insert_erp_column(NewErpColumn {
            name: "id".to_string(),
            column_type: Some("INTEGER".to_string()),
            table_id: Some(invoice.id),
            not_null: true,
            primary_key: true,
            ..NewErpColumn::default()
        })
        .expect("insert column");
    let invoice_amount_col = db
        .insert_erp_column(NewErpColumn {
            name: "amount".to_string(),
            table_id: Some(invoice.id),
            ..NewErpColumn::default()
        })
        .expect("insert column");

    let mapped = db
        .insert_line(NewLine {
            categoryid: category.id,
            name: "customer number".to_string(),
            field_name: Some("customer_no".to_string()),
            reason: Some("Primary customer identifier".to_string()),
            table_id: Some(customer.id),
            column_id: Some(customer_id_col.id),
            ..NewLine::default()
        })
        .expect("insert line");
    db.insert_line(NewLine {
        categoryid: category.id,
        name: "customer reference".to_string(),
        field_name: Some("customer_ref".to_string()),
        table_id: Some(customer.id),
        column_id: Some(customer_fk_col.id),
        ..NewLine::default()
    })
    .expect("insert line");
    let unmapped = db
        .insert_line(NewLine {
            categoryid: category.id,
            name: "street".to_string(),
            field_name: Some("street".to_string()),
            ..NewLine::default()
        })
        .expect("insert line");
    db.insert_line(NewLine {
        categoryid: category.id,
        name: "city".to_string(),
        field_name: Some("city".to_string()),
        ..NewLine::default()
    })
    .expect("insert line");

    db.recalculate_percent_mapped(category.id)
        .expect("initial recalculation");

    Fixture {
        _temp_dir: temp_dir,
        db,
        service,
        category_id: category.id,
        customer_table_id: customer.id,
        invoice_table_id: invoice.id,
        customer_id_col: customer_id_col.id,
        customer_fk_col: customer_fk_col.id,
        invoice_id_col: invoice_id_col.id,
        invoice_amount_col: invoice_amount_col.id,
        mapped_line_id: mapped.id,
        unmapped_line_id: unmapped.id,
    }
}

#[test]
fn test_search_columns_exact_before_partial() {
    let fixture = setup();

    let results = fixture.service.search_columns("id").expect("search failed");

    // Both literal "id" columns first, in scan order; "customer_id" after
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].column_id, fixture.customer_id_col);
    assert_eq!(results[0].match_type, "exact");
    assert_eq!(results[1].column_id, fixture.invoice_id_col);
    assert_eq!(results[1].match_type, "exact");
    assert_eq!(results[2].column_id, fixture.customer_fk_col);
    assert_eq!(results[2].match_type, "partial");
    assert_eq!(results[2].column_name, "customer_id");
}

#[test]
fn test_search_columns_is_case_insensitive() {
    let fixture = setup();

    let results = fixture
        .service
        .search_columns("  NAME ")
        .expect("search failed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].column_name, "name");
    assert_eq!(results[0].table_name, "customer");
    assert_eq!(results[0].match_type, "exact");
}

#[test]
fn test_search_columns_no_hits() {
    let fixture = setup();

    let results = fixture
        .service
        .search_columns("does_not_exist")
        .expect("search failed");
    assert!(results.is_empty());
}

#[test]
fn test_search_columns_blank_term_rejected() {
    let fixture = setup();

    let err = fixture.service.search_columns("   ").unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn test_find_table_matches_ranking_and_tiebreak() {
    let fixture = setup();

    let request = TableMatchRequest {
        column_names: vec![
            " ID ".to_string(),
            "customer_id".to_string(),
            "amount".to_string(),
        ],
    };
    let matches = fixture
        .service
        .find_table_matches(&request)
        .expect("match failed");

    // Both tables match twice; the tie breaks on ascending table name
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].table_name, "customer");
    assert_eq!(matches[0].match_count, 2);
    assert_eq!(matches[0].matched_columns, vec!["id", "customer_id"]);
    assert_eq!(matches[1].table_name, "invoice");
    assert_eq!(matches[1].match_count, 2);
    assert_eq!(matches[1].matched_columns, vec!["id", "amount"]);
}

#[test]
fn test_find_table_matches_excludes_unmatched_tables() {
    let fixture = setup();

    let request = TableMatchRequest {
        column_names: vec!["amount".to_string()],
    };
    let matches = fixture
        .service
        .find_table_matches(&request)
        .expect("match failed");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].table_id, fixture.invoice_table_id);
    assert_eq!(matches[0].match_count, 1);
}

#[test]
fn test_find_table_matches_no_partial_matching() {
    let fixture = setup();

    // "id" appears as a substring of "customer_id" but only exact names count
    let request = TableMatchRequest {
        column_names: vec!["custom".to_string()],
    };
    let matches = fixture
        .service
        .find_table_matches(&request)
        .expect("match failed");
    assert!(matches.is_empty());
}

#[test]
fn test_find_table_matches_rejects_empty_input() {
    let fixture = setup();

    let empty = TableMatchRequest {
        column_names: vec![],
    };
    assert!(matches!(
        fixture.service.find_table_matches(&empty).unwrap_err(),
        ApiError::Validation(_)
    ));

    let all_blank = TableMatchRequest {
        column_names: vec!["  ".to_string(), String::new()],
    };
    assert!(matches!(
        fixture.service.find_table_matches(&all_blank).unwrap_err(),
        ApiError::Validation(_)
    ));
}

#[test]
fn test_update_line_clears_mapping() {
    let fixture = setup();

    let response = fixture
        .service
        .update_line_mapping(
            fixture.mapped_line_id,
            &LineMappingUpdate {
                table_id: Some(0),
                column_id: None,
                comment: None,
            },
        )
        .expect("update failed");

    assert_eq!(response.action, "cleared_table_id");
    assert!(response.table_id.is_none());
    assert!(response.column_id.is_none());
    assert!(response.table_name.is_none());

    // One of four countable lines remains mapped
    let category = fixture
        .db
        .get_category(fixture.category_id)
        .expect("get category")
        .expect("category missing");
    assert_eq!(category.percent_mapped, 25.0);
}

#[test]
fn test_update_line_absent_table_id_also_clears() {
    let fixture = setup();

    let response = fixture
        .service
        .update_line_mapping(fixture.mapped_line_id, &LineMappingUpdate::default())
        .expect("update failed");

    assert_eq!(response.action, "cleared_table_id");
    assert!(response.table_id.is_none());
}

#[test]
fn test_update_line_sets_mapping_and_resolves_names() {
    let fixture = setup();

    let response = fixture
        .service
        .update_line_mapping(
            fixture.unmapped_line_id,
            &LineMappingUpdate {
                table_id: Some(fixture.invoice_table_id),
                column_id: Some(fixture.invoice_amount_col),
                comment: None,
            },
        )
        .expect("update failed");

    assert_eq!(response.action, "updated");
    assert_eq!(response.table_name.as_deref(), Some("invoice"));
    assert_eq!(response.column_name.as_deref(), Some("amount"));

    // Three of four countable lines are now mapped
    let category = fixture
        .db
        .get_category(fixture.category_id)
        .expect("get category")
        .expect("category missing");
    assert_eq!(category.percent_mapped, 75.0);
}

#[test]
fn test_update_line_clears_column_only() {
    let fixture = setup();

    let response = fixture
        .service
        .update_line_mapping(
            fixture.mapped_line_id,
            &LineMappingUpdate {
                table_id: Some(fixture.customer_table_id),
                column_id: Some(0),
                comment: None,
            },
        )
        .expect("update failed");

    assert_eq!(response.action, "cleared_column_id");
    assert_eq!(response.table_id, Some(fixture.customer_table_id));
    assert!(response.column_id.is_none());
    assert!(response.column_name.is_none());

    // Without a column the line no longer counts as mapped
    let category = fixture
        .db
        .get_category(fixture.category_id)
        .expect("get category")
        .expect("category missing");
    assert_eq!(category.percent_mapped, 25.0);
}

#[test]
fn test_update_line_rejects_foreign_column() {
    let fixture = setup();

    let err = fixture
        .service
        .update_line_mapping(
            fixture.unmapped_line_id,
            &LineMappingUpdate {
                table_id: Some(fixture.customer_table_id),
                column_id: Some(fixture.invoice_amount_col),
                comment: None,
            },
        )
        .unwrap_err();

    match err {
        ApiError::Validation(detail) => {
            assert_eq!(detail, "Column does not belong to the specified table");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_update_line_unknown_references() {
    let fixture = setup();

    assert!(matches!(
        fixture
            .service
            .update_line_mapping(99_999, &LineMappingUpdate::default())
            .unwrap_err(),
        ApiError::NotFound(_)
    ));

    assert!(matches!(
        fixture
            .service
            .update_line_mapping(
                fixture.unmapped_line_id,
                &LineMappingUpdate {
                    table_id: Some(99_999),
                    column_id: None,
                    comment: None,
                },
            )
            .unwrap_err(),
        ApiError::NotFound(_)
    ));

    assert!(matches!(
        fixture
            .service
            .update_line_mapping(
                fixture.unmapped_line_id,
                &LineMappingUpdate {
                    table_id: Some(fixture.customer_table_id),
                    column_id: Some(99_999),
                    comment: None,
                },
            )
            .unwrap_err(),
        ApiError::NotFound(_)
    ));
}

#[test]
fn test_update_line_comment_applies_on_clear() {
    let fixture = setup();

    let response = fixture
        .service
        .update_line_mapping(
            fixture.mapped_line_id,
            &LineMappingUpdate {
                table_id: None,
                column_id: None,
                comment: Some("kept while clearing".to_string()),
            },
        )
        .expect("update failed");

    assert_eq!(response.action, "cleared_table_id");
    assert_eq!(response.comment.as_deref(), Some("kept while clearing"));
}

#[test]
fn test_export_groups_dedupes_and_sorts() {
    let fixture = setup();

    // Second line mapped onto the already-exported customer id column; its
    // reason must not displace the first one
    fixture
        .db
        .insert_line(NewLine {
            categoryid: fixture.category_id,
            name: "duplicate mapping".to_string(),
            field_name: Some("customer_no_2".to_string()),
            reason: Some("Later duplicate".to_string()),
            table_id: Some(fixture.customer_table_id),
            column_id: Some(fixture.customer_id_col),
            ..NewLine::default()
        })
        .expect("insert line");
    // And one line onto the invoice table so both tables export
    fixture
        .db
        .insert_line(NewLine {
            categoryid: fixture.category_id,
            name: "invoice amount".to_string(),
            field_name: Some("amount".to_string()),
            table_id: Some(fixture.invoice_table_id),
            column_id: Some(fixture.invoice_amount_col),
            ..NewLine::default()
        })
        .expect("insert line");

    let schema = fixture
        .service
        .export_mapped_schema()
        .expect("export failed");

    assert_eq!(schema.total_tables, 2);
    assert_eq!(schema.tables.len(), 2);
    // Sorted by table name
    assert_eq!(schema.tables[0].name, "customer");
    assert_eq!(schema.tables[1].name, "invoice");

    let customer = &schema.tables[0];
    assert_eq!(customer.description, "Customer master data");
    assert_eq!(customer.columns.len(), 2);
    assert_eq!(customer.columns[0].name, "id");
    assert!(customer.columns[0].constraints.primary_key);
    assert!(customer.columns[0].constraints.not_null);
    assert_eq!(
        customer.columns[0].description.as_deref(),
        Some("Primary customer identifier")
    );
    assert_eq!(customer.columns[1].name, "customer_id");
    assert!(customer.columns[1].description.is_none());

    let invoice = &schema.tables[1];
    // Missing description falls back to a generated one
    assert_eq!(invoice.description, "Table invoice");
    assert_eq!(invoice.columns.len(), 1);
    // Missing declared type falls back to "unknown"
    assert_eq!(invoice.columns[0].column_type, "unknown");

    assert_eq!(schema.total_mapped_columns, 3);
    assert!(schema.generated_at.ends_with('Z'));
}

#[test]
fn test_export_with_no_mapped_lines() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("empty.db");
    let db = Arc::new(
        Database::new(db_path.to_str().expect("non-utf8 temp path"), 2)
            .expect("Failed to create database"),
    );
    let service = MappingService::new(db);

    let schema = service.export_mapped_schema().expect("export failed");
    assert!(schema.tables.is_empty());
    assert_eq!(schema.total_tables, 0);
    assert_eq!(schema.total_mapped_columns, 0);
}

#[test]
fn test_upsert_sub_category_insert_then_update() {
    let fixture = setup();

    let created = fixture
        .service
        .upsert_sub_category(
            fixture.category_id,
            42,
            &SubCategoryUpsert {
                name: "Addresses".to_string(),
                comment: None,
                seq_no: Some(1),
            },
        )
        .expect("upsert insert failed");
    assert_eq!(created.id, 42);
    assert_eq!(created.name, "Addresses");

    let updated = fixture
        .service
        .upsert_sub_category(
            fixture.category_id,
            42,
            &SubCategoryUpsert {
                name: "Postal addresses".to_string(),
                comment: Some("renamed".to_string()),
                seq_no: Some(1),
            },
        )
        .expect("upsert update failed");
    assert_eq!(updated.id, 42);
    assert_eq!(updated.name, "Postal addresses");
    assert_eq!(updated.comment.as_deref(), Some("renamed"));
}

#[test]
fn test_upsert_sub_category_conflicting_owner() {
    let fixture = setup();

    let other_category = fixture
        .db
        .insert_category(NewCategory {
            name: "Other".to_string(),
            seq_no: None,
        })
        .expect("insert category");

    fixture
        .service
        .upsert_sub_category(
            fixture.category_id,
            7,
            &SubCategoryUpsert {
                name: "Owned".to_string(),
                comment: None,
                seq_no: None,
            },
        )
        .expect("initial upsert failed");

    let err = fixture
        .service
        .upsert_sub_category(
            other_category.id,
            7,
            &SubCategoryUpsert {
                name: "Stolen".to_string(),
                comment: None,
                seq_no: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[test]
fn test_upsert_sub_category_blank_name_rejected() {
    let fixture = setup();

    let err = fixture
        .service
        .upsert_sub_category(
            fixture.category_id,
            8,
            &SubCategoryUpsert {
                name: "   ".to_string(),
                comment: None,
                seq_no: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}
