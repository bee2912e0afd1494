//! Unit tests for the validation module

use duo_mapping_api::validation::InputValidator;

#[test]
fn test_validate_search_term_normalizes() {
    let term = InputValidator::validate_search_term("  Customer_ID ").expect("valid term");
    assert_eq!(term, "customer_id");
}

#[test]
fn test_validate_search_term_empty() {
    assert!(InputValidator::validate_search_term("").is_err());
}

#[test]
fn test_validate_search_term_whitespace_only() {
    assert!(InputValidator::validate_search_term("   ").is_err());
}

#[test]
fn test_normalize_column_names_trims_and_lowercases() {
    let names = vec![" ID ".to_string(), "Amount".to_string()];
    let normalized = InputValidator::normalize_column_names(&names).expect("valid names");
    assert!(normalized.contains("id"));
    assert!(normalized.contains("amount"));
    assert_eq!(normalized.len(), 2);
}

#[test]
fn test_normalize_column_names_drops_blanks() {
    let names = vec!["id".to_string(), "   ".to_string(), String::new()];
    let normalized = InputValidator::normalize_column_names(&names).expect("valid names");
    assert_eq!(normalized.len(), 1);
}

#[test]
fn test_normalize_column_names_dedupes() {
    let names = vec!["id".to_string(), "ID".to_string(), " id ".to_string()];
    let normalized = InputValidator::normalize_column_names(&names).expect("valid names");
    assert_eq!(normalized.len(), 1);
}

#[test]
fn test_normalize_column_names_empty_list() {
    assert!(InputValidator::normalize_column_names(&[]).is_err());
}

#[test]
fn test_normalize_column_names_all_blank() {
    let names = vec!["  ".to_string(), String::new()];
    assert!(InputValidator::normalize_column_names(&names).is_err());
}

#[test]
fn test_validate_comment_ok() {
    assert!(InputValidator::validate_comment("short note").is_ok());
}

#[test]
fn test_validate_comment_exactly_max() {
    let comment = "a".repeat(800);
    assert!(InputValidator::validate_comment(&comment).is_ok());
}

#[test]
fn test_validate_comment_too_long() {
    let comment = "a".repeat(801);
    assert!(InputValidator::validate_comment(&comment).is_err());
}

#[test]
fn test_validate_sub_category_name_ok() {
    assert!(InputValidator::validate_sub_category_name("Postal addresses").is_ok());
}

#[test]
fn test_validate_sub_category_name_empty() {
    assert!(InputValidator::validate_sub_category_name("").is_err());
}

#[test]
fn test_validate_sub_category_name_whitespace_only() {
    assert!(InputValidator::validate_sub_category_name("   ").is_err());
}

#[test]
fn test_validate_sub_category_name_too_long() {
    let name = "a".repeat(201);
    assert!(InputValidator::validate_sub_category_name(&name).is_err());
}

#[test]
fn test_validate_sub_category_name_exactly_200_chars() {
    let name = "a".repeat(200);
    assert!(InputValidator::validate_sub_category_name(&name).is_ok());
}

#[test]
fn test_validate_sub_category_name_with_newline() {
    assert!(InputValidator::validate_sub_category_name("line\nbreak").is_err());
}

#[test]
fn test_validate_sub_category_name_with_null_byte() {
    assert!(InputValidator::validate_sub_category_name("bad\0name").is_err());
}

#[test]
fn test_validate_sub_category_name_unicode() {
    assert!(InputValidator::validate_sub_category_name("Adressen für Kunden").is_ok());
}
