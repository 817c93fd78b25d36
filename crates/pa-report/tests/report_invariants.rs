//! Report core invariant tests.
//!
//! These tests validate the assembled report structure against fixture
//! payloads:
//! - Display cap and truncation bookkeeping per projected group
//! - Split-section partitioning without cross-contamination
//! - Graceful handling of unknown, message, and absent sections
//! - Fixed advisory ordering from the summary rules

use pa_common::AuditPayload;
use pa_report::project::EMPTY_SECTION_NOTE;
use pa_report::rules::Severity;
use pa_report::{Report, ReportAssembler, ReportConfig};
use serde_json::{json, Value};

/// Parse a fixture payload from inline JSON.
fn payload(value: Value) -> AuditPayload {
    serde_json::from_value(value).expect("fixture payload")
}

/// Assemble with default configuration.
fn assemble(value: Value) -> Report {
    ReportAssembler::default_config().assemble(Some(&payload(value)))
}

/// Build a merged transaction stream with `revenue` revenue-tagged rows and
/// `items` item-tagged rows, all linked pairwise.
fn transaction_stream(revenue: usize, items: usize) -> Value {
    let mut rows = Vec::new();
    for i in 0..revenue {
        rows.push(json!({
            "transactionId": format!("T{i}"),
            "revenue": 10.0 + i as f64,
            "source": "Revenue Table",
        }));
    }
    for i in 0..items {
        rows.push(json!({
            "transactionId": format!("T{i}"),
            "itemId": format!("SKU{i}"),
            "itemName": format!("Item {i}"),
            "source": "Item Table",
        }));
    }
    Value::Array(rows)
}

// ============================================================================
// Projection invariants
// ============================================================================

#[test]
fn row_count_is_min_of_entries_and_cap() {
    let checks: Vec<Value> = (0..40)
        .map(|i| json!({"Check": format!("check_{i}"), "Result": "ok"}))
        .collect();
    let report = assemble(json!({"Property Settings": checks}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.rows.len(), 15);
    assert_eq!(table.total_count, 40);
    assert!(table.truncated);
}

#[test]
fn truncation_flag_unset_at_or_below_cap() {
    let checks: Vec<Value> = (0..15)
        .map(|i| json!({"Check": format!("check_{i}"), "Result": "ok"}))
        .collect();
    let report = assemble(json!({"Property Settings": checks}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.rows.len(), 15);
    assert!(!table.truncated);
}

#[test]
fn display_cap_is_configurable() {
    let names: Vec<String> = (0..10).map(|i| format!("dim_{i}")).collect();
    let assembler = ReportAssembler::new(ReportConfig::new().with_display_cap(3));
    let report = assembler.assemble(Some(&payload(json!({"Custom Dimensions": names}))));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.total_count, 10);
    assert!(table.truncated);
}

#[test]
fn split_section_partitions_by_source() {
    let report = assemble(json!({"Transaction Mapping": transaction_stream(3, 2)}));

    let tables = &report.sections[0].tables;
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].label.as_deref(), Some("Revenue Table"));
    assert_eq!(tables[0].rows.len(), 3);
    assert_eq!(tables[1].label.as_deref(), Some("Item Table"));
    assert_eq!(tables[1].rows.len(), 2);

    // No cross-contamination: revenue columns never carry item fields.
    assert_eq!(tables[0].columns, vec!["Transaction ID", "Revenue"]);
    assert_eq!(tables[1].columns, vec!["Transaction ID", "Item ID", "Item Name"]);
    for row in &tables[0].rows {
        assert!(!row.cells[1].is_empty(), "revenue cell must come from revenue rows");
    }
}

#[test]
fn split_groups_are_capped_independently() {
    let report = assemble(json!({"Transaction Mapping": transaction_stream(20, 18)}));

    let tables = &report.sections[0].tables;
    assert_eq!(tables[0].rows.len(), 15);
    assert_eq!(tables[0].total_count, 20);
    assert!(tables[0].truncated);
    assert_eq!(tables[1].rows.len(), 15);
    assert_eq!(tables[1].total_count, 18);
    assert!(tables[1].truncated);
}

#[test]
fn unknown_check_result_section_uses_generic_schema() {
    let report = assemble(json!({"Brand New Section": [
        {"Check": "Something", "Result": "Fine"},
    ]}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.columns, vec!["Check", "Result"]);
    assert_eq!(table.rows[0].cells, vec!["Something", "Fine"]);
}

#[test]
fn unknown_records_without_check_result_dump_whole_records() {
    let report = assemble(json!({"Mystery": [
        {"foo": 1, "bar": 2},
        {"foo": 3, "bar": 4},
    ]}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.columns, vec!["Value"]);
    assert_eq!(table.rows.len(), 2);
    for row in &table.rows {
        assert!(row.cells[0].contains("\"foo\""), "dump must keep record content");
    }
}

#[test]
fn unknown_name_list_section_renders_under_name_header() {
    let report = assemble(json!({"Mystery List": ["alpha", "beta"]}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.columns, vec!["Name"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells, vec!["alpha"]);
}

#[test]
fn unknown_opaque_section_renders_value_dump() {
    let report = assemble(json!({"Weird": {"nested": {"deep": true}}}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.columns, vec!["Value"]);
    assert_eq!(table.rows.len(), 1);
    assert!(table.rows[0].cells[0].contains("nested"));
}

#[test]
fn message_section_renders_single_informational_row() {
    let report = assemble(json!({"Data Streams": "Could not inspect streams for this property"}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        table.rows[0].cells[0],
        "Could not inspect streams for this property"
    );
}

#[test]
fn empty_section_renders_placeholder_row() {
    let report = assemble(json!({"Duplicate Transactions": []}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].cells[0], EMPTY_SECTION_NOTE);
    assert!(!table.rows[0].flagged);
}

#[test]
fn missing_nested_result_fields_project_to_empty_cells() {
    let report = assemble(json!({"Traffic Attribution": [
        {"Check": "Unattributed Traffic", "Result": {"percentage": 8.0}},
        {"Check": "Google Signals", "Result": "Enabled"},
    ]}));

    let table = &report.sections[0].tables[0];
    // Sessions leaf absent on the first record; both leaves absent on the
    // second since its result is a plain string.
    assert_eq!(table.rows[0].cells, vec!["Unattributed Traffic", "8.0", ""]);
    assert_eq!(table.rows[1].cells, vec!["Google Signals", "", ""]);
}

#[test]
fn section_order_is_deterministic_for_reordered_input() {
    let a = assemble(json!({"Key Events": ["purchase"], "Data Streams": []}));
    let b = assemble(json!({"Data Streams": [], "Key Events": ["purchase"]}));
    let names_a: Vec<&str> = a.sections.iter().map(|s| s.name.as_str()).collect();
    let names_b: Vec<&str> = b.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names_a, names_b);
}

// ============================================================================
// Annotation invariants
// ============================================================================

#[test]
fn pii_findings_are_flagged_with_rows_intact() {
    let report = assemble(json!({"PII Scan": [
        {"Check": "URL Query Params", "Result": "No PII found"},
        {"Check": "Page Paths", "Result": "email= detected on /signup"},
    ]}));

    let table = &report.sections[0].tables[0];
    assert!(!table.rows[0].flagged);
    assert!(table.rows[1].flagged);
}

#[test]
fn duplicate_identifier_rows_are_flagged() {
    let report = assemble(json!({"Duplicate Transactions": ["T1001", "T1002"]}));

    let table = &report.sections[0].tables[0];
    assert!(table.rows.iter().all(|r| r.flagged));
}

#[test]
fn column_tooltips_come_from_the_registered_schema() {
    let report = assemble(json!({"Traffic Attribution": [
        {"Check": "Unattributed Traffic", "Result": {"percentage": 8.0}},
    ]}));

    let table = &report.sections[0].tables[0];
    assert_eq!(table.column_tooltips.len(), table.columns.len());
    assert!(table.column_tooltips[1].is_some());
    assert!(table.column_tooltips[0].is_none());
}

#[test]
fn tooltip_resolves_from_catalog_by_check_label() {
    let report = assemble(json!({"Property Settings": [
        {"Check": "Currency", "Result": "EUR"},
        {"Check": "Completely Unknown", "Result": "x"},
    ]}));

    let table = &report.sections[0].tables[0];
    assert!(table.rows[0].tooltip.is_some());
    assert!(table.rows[1].tooltip.is_none());
}

// ============================================================================
// Summary rule invariants
// ============================================================================

#[test]
fn healthy_advisory_when_nothing_fires() {
    let report = assemble(json!({
        "Property Settings": [{"Check": "Currency", "Result": "USD"}],
        "Duplicate Transactions": [],
    }));

    assert_eq!(report.advisories.len(), 1);
    assert_eq!(report.advisories[0].severity, Severity::Healthy);
}

#[test]
fn duplicates_fixture_yields_one_critical_plus_warnings_in_rule_order() {
    let report = assemble(json!({
        "Duplicate Transactions": ["T1"],
        "Property Settings": [{"Check": "Currency", "Result": "(not set)"}],
    }));

    assert_eq!(report.advisories.len(), 2);
    assert_eq!(report.advisories[0].severity, Severity::Critical);
    assert!(report.advisories[0].message.contains("duplicate transaction"));
    assert_eq!(report.advisories[1].severity, Severity::Warning);
    assert!(report.advisories[1].message.contains("currency"));
}

#[test]
fn summary_sees_untruncated_payload() {
    // 60 duplicates: display shows 15, the advisory must still count 60.
    let ids: Vec<String> = (0..60).map(|i| format!("T{i}")).collect();
    let report = assemble(json!({"Duplicate Transactions": ids}));

    assert_eq!(report.sections[0].tables[0].rows.len(), 15);
    assert!(report.advisories[0].message.starts_with("60 duplicate"));
}

#[test]
fn absent_payload_yields_placeholder_not_panic() {
    let report = ReportAssembler::default_config().assemble(None);
    assert!(report.sections.is_empty());
    assert_eq!(report.advisories.len(), 1);
    assert_eq!(report.advisories[0].severity, Severity::Warning);
}

#[test]
fn report_serializes_to_json_and_back() {
    let report = assemble(json!({"Key Events": ["purchase", "sign_up"]}));
    let json = serde_json::to_string(&report).unwrap();
    let parsed: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}
