//! Validator tests: the canonical document must pass unmodified, and every
//! document invariant must produce a pointed violation when broken.
mod common;
use common::*;
use formsmith::prelude::*;
use serde_json::json;

fn expect_report(value: &serde_json::Value) -> ValidationReport {
    match validate_form(value) {
        Err(AttemptError::Validation(report)) => report,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn accepts_the_canonical_example_unmodified() {
    let form = validate_form(&canonical_value()).expect("canonical example validates");
    assert_eq!(form, canonical_example());
}

#[test]
fn rejects_a_non_object_document() {
    let report = expect_report(&json!([1, 2, 3]));
    assert_eq!(report.violations[0].path, "$");
}

#[test]
fn rejects_an_empty_controls_array() {
    let report = expect_report(&json!({"controls": []}));
    assert!(report.to_string().contains("at least one control"));
}

#[test]
fn rejects_a_dangling_parent_reference() {
    let mut doc = canonical_value();
    doc["controls"][2]["parentId"] = json!("GHOST");
    let report = expect_report(&doc);
    assert!(report.to_string().contains("'GHOST'"));
    assert!(report.violations.iter().any(|v| v.path.ends_with("parentId")));
}

#[test]
fn rejects_a_grid_with_fewer_than_five_rows() {
    let mut doc = canonical_value();
    doc["controls"][1]["properties"]["rows"]
        .as_array_mut()
        .expect("rows array")
        .truncate(3);
    let report = expect_report(&doc);
    assert!(report.to_string().contains("at least 5 rows"));
}

#[test]
fn rejects_a_grid_without_columns() {
    let mut doc = canonical_value();
    doc["controls"][1]["properties"]["columns"] = json!([]);
    let report = expect_report(&doc);
    assert!(report.to_string().contains("at least 1 column"));
}

#[test]
fn rejects_a_placement_outside_the_grid() {
    let mut doc = canonical_value();
    doc["controls"][2]["parentProperties"]["row"] = json!(9);
    let report = expect_report(&doc);
    assert!(report.to_string().contains("a row between 1 and 5"));
}

#[test]
fn rejects_a_column_outside_the_grid() {
    let mut doc = canonical_value();
    doc["controls"][3]["parentProperties"]["column"] = json!(3);
    let report = expect_report(&doc);
    assert!(report.to_string().contains("a column between 1 and 1"));
}

#[test]
fn rejects_a_non_visible_control() {
    let mut doc = canonical_value();
    doc["controls"][2]["properties"]["visible"] = json!("Hidden");
    let report = expect_report(&doc);
    assert!(report.to_string().contains("'Hidden'"));
    assert!(report.to_string().contains("'Visible'"));
}

#[test]
fn rejects_an_unknown_control_type() {
    let mut doc = canonical_value();
    doc["controls"][2]["type"] = json!("Sparkles");
    let report = expect_report(&doc);
    assert!(report.to_string().contains("'Sparkles'"));
    assert!(report.to_string().contains("recognized control types"));
}

#[test]
fn rejects_multiple_roots() {
    let mut doc = canonical_value();
    doc["controls"][1]
        .as_object_mut()
        .expect("control object")
        .remove("parentId");
    let report = expect_report(&doc);
    assert!(report.to_string().contains("exactly one root"));
}

#[test]
fn rejects_duplicate_control_ids() {
    let mut doc = canonical_value();
    doc["controls"][3]["id"] = json!("LBL001");
    let report = expect_report(&doc);
    assert!(report.to_string().contains("duplicate 'LBL001'"));
}

#[test]
fn rejects_a_missing_placement_on_a_non_grid_child() {
    let mut doc = canonical_value();
    doc["controls"][2]
        .as_object_mut()
        .expect("control object")
        .remove("parentProperties");
    let report = expect_report(&doc);
    assert!(report.violations.iter().any(|v| v.path.ends_with("parentProperties")));
}

#[test]
fn rejects_a_parent_cycle() {
    let mut doc = canonical_value();
    doc["controls"][2]["parentId"] = json!("TXT001");
    doc["controls"][3]["parentId"] = json!("LBL001");
    let report = expect_report(&doc);
    assert!(report.to_string().contains("an acyclic parent chain"));
}

#[test]
fn reports_every_violation_not_just_the_first() {
    let mut doc = canonical_value();
    doc["controls"][2]["parentId"] = json!("GHOST");
    doc["controls"][1]["properties"]["rows"]
        .as_array_mut()
        .expect("rows array")
        .truncate(3);
    let report = expect_report(&doc);
    assert!(report.violations.len() >= 2);
    let rendered = report.to_string();
    assert!(rendered.contains("'GHOST'"));
    assert!(rendered.contains("at least 5 rows"));
}

#[test]
fn missing_workflow_arrays_default_to_empty() {
    let mut doc = canonical_value();
    let root = doc.as_object_mut().expect("document object");
    root.remove("clientWorkflows");
    root.remove("serverTriggers");
    let form = validate_form(&doc).expect("workflow arrays are optional");
    assert!(form.client_workflows.is_empty());
    assert!(form.server_triggers.is_empty());
}
