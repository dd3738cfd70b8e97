//! Integration tests for report export.
//!
//! Exercises the full pipeline: fit a tree, inspect it, accumulate the
//! report, and round-trip the record through `GeneralReport.csv`.

use informe::error::InformeError;
use informe::prelude::*;
use std::collections::HashMap;
use std::fs;

fn info(pairs: &[(&str, ReportValue)]) -> HashMap<String, ReportValue> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

#[test]
fn export_writes_header_and_single_row() {
    let mut report = Report::new();
    report
        .add_information(&info(&[
            ("Samples", ReportValue::Int(400)),
            ("Nodes", ReportValue::Int(15)),
            ("Leaf Nodes", ReportValue::Int(8)),
        ]))
        .expect("recognized keys");

    let dir = tempfile::tempdir().expect("temp dir");
    report.export_csv(dir.path()).expect("export");

    let contents = fs::read_to_string(dir.path().join("GeneralReport.csv")).expect("read back");
    assert_eq!(
        contents,
        "Samples,Nodes,Decision Nodes,Leaf Nodes\n400,15,7,8\n"
    );
}

#[test]
fn export_header_matches_record_keys() {
    let mut report = Report::new();
    report
        .add_information(&info(&[
            ("Samples", ReportValue::Int(100)),
            ("Classes", ReportValue::Int(2)),
            ("Nodes", ReportValue::Int(5)),
            ("Leaf Nodes", ReportValue::Int(3)),
            ("Undefined Leaf Nodes", ReportValue::Int(0)),
        ]))
        .expect("recognized keys");

    let dir = tempfile::tempdir().expect("temp dir");
    report.export_csv(dir.path()).expect("export");

    let contents = fs::read_to_string(dir.path().join("GeneralReport.csv")).expect("read back");
    let header = contents.lines().next().expect("header line");
    let keys = report.to_record().expect("record").keys().join(",");
    assert_eq!(header, keys);
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn export_quotes_nested_values() {
    let mut report = Report::new();
    report
        .add_information(&info(&[
            ("Nodes", ReportValue::Int(3)),
            ("Leaf Nodes", ReportValue::Int(2)),
            (
                "Class Labels",
                ReportValue::List(vec!["0".to_string(), "1".to_string()]),
            ),
        ]))
        .expect("recognized keys");

    let dir = tempfile::tempdir().expect("temp dir");
    report.export_csv(dir.path()).expect("export");

    let contents = fs::read_to_string(dir.path().join("GeneralReport.csv")).expect("read back");
    let row = contents.lines().nth(1).expect("data row");
    // The JSON list cell contains commas and quotes, so it must be quoted
    assert_eq!(row, r#""[""0"",""1""]",3,1,2"#);
}

#[test]
fn export_without_required_fields_fails() {
    let report = Report::new();
    let dir = tempfile::tempdir().expect("temp dir");

    let err = report.export_csv(dir.path()).unwrap_err();
    assert!(matches!(err, InformeError::MissingField { field: "Nodes" }));
    assert!(!dir.path().join("GeneralReport.csv").exists());
}

#[test]
fn export_to_missing_directory_fails() {
    let mut report = Report::new();
    report
        .add_information(&info(&[
            ("Nodes", ReportValue::Int(3)),
            ("Leaf Nodes", ReportValue::Int(2)),
        ]))
        .expect("recognized keys");

    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("no_such_subdir");
    let err = report.export_csv(&missing).unwrap_err();
    assert!(matches!(err, InformeError::Io(_)));
}

#[test]
fn full_pipeline_tree_to_csv() {
    // Four samples, two per class, cleanly separable on the one feature
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 8.0, 9.0]).expect("valid matrix");
    let y = vec![0, 0, 1, 1];
    let labels = vec!["low".to_string(), "high".to_string()];

    let mut model = DecisionTreeClassifier::new();
    model.fit(&x, &y).expect("fit");

    let inspection = TreeInspection::of("toy", &x, &y, &labels, model.tree().expect("fitted"))
        .expect("inspect");
    let report = inspection.report().expect("report");

    let dir = tempfile::tempdir().expect("temp dir");
    report.export_csv(dir.path()).expect("export");

    let contents = fs::read_to_string(dir.path().join("GeneralReport.csv")).expect("read back");
    let header = contents.lines().next().expect("header line");
    assert_eq!(
        header,
        "Samples,Attributes,Features,Classes,Samples per Class,Class Labels,\
         Nodes,Decision Nodes,Leaf Nodes,Undefined Leaf Nodes,Decision Paths"
    );

    let record = report.to_record().expect("record");
    assert_eq!(record.get("Samples"), Some(&ReportValue::Int(4)));
    assert_eq!(record.get("Attributes"), Some(&ReportValue::Int(2)));
    assert_eq!(record.get("Nodes"), Some(&ReportValue::Int(3)));
    assert_eq!(record.get("Decision Nodes"), Some(&ReportValue::Int(1)));
    assert_eq!(record.get("Leaf Nodes"), Some(&ReportValue::Int(2)));

    // Tracked but never exported
    assert!(!header.contains("Data Set"));
    assert!(!header.contains("Max Depth"));
}

#[test]
fn repeated_export_is_stable() {
    let mut report = Report::new();
    report
        .add_information(&info(&[
            ("Nodes", ReportValue::Int(9)),
            ("Leaf Nodes", ReportValue::Int(5)),
        ]))
        .expect("recognized keys");

    let dir = tempfile::tempdir().expect("temp dir");
    report.export_csv(dir.path()).expect("first export");
    let first = fs::read_to_string(dir.path().join("GeneralReport.csv")).expect("read back");
    report.export_csv(dir.path()).expect("second export");
    let second = fs::read_to_string(dir.path().join("GeneralReport.csv")).expect("read back");
    assert_eq!(first, second);
}
