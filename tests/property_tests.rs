//! Property-based tests using proptest.
//!
//! These tests verify the report accumulator's update semantics and the
//! input-space partitioning of fixed classifiers: every point drawn from
//! a hyper-rectangle inside one leaf's region must receive that leaf's
//! class.

use informe::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

/// Fixed pre-trained tree over two features:
///
/// ```text
/// x0 <= 2.5 -> x1 <= 1.0 -> class 0
/// x0 <= 2.5 -> x1 > 1.0  -> class 1
/// x0 > 2.5  -> class 2
/// ```
fn fixed_tree() -> TreeNode {
    TreeNode::Node(Node {
        feature_idx: 0,
        threshold: 2.5,
        left: Box::new(TreeNode::Node(Node {
            feature_idx: 1,
            threshold: 1.0,
            left: Box::new(TreeNode::Leaf(Leaf {
                class_label: Some(0),
                n_samples: 10,
            })),
            right: Box::new(TreeNode::Leaf(Leaf {
                class_label: Some(1),
                n_samples: 10,
            })),
        })),
        right: Box::new(TreeNode::Leaf(Leaf {
            class_label: Some(2),
            n_samples: 20,
        })),
    })
}

fn fixed_knn() -> KNearestNeighbors {
    let x = Matrix::from_vec(
        6,
        2,
        vec![
            0.0, 0.0, 0.5, 0.5, 1.0, 0.0, //
            5.0, 5.0, 5.5, 5.5, 6.0, 5.0,
        ],
    )
    .expect("valid matrix");
    let y = vec![0, 0, 0, 1, 1, 1];
    let mut knn = KNearestNeighbors::new(3);
    knn.fit(&x, &y).expect("fit");
    knn
}

/// Strategy over mappings of recognized integer fields that appear in the
/// exported record. `Data Set` and `Max Depth` are recognized but tracked
/// only, so they belong in a separate property.
fn int_field_map() -> impl Strategy<Value = HashMap<String, ReportValue>> {
    let field = proptest::sample::select(vec![
        "Samples",
        "Attributes",
        "Features",
        "Classes",
        "Undefined Leaf Nodes",
    ]);
    proptest::collection::hash_map(field, 0i64..1_000_000, 0..6).prop_map(|m| {
        m.into_iter()
            .map(|(key, v)| (key.to_string(), ReportValue::Int(v)))
            .collect()
    })
}

/// Strategy over mappings whose keys are all unrecognized.
fn unrecognized_map() -> impl Strategy<Value = HashMap<String, ReportValue>> {
    proptest::collection::hash_map("[a-z]{1,12}", 0i64..1_000, 0..6).prop_map(|m| {
        m.into_iter()
            .filter(|(key, _)| ReportField::from_name(key).is_none())
            .map(|(key, v)| (key, ReportValue::Int(v)))
            .collect()
    })
}

fn baseline_report(nodes: i64, leaf_nodes: i64) -> Report {
    let mut report = Report::new();
    report
        .add_information(&HashMap::from([
            ("Nodes".to_string(), ReportValue::Int(nodes)),
            ("Leaf Nodes".to_string(), ReportValue::Int(leaf_nodes)),
        ]))
        .expect("recognized keys");
    report
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Report update semantics

    #[test]
    fn report_reflects_recognized_fields(m in int_field_map()) {
        let mut report = baseline_report(15, 8);
        report.add_information(&m).expect("recognized keys");

        let record = report.to_record().expect("complete record");
        for (key, value) in &m {
            prop_assert_eq!(record.get(key), Some(value));
        }
    }

    #[test]
    fn report_ignores_unrecognized_keys(m in unrecognized_map()) {
        let mut report = baseline_report(15, 8);
        let before = report.to_record().expect("complete record");

        report.add_information(&m).expect("unknown keys are not errors");
        let after = report.to_record().expect("complete record");
        prop_assert_eq!(before, after);
    }

    #[test]
    fn report_overwrites_on_repeated_keys(m in int_field_map(), bump in 1i64..100) {
        let mut report = baseline_report(15, 8);
        report.add_information(&m).expect("recognized keys");

        let bumped: HashMap<String, ReportValue> = m
            .iter()
            .map(|(key, value)| {
                let ReportValue::Int(v) = value else { unreachable!() };
                (key.clone(), ReportValue::Int(v + bump))
            })
            .collect();
        report.add_information(&bumped).expect("recognized keys");

        let record = report.to_record().expect("complete record");
        for (key, value) in &bumped {
            prop_assert_eq!(record.get(key), Some(value));
        }
    }

    #[test]
    fn tracked_fields_never_reach_the_record(max_depth in 0i64..1_000) {
        let mut report = baseline_report(15, 8);
        report
            .add_information(&HashMap::from([
                ("Max Depth".to_string(), ReportValue::Int(max_depth)),
                ("Data Set".to_string(), ReportValue::Text("iris".to_string())),
            ]))
            .expect("recognized keys");

        let record = report.to_record().expect("complete record");
        prop_assert_eq!(record.get("Max Depth"), None);
        prop_assert_eq!(record.get("Data Set"), None);
    }

    #[test]
    fn decision_nodes_always_nodes_minus_leaves(
        nodes in 1i64..10_000,
        leaf_nodes in 0i64..10_000,
    ) {
        let report = baseline_report(nodes, leaf_nodes);
        let record = report.to_record().expect("complete record");
        prop_assert_eq!(
            record.get("Decision Nodes"),
            Some(&ReportValue::Int(nodes - leaf_nodes))
        );
    }

    #[test]
    fn to_record_is_idempotent(m in int_field_map()) {
        let mut report = baseline_report(15, 8);
        report.add_information(&m).expect("recognized keys");

        let first = report.to_record().expect("complete record");
        let second = report.to_record().expect("complete record");
        prop_assert_eq!(first, second);
    }

    // Input-space partitioning of the fixed tree

    #[test]
    fn tree_region_low_low_is_class_0(
        x0 in -100.0f32..=2.5,
        x1 in -100.0f32..=1.0,
    ) {
        prop_assert_eq!(fixed_tree().predict_one(&[x0, x1]), Some(0));
    }

    #[test]
    fn tree_region_low_high_is_class_1(
        x0 in -100.0f32..=2.5,
        x1 in 1.1f32..100.0,
    ) {
        prop_assert_eq!(fixed_tree().predict_one(&[x0, x1]), Some(1));
    }

    #[test]
    fn tree_region_high_is_class_2(
        x0 in 2.6f32..100.0,
        x1 in -100.0f32..100.0,
    ) {
        prop_assert_eq!(fixed_tree().predict_one(&[x0, x1]), Some(2));
    }

    #[test]
    fn tree_prediction_is_deterministic(
        x0 in -100.0f32..100.0,
        x1 in -100.0f32..100.0,
    ) {
        let tree = fixed_tree();
        prop_assert_eq!(tree.predict_one(&[x0, x1]), tree.predict_one(&[x0, x1]));
    }

    // Input-space partitioning of the fixed k-NN model

    #[test]
    fn knn_near_origin_cluster_is_class_0(
        x0 in -1.0f32..1.5,
        x1 in -1.0f32..1.5,
    ) {
        let knn = fixed_knn();
        let test = Matrix::from_vec(1, 2, vec![x0, x1]).expect("valid matrix");
        prop_assert_eq!(knn.predict(&test).expect("predict"), vec![0]);
    }

    #[test]
    fn knn_near_far_cluster_is_class_1(
        x0 in 4.0f32..7.0,
        x1 in 4.0f32..7.0,
    ) {
        let knn = fixed_knn();
        let test = Matrix::from_vec(1, 2, vec![x0, x1]).expect("valid matrix");
        prop_assert_eq!(knn.predict(&test).expect("predict"), vec![1]);
    }
}
