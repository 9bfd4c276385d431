use crate::engine::MaskEngine;
use crate::rules::{ColumnRuleSpec, PathRuleSpec, compile};
use chrono::{TimeZone, Utc};
use rowmask_core::{Column, ColumnType, Error, Record, Schema, Value};
use serde_json::json;

fn spec(name: &str) -> ColumnRuleSpec {
    ColumnRuleSpec {
        name: name.to_string(),
        ..Default::default()
    }
}

fn engine(schema: Schema, specs: &[ColumnRuleSpec]) -> MaskEngine {
    MaskEngine::new(schema, compile(specs).unwrap()).unwrap()
}

#[test]
fn end_to_end_full_mask_on_text_column() {
    let schema = Schema::new(vec![
        Column::new("c0", ColumnType::Text),
        Column::new("c1", ColumnType::Text),
    ]);
    let engine = engine(schema, &[spec("c0")]);

    let record = Record::new(vec![
        Some(Value::Text("hello".into())),
        Some(Value::Text("world".into())),
    ]);
    let output = engine.process_record(&record).unwrap();

    assert_eq!(
        output.values(),
        &[
            Some(Value::Text("*****".into())),
            Some(Value::Text("world".into())),
        ]
    );
}

#[test]
fn unruled_columns_pass_through_with_type() {
    let schema = Schema::new(vec![
        Column::new("b", ColumnType::Boolean),
        Column::new("d", ColumnType::Double),
        Column::new("l", ColumnType::Long),
        Column::new("t", ColumnType::Timestamp),
        Column::new("j", ColumnType::Json),
        Column::new("masked", ColumnType::Text),
    ]);
    let engine = engine(schema, &[spec("masked")]);

    let ts = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
    let record = Record::new(vec![
        Some(Value::Boolean(false)),
        Some(Value::Double(2.25)),
        Some(Value::Long(7)),
        Some(Value::Timestamp(ts)),
        Some(Value::Json(json!({"k": [1, 2]}))),
        Some(Value::Text("x".into())),
    ]);
    let output = engine.process_record(&record).unwrap();

    // Everything but the last column is byte-identical, type included.
    assert_eq!(output.values()[..5], record.values()[..5]);
    assert_eq!(output.values()[5], Some(Value::Text("*".into())));
}

#[test]
fn null_values_stay_null_even_when_ruled() {
    let schema = Schema::new(vec![
        Column::new("c0", ColumnType::Text),
        Column::new("c1", ColumnType::Json),
    ]);
    let engine = engine(schema, &[spec("c0"), spec("c1")]);

    let record = Record::new(vec![None, None]);
    let output = engine.process_record(&record).unwrap();
    assert_eq!(output.values(), &[None, None]);
}

#[test]
fn masked_scalars_become_text() {
    let schema = Schema::new(vec![
        Column::new("b", ColumnType::Boolean),
        Column::new("d", ColumnType::Double),
        Column::new("l", ColumnType::Long),
        Column::new("t", ColumnType::Timestamp),
    ]);
    let engine = engine(schema, &[spec("b"), spec("d"), spec("l"), spec("t")]);

    let ts = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
    let record = Record::new(vec![
        Some(Value::Boolean(true)),
        Some(Value::Double(1.5)),
        Some(Value::Long(1234)),
        Some(Value::Timestamp(ts)),
    ]);
    let output = engine.process_record(&record).unwrap();

    // "true", "1.5", "1234", "2023-01-02T03:04:05+00:00"
    assert_eq!(output.values()[0], Some(Value::Text("****".into())));
    assert_eq!(output.values()[1], Some(Value::Text("***".into())));
    assert_eq!(output.values()[2], Some(Value::Text("****".into())));
    assert_eq!(
        output.values()[3],
        Some(Value::Text("*".repeat("2023-01-02T03:04:05+00:00".len())))
    );
}

#[test]
fn json_column_masks_paths_in_place() {
    let schema = Schema::new(vec![Column::new("payload", ColumnType::Json)]);
    let engine = engine(
        schema,
        &[ColumnRuleSpec {
            name: "payload".into(),
            paths: Some(vec![
                PathRuleSpec {
                    key: "$.root.key1".into(),
                    ..Default::default()
                },
                PathRuleSpec {
                    key: "$.root.missing".into(),
                    ..Default::default()
                },
                PathRuleSpec {
                    key: "$".into(),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        }],
    );

    let record = Record::new(vec![Some(Value::Json(
        json!({"root": {"key1": "value1", "key2": 2}}),
    ))]);
    let output = engine.process_record(&record).unwrap();

    assert_eq!(
        output.values()[0],
        Some(Value::Json(json!({"root": {"key1": "******", "key2": 2}})))
    );
}

#[test]
fn json_path_with_email_kind_and_length() {
    let schema = Schema::new(vec![Column::new("payload", ColumnType::Json)]);
    let engine = engine(
        schema,
        &[ColumnRuleSpec {
            name: "payload".into(),
            paths: Some(vec![PathRuleSpec {
                key: "$.user.email".into(),
                kind: Some("email".into()),
                length: Some(3),
                ..Default::default()
            }]),
            ..Default::default()
        }],
    );

    let record = Record::new(vec![Some(Value::Json(
        json!({"user": {"email": "someone@example.org", "id": 9}}),
    ))]);
    let output = engine.process_record(&record).unwrap();

    assert_eq!(
        output.values()[0],
        Some(Value::Json(
            json!({"user": {"email": "***@example.org", "id": 9}})
        ))
    );
}

#[test]
fn rule_on_json_column_without_paths_leaves_tree_intact() {
    let schema = Schema::new(vec![Column::new("payload", ColumnType::Json)]);
    let engine = engine(schema, &[spec("payload")]);

    let tree = json!({"a": {"b": "secret"}});
    let record = Record::new(vec![Some(Value::Json(tree.clone()))]);
    let output = engine.process_record(&record).unwrap();
    assert_eq!(output.values()[0], Some(Value::Json(tree)));
}

#[test]
fn output_schema_is_projected_once() {
    let schema = Schema::new(vec![
        Column::new("l", ColumnType::Long),
        Column::new("j", ColumnType::Json),
        Column::new("keep", ColumnType::Double),
    ]);
    let engine = engine(schema, &[spec("l"), spec("j")]);

    let output = engine.output_schema();
    assert_eq!(output.column("l").unwrap().column_type, ColumnType::Text);
    assert_eq!(output.column("j").unwrap().column_type, ColumnType::Json);
    assert_eq!(output.column("keep").unwrap().column_type, ColumnType::Double);
}

#[test]
fn duplicate_rule_targets_are_rejected() {
    let schema = Schema::new(vec![Column::new("c0", ColumnType::Text)]);
    let err = MaskEngine::new(schema, compile(&[spec("c0"), spec("c0")]).unwrap()).unwrap_err();
    assert!(matches!(err, Error::ConfigValidation(_)));
    assert!(err.to_string().contains("c0"));
}

#[test]
fn empty_rule_list_is_rejected() {
    let schema = Schema::new(vec![Column::new("c0", ColumnType::Text)]);
    let err = MaskEngine::new(schema, Vec::new()).unwrap_err();
    assert!(matches!(err, Error::ConfigValidation(_)));
}

#[test]
fn record_arity_mismatch_is_fatal() {
    let schema = Schema::new(vec![
        Column::new("c0", ColumnType::Text),
        Column::new("c1", ColumnType::Text),
    ]);
    let engine = engine(schema, &[spec("c0")]);

    let record = Record::new(vec![Some(Value::Text("only one".into()))]);
    let err = engine.process_record(&record).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(_)));
}

#[test]
fn value_type_mismatch_is_fatal() {
    let schema = Schema::new(vec![Column::new("c0", ColumnType::Long)]);
    let engine = engine(schema, &[spec("c0")]);

    let record = Record::new(vec![Some(Value::Text("not a long".into()))]);
    let err = engine.process_record(&record).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(_)));
    assert!(err.to_string().contains("c0"));
}

#[test]
fn processing_is_stateless_across_records() {
    let schema = Schema::new(vec![Column::new("c0", ColumnType::Text)]);
    let engine = engine(schema, &[spec("c0")]);

    let record = Record::new(vec![Some(Value::Text("abc".into()))]);
    let first = engine.process_record(&record).unwrap();
    let second = engine.process_record(&record).unwrap();
    assert_eq!(first, second);
}
