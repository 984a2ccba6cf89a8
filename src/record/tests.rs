//! Tests for the record module

use super::*;
use crate::error::Error;
use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value, "test").unwrap()
}

fn column_names(schema: &arrow::datatypes::Schema) -> Vec<&str> {
    schema.fields().iter().map(|f| f.name().as_str()).collect()
}

// ============================================================================
// Record
// ============================================================================

#[test]
fn test_record_from_object() {
    let rec = record(json!({"email": "a@example.com", "role": "MEMBER"}));
    assert_eq!(rec.len(), 2);
    assert_eq!(rec.get_str("email"), Some("a@example.com"));
    assert_eq!(rec.fields().collect::<Vec<_>>(), vec!["email", "role"]);
}

#[test]
fn test_record_from_non_object() {
    let err = Record::from_value(json!(["a"]), "members[0]").unwrap_err();
    match err {
        Error::MalformedResponse { field, message } => {
            assert_eq!(field, "members[0]");
            assert!(message.contains("an array"));
        }
        other => panic!("Expected MalformedResponse, got {other:?}"),
    }
}

#[test]
fn test_record_from_iter_and_insert() {
    let mut rec: Record = [("id", json!("123"))].into_iter().collect();
    rec.insert("status", "ACTIVE");
    assert_eq!(rec.into_value(), json!({"id": "123", "status": "ACTIVE"}));
}

#[test]
fn test_collection_keeps_order() {
    let collection: RecordCollection = (0..5).map(|i| record(json!({ "n": i }))).collect();
    let ns: Vec<i64> = collection
        .iter()
        .map(|r| r.get("n").and_then(serde_json::Value::as_i64).unwrap())
        .collect();
    assert_eq!(ns, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_collection_serializes_as_array() {
    let collection = RecordCollection::from(vec![record(json!({"a": 1})), record(json!({"b": 2}))]);
    assert_eq!(
        serde_json::to_value(&collection).unwrap(),
        json!([{"a": 1}, {"b": 2}])
    );
}

// ============================================================================
// Schema inference
// ============================================================================

#[test]
fn test_schema_first_appearance_order() {
    let records = vec![
        record(json!({"email": "a@example.com", "role": "OWNER"})),
        record(json!({"id": "2", "email": "b@example.com", "delivery_settings": "DIGEST"})),
    ];

    let schema = infer_schema(&records);
    assert_eq!(
        column_names(&schema),
        vec!["email", "role", "id", "delivery_settings"]
    );
    assert!(schema.fields().iter().all(|f| f.is_nullable()));
}

#[test]
fn test_schema_types() {
    let records = vec![
        record(json!({"flag": true, "count": 1, "ratio": 0.5, "tags": ["x"], "meta": {"k": 1}})),
        record(json!({"flag": false, "count": 2, "ratio": 1, "tags": [], "meta": null})),
    ];

    let schema = infer_schema(&records);
    let dtype = |name: &str| schema.field_with_name(name).unwrap().data_type().clone();

    assert_eq!(dtype("flag"), DataType::Boolean);
    assert_eq!(dtype("count"), DataType::Int64);
    assert_eq!(dtype("ratio"), DataType::Float64);
    assert_eq!(dtype("tags"), DataType::Utf8);
    assert_eq!(dtype("meta"), DataType::Utf8);
}

#[test]
fn test_schema_conflicting_kinds_become_text() {
    let records = vec![record(json!({"v": 1})), record(json!({"v": "one"}))];
    let schema = infer_schema(&records);
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
}

#[test]
fn test_schema_all_null_column_is_text() {
    let records = vec![record(json!({"etag": null}))];
    let schema = infer_schema(&records);
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
}

// ============================================================================
// RecordBatch conversion
// ============================================================================

#[test]
fn test_batch_sparse_records() {
    let records = vec![
        record(json!({"email": "a@example.com", "role": "OWNER"})),
        record(json!({"email": "b@example.com", "status": "ACTIVE"})),
    ];

    let batch = to_record_batch(&records).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(column_names(&batch.schema()), vec!["email", "role", "status"]);

    let role = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(role.value(0), "OWNER");
    assert!(role.is_null(1));

    let status = batch
        .column(2)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(status.is_null(0));
    assert_eq!(status.value(1), "ACTIVE");
}

#[test]
fn test_batch_typed_columns() {
    let records = vec![
        record(json!({"isMember": true, "n": 3, "x": 1})),
        record(json!({"isMember": false, "n": 4, "x": 2.5})),
    ];
    let batch = to_record_batch(&records).unwrap();

    let flags = batch
        .column(0)
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    assert!(flags.value(0));
    assert!(!flags.value(1));

    let n = batch.column(1).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(n.values().to_vec(), vec![3, 4]);

    let x = batch
        .column(2)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(x.value(0), 1.0);
    assert_eq!(x.value(1), 2.5);
}

#[test]
fn test_batch_nested_value_as_json_text() {
    let records = vec![record(json!({"meta": {"k": [1, 2]}}))];
    let batch = to_record_batch(&records).unwrap();
    let meta = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(meta.value(0), r#"{"k":[1,2]}"#);
}

#[test]
fn test_batch_empty() {
    let batch = to_record_batch(&[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 0);
}

#[test]
fn test_batch_rows_without_fields() {
    let batch = to_record_batch(&[Record::new(), Record::new()]).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 0);
}

#[test]
fn test_single_record_batch() {
    let rec = record(json!({"kind": "admin#directory#member", "email": "a@example.com"}));
    let batch = rec.to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 1);
    assert_eq!(column_names(&batch.schema()), vec!["kind", "email"]);
}
