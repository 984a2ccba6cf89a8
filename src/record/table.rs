//! Records to Arrow conversion
//!
//! Column order follows the first appearance of each field across the
//! records. Each column gets the narrowest type that holds every value:
//! booleans, 64-bit integers, floats (ints mixed with floats widen), and
//! text for strings, nested values or conflicting kinds. Columns that only
//! ever hold nulls become nullable text.

use super::types::Record;
use crate::error::Result;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Infer the table schema for a set of records
pub fn infer_schema(records: &[Record]) -> Schema {
    let mut order: Vec<String> = Vec::new();
    let mut types: HashMap<String, DataType> = HashMap::new();

    for record in records {
        for (name, value) in record.iter() {
            let inferred = infer_type(value);
            match types.get_mut(name) {
                Some(existing) => *existing = merge_types(existing, &inferred),
                None => {
                    order.push(name.to_string());
                    types.insert(name.to_string(), inferred);
                }
            }
        }
    }

    let fields: Vec<Field> = order
        .into_iter()
        .map(|name| {
            let dtype = match types.remove(&name) {
                Some(DataType::Null) | None => DataType::Utf8,
                Some(dtype) => dtype,
            };
            Field::new(name, dtype, true)
        })
        .collect();

    Schema::new(fields)
}

/// Convert records to a single Arrow RecordBatch
pub fn to_record_batch(records: &[Record]) -> Result<RecordBatch> {
    let schema = Arc::new(infer_schema(records));

    if schema.fields().is_empty() {
        // Rows without any field still count
        let options = RecordBatchOptions::new().with_row_count(Some(records.len()));
        return Ok(RecordBatch::try_new_with_options(schema, vec![], &options)?);
    }

    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| {
            let values: Vec<Option<&Value>> =
                records.iter().map(|r| r.get(field.name())).collect();
            build_array(&values, field.data_type())
        })
        .collect();

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Infer Arrow DataType from a JSON value
fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        Value::String(_) | Value::Array(_) | Value::Object(_) => DataType::Utf8,
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&Value>], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Arc::new(arr)
        }
        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Arc::new(arr)
        }
        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Arc::new(arr)
        }
        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| match v {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(other) => Some(other.to_string()),
                })
                .collect();
            Arc::new(arr)
        }
    }
}
