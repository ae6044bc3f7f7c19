use mongodb::bson::{self, Document};
use serde_json::{Map, Value};
use service_core::error::AppError;

/// Shapes a submitted JSON body into the fields that get stored.
///
/// Objects pass through untouched; bare arrays of trial rows are wrapped as
/// `{"rows": [...]}`. Scalars never come out of the experiment page and are
/// rejected.
pub fn normalize_payload(payload: Value) -> Result<Map<String, Value>, AppError> {
    match payload {
        Value::Object(fields) => Ok(fields),
        Value::Array(rows) => {
            let mut fields = Map::new();
            fields.insert("rows".to_string(), Value::Array(rows));
            Ok(fields)
        }
        other => Err(AppError::BadRequest(anyhow::anyhow!(
            "expected a JSON object or array, got {}",
            json_type(&other)
        ))),
    }
}

/// Builds the stored run document: the normalized payload plus the
/// server-assigned creation timestamp. A caller-supplied `created_at` is
/// overwritten; the server clock is authoritative.
pub fn run_document(fields: Map<String, Value>) -> Result<Document, AppError> {
    let mut run = bson::to_document(&fields).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!(
            "payload cannot be stored as a BSON document: {}",
            e
        ))
    })?;
    run.insert("created_at", bson::DateTime::now());
    Ok(run)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
