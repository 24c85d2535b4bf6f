use serde_json::{json, Map, Value};

use crate::error::TimetableError;

fn envelope(id: &str, outcome: std::result::Result<Value, Value>) -> Value {
    match outcome {
        Ok(result) => json!({ "id": id, "ok": true, "result": result }),
        Err(error) => json!({ "id": id, "ok": false, "error": error }),
    }
}

pub fn ok(id: &str, result: Value) -> Value {
    envelope(id, Ok(result))
}

pub fn err(id: &str, code: &str, message: impl Into<String>, details: Option<Value>) -> Value {
    let mut error = Map::new();
    error.insert("code".into(), Value::from(code));
    error.insert("message".into(), Value::from(message.into()));
    if let Some(d) = details {
        error.insert("details".into(), d);
    }
    envelope(id, Err(Value::Object(error)))
}

/// The field a caller needs to act on, when the error names one.
fn details_of(e: &TimetableError) -> Option<Value> {
    match e {
        TimetableError::SourceUnavailable { sheet } => Some(json!({ "sheet": sheet })),
        TimetableError::EmptyResult { title } => Some(json!({ "title": title })),
        TimetableError::TeacherNotFound { query } => Some(json!({ "query": query })),
        _ => None,
    }
}

pub fn from_timetable(id: &str, e: &TimetableError) -> Value {
    err(id, e.code(), e.to_string(), details_of(e))
}
