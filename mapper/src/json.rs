//! JSON documents as dynamic mapping sources.

use crate::{MapError, MapResult, SourceMap};
use automap_core::{Object, TypeId, Value};
use serde_json::Value as Json;

/// Convert a JSON value into a dynamic value.
///
/// Integers that fit `i64` become `int`, larger non-negative ones `uint`, and
/// every other number `float`. Arrays become `[]any` and objects
/// `map[string]any`.
pub fn dynamic_from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::any(Object::bool(*b)),
        Json::Number(n) => {
            let object = if let Some(i) = n.as_i64() {
                Object::int(i)
            } else if let Some(u) = n.as_u64() {
                Object::uint(u)
            } else {
                Object::float(n.as_f64().unwrap_or(f64::NAN))
            };
            Value::any(object)
        }
        Json::String(s) => Value::any(Object::string(s.as_str())),
        Json::Array(items) => Value::any(Object::new(
            TypeId::ANY_LIST,
            Value::List(items.iter().map(dynamic_from_json).collect()),
        )),
        Json::Object(fields) => Value::any(Object::new(
            TypeId::ANY_MAP,
            Value::Map(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), dynamic_from_json(v)))
                    .collect(),
            ),
        )),
    }
}

/// Convert a JSON object into a source map of dynamic values.
pub fn source_map_from_json(json: &Json) -> MapResult<SourceMap> {
    let Json::Object(fields) = json else {
        return Err(MapError::invalid_source(format!(
            "expected a JSON object, found {}",
            json_kind(json)
        )));
    };
    Ok(fields
        .iter()
        .map(|(k, v)| (k.clone(), Object::new(TypeId::ANY, dynamic_from_json(v))))
        .collect())
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
