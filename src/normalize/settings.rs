use super::{first_string, scalar_to_string};
use serde_json::{Map, Value};
use std::collections::HashSet;

const ID_KEYS: &[&str] = &["_id", "id", "key"];
const KIND_KEYS: &[&str] = &["type", "kind"];
const LIST_KEYS: &[&str] = &["settings", "update", "options"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub id: String,
    pub value: String,
    pub kind: String,
}

/// Folds every supported settings shape into a list with unique ids.
///
/// When an id repeats, the first occurrence is kept. Envelopes may carry
/// several option lists (`settings`, then `update`, then `options`); they
/// are merged in that order.
pub fn normalize(value: &Value) -> Option<Vec<Setting>> {
    let collected = match value {
        Value::Array(items) => items.iter().filter_map(setting_from_value).collect(),
        Value::Object(object) => from_object(object)?,
        _ => return None,
    };
    Some(dedup_first_wins(collected))
}

fn from_object(object: &Map<String, Value>) -> Option<Vec<Setting>> {
    let lists: Vec<&Value> = LIST_KEYS.iter().filter_map(|key| object.get(*key)).collect();
    if !lists.is_empty() {
        let mut collected = Vec::new();
        for list in lists {
            match list {
                Value::Array(items) => {
                    collected.extend(items.iter().filter_map(setting_from_value))
                }
                Value::Object(map) => collected.extend(from_flat_map(map)),
                _ => {}
            }
        }
        return Some(collected);
    }
    if let Some(setting) = setting_from_object(object) {
        return Some(vec![setting]);
    }
    if object.is_empty() {
        return Some(Vec::new());
    }
    Some(from_flat_map(object))
}

fn from_flat_map(map: &Map<String, Value>) -> Vec<Setting> {
    map.iter()
        .filter(|(_, value)| !value.is_object() && !value.is_array())
        .map(|(id, value)| Setting {
            id: id.clone(),
            value: scalar_to_string(value),
            kind: json_kind(value).to_string(),
        })
        .collect()
}

fn setting_from_value(value: &Value) -> Option<Setting> {
    match value {
        Value::Object(object) => setting_from_object(object),
        _ => None,
    }
}

fn setting_from_object(object: &Map<String, Value>) -> Option<Setting> {
    let id = first_string(object, ID_KEYS)?;
    let value = object.get("value")?;
    let kind = first_string(object, KIND_KEYS).unwrap_or_else(|| json_kind(value).to_string());
    Some(Setting {
        id,
        value: scalar_to_string(value),
        kind,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn dedup_first_wins(settings: Vec<Setting>) -> Vec<Setting> {
    let mut seen = HashSet::new();
    settings
        .into_iter()
        .filter(|setting| seen.insert(setting.id.clone()))
        .collect()
}
