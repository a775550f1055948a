use super::{first_string, scalar_to_string};
use serde::Serialize;
use serde_json::{Map, Value};

const ENVELOPE_KEYS: &[&str] = &["apps", "marketplace", "installed"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppDescriptor {
    pub name: String,
    pub version: String,
    pub status: String,
    pub author: String,
    pub description: String,
}

/// Accepts `{"apps": [...]}` or a bare array; a single descriptor object is
/// treated as a list of one.
pub fn normalize(value: &Value) -> Option<Vec<AppDescriptor>> {
    match value {
        Value::Array(items) => Some(descriptors(items)),
        Value::Object(object) => {
            if let Some(items) = ENVELOPE_KEYS
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_array))
            {
                return Some(descriptors(items));
            }
            descriptor_from_object(object).map(|app| vec![app])
        }
        _ => None,
    }
}

fn descriptors(items: &[Value]) -> Vec<AppDescriptor> {
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(descriptor_from_object)
        .collect()
}

fn descriptor_from_object(object: &Map<String, Value>) -> Option<AppDescriptor> {
    let name = first_string(object, &["name", "nameSlug", "id"])?;
    let author = match object.get("author") {
        Some(Value::Object(author)) => first_string(author, &["name", "homepage"]),
        Some(Value::String(author)) => Some(author.clone()),
        _ => None,
    };
    let status = match object.get("status") {
        Some(status @ (Value::String(_) | Value::Bool(_))) => scalar_to_string(status),
        _ => match object.get("enabled") {
            Some(flag @ Value::Bool(_)) => scalar_to_string(flag),
            _ => "unknown".to_string(),
        },
    };
    Some(AppDescriptor {
        name,
        version: first_string(object, &["version"]).unwrap_or_else(|| "unknown".to_string()),
        status,
        author: author.unwrap_or_else(|| "unknown".to_string()),
        description: first_string(object, &["description", "shortDescription"])
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_and_bare_array_yield_same_descriptors() {
        let items = json!([
            {"name": "Jira", "version": "1.2.0", "status": "manually_enabled", "author": {"name": "Acme"}},
            {"name": "Poll", "version": "3.0.1", "status": "disabled", "description": "Polls"}
        ]);
        let bare = normalize(&items).expect("bare array should parse");
        let wrapped = normalize(&json!({ "apps": items })).expect("envelope should parse");
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].author, "Acme");
        assert_eq!(bare[1].description, "Polls");
    }

    #[test]
    fn missing_fields_fall_back_to_unknown() {
        let apps = normalize(&json!([{"name": "Bare"}, {"version": "1.0"}]))
            .expect("array should parse");
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].version, "unknown");
        assert_eq!(apps[0].status, "unknown");
    }

    #[test]
    fn boolean_enabled_flag_becomes_status() {
        let apps = normalize(&json!({"name": "Bot", "enabled": false})).expect("should parse");
        assert_eq!(apps[0].status, "false");
    }
}
