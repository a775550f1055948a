use super::StatsObject;
use serde_json::Value;

const ENVELOPE_KEYS: &[&str] = &["statistics", "stats"];

pub fn normalize(value: &Value) -> Option<StatsObject> {
    match value {
        Value::Object(object) => {
            let inner = ENVELOPE_KEYS
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_object));
            Some(inner.unwrap_or(object).clone())
        }
        Value::Array(items) => items.iter().find_map(Value::as_object).cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_is_unwrapped() {
        let stats = normalize(&json!({"success": true, "statistics": {"totalUsers": 3}}))
            .expect("envelope should parse");
        assert_eq!(stats.get("totalUsers"), Some(&json!(3)));
    }

    #[test]
    fn array_takes_first_object() {
        let stats = normalize(&json!([1, {"totalRooms": 9}])).expect("array should parse");
        assert_eq!(stats.get("totalRooms"), Some(&json!(9)));
    }

    #[test]
    fn empty_array_is_unparseable() {
        assert!(normalize(&json!([])).is_none());
    }
}
