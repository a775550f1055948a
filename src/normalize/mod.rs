//! Shape reconciliation for decoded dump payloads.
//!
//! Every source kind can arrive wrapped in an envelope object, as a bare
//! array, or as a single object. The functions here fold those variants into
//! one canonical shape per kind. Nothing in this module evaluates business
//! rules and nothing here fails: an unrecognised shape becomes
//! [`Source::Unparseable`].

pub mod apps;
pub mod detect;
pub mod log;
pub mod settings;
pub mod stats;

use serde::Serialize;
use serde_json::{Map, Value};

pub use apps::AppDescriptor;
pub use log::{LogRecord, Severity};
pub use settings::Setting;

pub type StatsObject = Map<String, Value>;

/// Normalisation outcome for one source slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Source<T> {
    Absent,
    Unparseable,
    Parsed(T),
}

impl<T> Source<T> {
    pub fn status(&self) -> SourceStatus {
        match self {
            Source::Absent => SourceStatus::NotAnalyzed,
            Source::Unparseable => SourceStatus::Unparseable,
            Source::Parsed(_) => SourceStatus::Analyzed,
        }
    }

    pub fn parsed(&self) -> Option<&T> {
        match self {
            Source::Parsed(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Source<T> {
    fn default() -> Self {
        Source::Absent
    }
}

/// What the report says about a source slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Analyzed,
    Unparseable,
    NotAnalyzed,
}

impl SourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceStatus::Analyzed => "analyzed",
            SourceStatus::Unparseable => "present but unparseable",
            SourceStatus::NotAnalyzed => "not analyzed",
        }
    }
}

/// Raw decoded payloads, one optional tree per source kind.
#[derive(Debug, Clone, Default)]
pub struct RawBundle {
    pub log: Option<Value>,
    pub settings: Option<Value>,
    pub statistics: Option<Value>,
    pub apps: Option<Value>,
    pub feature_settings: Option<Value>,
}

/// The five canonical sources for one analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DumpBundle {
    pub log: Source<Vec<LogRecord>>,
    pub settings: Source<Vec<Setting>>,
    pub statistics: Source<StatsObject>,
    pub apps: Source<Vec<AppDescriptor>>,
    pub feature_settings: Source<Vec<Setting>>,
}

impl DumpBundle {
    pub fn from_raw(raw: &RawBundle) -> Self {
        let bundle = Self {
            log: normalize_with(raw.log.as_ref(), log::normalize),
            settings: normalize_with(raw.settings.as_ref(), settings::normalize),
            statistics: normalize_with(raw.statistics.as_ref(), stats::normalize),
            apps: normalize_with(raw.apps.as_ref(), apps::normalize),
            feature_settings: normalize_with(raw.feature_settings.as_ref(), settings::normalize),
        };
        for (name, status) in [
            ("log", bundle.log.status()),
            ("settings", bundle.settings.status()),
            ("statistics", bundle.statistics.status()),
            ("apps", bundle.apps.status()),
            ("feature settings", bundle.feature_settings.status()),
        ] {
            if status == SourceStatus::Unparseable {
                tracing::warn!(source = name, "source present but unparseable");
            }
        }
        bundle
    }
}

fn normalize_with<T>(value: Option<&Value>, f: fn(&Value) -> Option<T>) -> Source<T> {
    match value {
        None => Source::Absent,
        Some(value) => match f(value) {
            Some(parsed) => Source::Parsed(parsed),
            None => Source::Unparseable,
        },
    }
}

/// Render a scalar JSON value the way settings exports print it.
pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// First non-empty string among `keys` on an object.
pub(crate) fn first_string(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .find(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sources_stay_absent() {
        let bundle = DumpBundle::from_raw(&RawBundle::default());
        assert_eq!(bundle.log.status(), SourceStatus::NotAnalyzed);
        assert_eq!(bundle.apps.status(), SourceStatus::NotAnalyzed);
    }

    #[test]
    fn scalar_payloads_are_marked_unparseable() {
        let raw = RawBundle {
            log: Some(json!(42)),
            settings: Some(json!("settings")),
            statistics: Some(json!(true)),
            apps: Some(json!(null)),
            feature_settings: Some(json!(1.5)),
        };
        let bundle = DumpBundle::from_raw(&raw);
        assert_eq!(bundle.log, Source::Unparseable);
        assert_eq!(bundle.settings, Source::Unparseable);
        assert_eq!(bundle.statistics, Source::Unparseable);
        assert_eq!(bundle.apps, Source::Unparseable);
        assert_eq!(bundle.feature_settings, Source::Unparseable);
    }

    #[test]
    fn scalar_to_string_matches_export_formatting() {
        assert_eq!(scalar_to_string(&json!(false)), "false");
        assert_eq!(scalar_to_string(&json!(104857600)), "104857600");
        assert_eq!(scalar_to_string(&json!("Public")), "Public");
        assert_eq!(scalar_to_string(&json!(null)), "");
    }
}
