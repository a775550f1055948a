//! Content sniffing for payloads whose file name does not say what they are.
//!
//! Rules are evaluated in order against the top-level keys of the decoded
//! tree (or of the first element, for arrays); the first matching rule wins.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Log,
    Settings,
    Statistics,
    Apps,
    FeatureSettings,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Log => "log",
            SourceKind::Settings => "settings",
            SourceKind::Statistics => "statistics",
            SourceKind::Apps => "apps",
            SourceKind::FeatureSettings => "feature_settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentLabel {
    /// One file carrying several sections at once.
    Comprehensive,
    Log,
    FeatureSettings,
    Settings,
    Statistics,
    Apps,
    Unknown,
}

impl ContentLabel {
    /// Source slots a payload with this label fills. A comprehensive dump
    /// is read as log, settings and statistics simultaneously.
    pub fn kinds(self) -> &'static [SourceKind] {
        match self {
            ContentLabel::Comprehensive => &[
                SourceKind::Log,
                SourceKind::Settings,
                SourceKind::Statistics,
            ],
            ContentLabel::Log => &[SourceKind::Log],
            ContentLabel::FeatureSettings => &[SourceKind::FeatureSettings],
            ContentLabel::Settings => &[SourceKind::Settings],
            ContentLabel::Statistics => &[SourceKind::Statistics],
            ContentLabel::Apps => &[SourceKind::Apps],
            ContentLabel::Unknown => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentLabel::Comprehensive => "comprehensive",
            ContentLabel::Log => "log",
            ContentLabel::FeatureSettings => "feature_settings",
            ContentLabel::Settings => "settings",
            ContentLabel::Statistics => "statistics",
            ContentLabel::Apps => "apps",
            ContentLabel::Unknown => "unknown",
        }
    }
}

struct Signature<'a> {
    is_array: bool,
    keys: BTreeSet<&'a str>,
    setting_ids: Vec<&'a str>,
}

impl<'a> Signature<'a> {
    fn of(value: &'a Value) -> Self {
        let (is_array, object) = match value {
            Value::Array(items) => (true, items.iter().find_map(Value::as_object)),
            Value::Object(object) => (false, Some(object)),
            _ => (false, None),
        };
        let keys = object
            .map(|object| object.keys().map(String::as_str).collect())
            .unwrap_or_default();
        let setting_ids = setting_ids(value);
        Self {
            is_array,
            keys,
            setting_ids,
        }
    }

    fn has_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|key| self.keys.contains(key))
    }
}

fn setting_ids(value: &Value) -> Vec<&str> {
    let items = match value {
        Value::Array(items) => Some(items),
        Value::Object(object) => object.get("settings").and_then(Value::as_array),
        _ => None,
    };
    items
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("_id").or_else(|| item.get("id")))
                .filter_map(Value::as_str)
                .collect()
        })
        .unwrap_or_default()
}

const STATS_KEYS: &[&str] = &["totalUsers", "totalMessages", "statistics"];
const LOG_KEYS: &[&str] = &["queue", "logs"];
const APP_KEYS: &[&str] = &["apps", "marketplace"];
const MESSAGE_KEYS: &[&str] = &["msg", "message", "text"];
const FEATURE_PREFIXES: &[&str] = &["Livechat_", "Omnichannel_"];

fn is_comprehensive(sig: &Signature) -> bool {
    !sig.is_array && sig.keys.contains("settings") && sig.has_any(STATS_KEYS)
}

fn is_log_envelope(sig: &Signature) -> bool {
    !sig.is_array && sig.has_any(LOG_KEYS)
}

fn is_app_envelope(sig: &Signature) -> bool {
    sig.has_any(APP_KEYS)
}

fn is_statistics(sig: &Signature) -> bool {
    !sig.is_array && sig.has_any(STATS_KEYS)
}

fn is_feature_settings(sig: &Signature) -> bool {
    !sig.setting_ids.is_empty()
        && sig
            .setting_ids
            .iter()
            .all(|id| FEATURE_PREFIXES.iter().any(|prefix| id.starts_with(prefix)))
}

fn is_settings(sig: &Signature) -> bool {
    sig.keys.contains("settings") || (sig.keys.contains("_id") && sig.keys.contains("value"))
}

fn is_log_record(sig: &Signature) -> bool {
    sig.has_any(MESSAGE_KEYS)
}

fn is_app_list(sig: &Signature) -> bool {
    sig.is_array && sig.keys.contains("name") && sig.keys.contains("version")
}

type Rule = (fn(&Signature) -> bool, ContentLabel);

const RULES: &[Rule] = &[
    (is_comprehensive, ContentLabel::Comprehensive),
    (is_log_envelope, ContentLabel::Log),
    (is_app_envelope, ContentLabel::Apps),
    (is_statistics, ContentLabel::Statistics),
    (is_feature_settings, ContentLabel::FeatureSettings),
    (is_settings, ContentLabel::Settings),
    (is_log_record, ContentLabel::Log),
    (is_app_list, ContentLabel::Apps),
];

pub fn detect(value: &Value) -> ContentLabel {
    let signature = Signature::of(value);
    RULES
        .iter()
        .find(|(predicate, _)| predicate(&signature))
        .map(|(_, label)| *label)
        .unwrap_or(ContentLabel::Unknown)
}
