//! Rule tables mapping known setting ids to judgment functions.

use crate::normalize::Setting;
use crate::types::config::{EngineConfig, Thresholds};
use crate::types::issue::{Category, Issue, Origin};

#[derive(Debug, Clone, PartialEq)]
pub enum Judgment {
    Finding(Category, String),
    Good(String),
}

pub struct SettingRule {
    pub id: &'static str,
    pub judge: fn(&str, &Thresholds) -> Option<Judgment>,
}

pub(super) fn is_true(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn is_false(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

fn number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

fn finding(category: Category, message: impl Into<String>) -> Option<Judgment> {
    Some(Judgment::Finding(category, message.into()))
}

fn good(message: impl Into<String>) -> Option<Judgment> {
    Some(Judgment::Good(message.into()))
}

pub const SETTINGS_RULES: &[SettingRule] = &[
    SettingRule {
        id: "Accounts_TwoFactorAuthentication_Enabled",
        judge: |value, _| {
            if is_false(value) {
                finding(Category::Security, "Two-factor authentication is disabled")
            } else if is_true(value) {
                good("Two-factor authentication is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "Accounts_RegistrationForm",
        judge: |value, _| match value.trim().to_lowercase().as_str() {
            "public" => finding(Category::Security, "Public self-registration is enabled"),
            "disabled" | "secret url" => good("Self-registration is restricted"),
            _ => None,
        },
    },
    SettingRule {
        id: "Accounts_AllowAnonymousRead",
        judge: |value, _| {
            if is_true(value) {
                finding(Category::Configuration, "Anonymous read access is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "Accounts_AllowAnonymousWrite",
        judge: |value, _| {
            if is_true(value) {
                finding(Category::Security, "Anonymous write access is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "API_Enable_Rate_Limiter",
        judge: |value, _| {
            if is_false(value) {
                finding(Category::Security, "API rate limiter is disabled")
            } else if is_true(value) {
                good("API rate limiter is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "API_Enable_Rate_Limiter_Dev",
        judge: |value, _| {
            if is_true(value) {
                finding(
                    Category::Configuration,
                    "Development-mode rate limiter is enabled",
                )
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "FileUpload_MaxFileSize",
        judge: |value, thresholds| {
            let size = number(value)?;
            // Negative sizes mean "unlimited".
            if size < 0.0 || size > thresholds.max_upload_bytes as f64 {
                finding(
                    Category::Performance,
                    format!(
                        "Maximum upload size {} exceeds {} MiB",
                        value.trim(),
                        thresholds.max_upload_bytes / (1024 * 1024)
                    ),
                )
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "Message_MaxAllowedSize",
        judge: |value, thresholds| {
            let size = number(value)?;
            if size > thresholds.max_message_chars as f64 {
                finding(
                    Category::Performance,
                    format!(
                        "Maximum message size {} exceeds {} characters",
                        value.trim(),
                        thresholds.max_message_chars
                    ),
                )
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "RetentionPolicy_Enabled",
        judge: |value, _| {
            if is_false(value) {
                finding(Category::Configuration, "Message retention policy is disabled")
            } else if is_true(value) {
                good("Message retention policy is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "E2E_Enable",
        judge: |value, _| {
            if is_false(value) {
                finding(Category::Security, "End-to-end encryption is disabled")
            } else if is_true(value) {
                good("End-to-end encryption is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "Log_Level",
        judge: |value, _| {
            let level = value.trim().to_lowercase();
            if level == "2" || level.contains("debug") {
                finding(Category::Performance, "Debug-level logging is enabled")
            } else {
                None
            }
        },
    },
];

const ROUTING_METHODS: &[&str] = &[
    "auto_selection",
    "manual_selection",
    "external",
    "load_balancing",
    "load_rotation",
];

pub const FEATURE_RULES: &[SettingRule] = &[
    SettingRule {
        id: "Livechat_enabled",
        judge: |value, _| {
            if is_false(value) {
                finding(Category::Configuration, "Omnichannel service is disabled")
            } else if is_true(value) {
                good("Omnichannel service is enabled")
            } else {
                None
            }
        },
    },
    SettingRule {
        id: "Livechat_Routing_Method",
        judge: |value, _| {
            let method = value.trim();
            if method.is_empty() {
                finding(Category::Configuration, "No omnichannel routing method is set")
            } else if ROUTING_METHODS.contains(&method.to_lowercase().as_str()) {
                good(format!("Routing method is {method}"))
            } else {
                finding(
                    Category::Configuration,
                    format!("Unrecognised omnichannel routing method {method}"),
                )
            }
        },
    },
    SettingRule {
        id: "Livechat_maximum_chats_per_agent",
        judge: |value, thresholds| {
            let chats = number(value)?;
            if chats < thresholds.min_agent_chats as f64 {
                finding(
                    Category::Configuration,
                    format!(
                        "Maximum chats per agent is {}, expected at least {}",
                        value.trim(),
                        thresholds.min_agent_chats
                    ),
                )
            } else {
                good(format!("Maximum chats per agent is {}", value.trim()))
            }
        },
    },
    SettingRule {
        id: "Livechat_max_queue_size",
        judge: |value, thresholds| {
            let size = number(value)?;
            if size > thresholds.queue_size as f64 {
                finding(
                    Category::Configuration,
                    format!(
                        "Omnichannel queue size {} exceeds {}",
                        value.trim(),
                        thresholds.queue_size
                    ),
                )
            } else {
                None
            }
        },
    },
];

/// Result of running one rule table over a settings list.
#[derive(Debug, Clone, Default)]
pub struct RuleOutcome {
    pub issues: Vec<Issue>,
    pub notes: Vec<String>,
}

/// Evaluate `table` against `settings`. Ids without a rule, and rules
/// disabled in `config`, are skipped.
pub fn evaluate(
    table: &[SettingRule],
    settings: &[Setting],
    origin: Origin,
    config: &EngineConfig,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    for setting in settings {
        let Some(rule) = table.iter().find(|rule| rule.id == setting.id) else {
            continue;
        };
        if !config.rule_enabled(rule.id) {
            continue;
        }
        match (rule.judge)(&setting.value, &config.thresholds) {
            Some(Judgment::Finding(category, message)) => outcome
                .issues
                .push(Issue::new(origin, category, message).with_key(rule.id)),
            Some(Judgment::Good(note)) => outcome.notes.push(note),
            None => {}
        }
    }
    outcome
}
