use super::rules::{self, FEATURE_RULES};
use crate::normalize::Setting;
use crate::types::config::EngineConfig;
use crate::types::issue::{Issue, Origin};
use serde::Serialize;

/// Omnichannel module settings summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub total: usize,
    pub service_enabled: Option<bool>,
    pub routing_method: Option<String>,
    pub configuration_issues: usize,
    pub good_configuration: Vec<String>,
}

fn value_of<'a>(settings: &'a [Setting], id: &str) -> Option<&'a str> {
    settings
        .iter()
        .find(|setting| setting.id == id)
        .map(|setting| setting.value.as_str())
}

pub fn classify(settings: &[Setting], config: &EngineConfig) -> (FeatureSummary, Vec<Issue>) {
    let outcome = rules::evaluate(FEATURE_RULES, settings, Origin::FeatureModule, config);
    let summary = FeatureSummary {
        total: settings.len(),
        service_enabled: value_of(settings, "Livechat_enabled").map(rules::is_true),
        routing_method: value_of(settings, "Livechat_Routing_Method")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        configuration_issues: outcome.issues.len(),
        good_configuration: outcome.notes,
    };
    tracing::debug!(
        total = summary.total,
        issues = summary.configuration_issues,
        "feature module classified"
    );
    (summary, outcome.issues)
}
