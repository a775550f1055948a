use super::statistics::major_version;
use crate::normalize::AppDescriptor;
use crate::types::config::Thresholds;
use crate::types::issue::{Category, Issue, Origin};
use serde::Serialize;

const ENABLED: &[&str] = &["enabled", "true", "initialized"];
const DISABLED: &[&str] = &["disabled", "false", "invalid"];

const SECURITY_KEYWORDS: &[&str] = &[
    "security", "auth", "oauth", "ldap", "saml", "sso", "encrypt", "password", "2fa",
];
const PERFORMANCE_KEYWORDS: &[&str] = &[
    "performance", "cache", "monitor", "metrics", "optimiz", "speed",
];
const INTEGRATION_KEYWORDS: &[&str] = &[
    "integration", "webhook", "api", "bot", "connector", "bridge", "sync",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppsSummary {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub security_related: usize,
    pub performance_related: usize,
    pub integration_related: usize,
    pub outdated: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Enabled,
    Disabled,
    Other,
}

fn app_state(status: &str) -> AppState {
    let lowered = status.to_lowercase();
    // Disabled first: statuses such as `invalid_settings_disabled` carry both words.
    if DISABLED.iter().any(|word| lowered.contains(word)) {
        AppState::Disabled
    } else if ENABLED.iter().any(|word| lowered.contains(word)) {
        AppState::Enabled
    } else {
        AppState::Other
    }
}

fn mentions(app: &AppDescriptor, keywords: &[&str]) -> bool {
    let haystack = format!("{} {}", app.name, app.description).to_lowercase();
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Leading version component at or below the configured ceiling. Not
/// semver-aware: `2.9.9` is outdated, `3.0.0-alpha` is not.
fn is_outdated(app: &AppDescriptor, thresholds: &Thresholds) -> bool {
    major_version(&app.version)
        .map(|major| major <= thresholds.outdated_app_major_max)
        .unwrap_or(false)
}

pub fn classify(apps: &[AppDescriptor], thresholds: &Thresholds) -> (AppsSummary, Vec<Issue>) {
    let mut summary = AppsSummary {
        total: apps.len(),
        ..AppsSummary::default()
    };
    let mut issues = Vec::new();

    for app in apps {
        match app_state(&app.status) {
            AppState::Enabled => summary.enabled += 1,
            AppState::Disabled => summary.disabled += 1,
            AppState::Other => {}
        }
        if mentions(app, SECURITY_KEYWORDS) {
            summary.security_related += 1;
        }
        if mentions(app, PERFORMANCE_KEYWORDS) {
            summary.performance_related += 1;
        }
        if mentions(app, INTEGRATION_KEYWORDS) {
            summary.integration_related += 1;
        }
        if is_outdated(app, thresholds) {
            summary.outdated.push(app.name.clone());
            issues.push(
                Issue::new(
                    Origin::Apps,
                    Category::Configuration,
                    format!("App {} may be outdated (version {})", app.name, app.version),
                )
                .with_key(app.name.clone()),
            );
        }
    }

    tracing::debug!(
        total = summary.total,
        enabled = summary.enabled,
        outdated = summary.outdated.len(),
        "apps classified"
    );
    (summary, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::apps::normalize;
    use crate::types::issue::Tier;
    use serde_json::json;

    fn app(name: &str, version: &str, status: &str, description: &str) -> AppDescriptor {
        AppDescriptor {
            name: name.to_string(),
            version: version.to_string(),
            status: status.to_string(),
            author: "unknown".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn status_synonyms() {
        assert_eq!(app_state("manually_enabled"), AppState::Enabled);
        assert_eq!(app_state("initialized"), AppState::Enabled);
        assert_eq!(app_state("true"), AppState::Enabled);
        assert_eq!(app_state("invalid_settings_disabled"), AppState::Disabled);
        assert_eq!(app_state("false"), AppState::Disabled);
        assert_eq!(app_state("unknown"), AppState::Other);
    }

    #[test]
    fn outdated_count_is_container_shape_invariant() {
        let items = json!([
            {"name": "Jira", "version": "1.2.0", "status": "enabled"},
            {"name": "Poll", "version": "3.1.0", "status": "enabled"}
        ]);
        let bare = normalize(&items).expect("bare array should parse");
        let wrapped = normalize(&json!({ "apps": items })).expect("envelope should parse");

        let (bare_summary, bare_issues) = classify(&bare, &Thresholds::default());
        let (wrapped_summary, _) = classify(&wrapped, &Thresholds::default());
        assert_eq!(bare_summary.outdated, vec!["Jira".to_string()]);
        assert_eq!(bare_summary, wrapped_summary);
        assert_eq!(bare_issues.len(), 1);
        assert_eq!(bare_issues[0].tier, Tier::Warning);
    }

    #[test]
    fn keyword_sets_are_not_exclusive() {
        let apps = vec![
            app("OAuth Bridge", "4.0.0", "enabled", "SSO connector with cache"),
            app("Giphy", "5.0.0", "disabled", "Fun"),
        ];
        let (summary, issues) = classify(&apps, &Thresholds::default());
        assert_eq!(summary.security_related, 1);
        assert_eq!(summary.performance_related, 1);
        assert_eq!(summary.integration_related, 1);
        assert_eq!(summary.enabled, 1);
        assert_eq!(summary.disabled, 1);
        assert!(issues.is_empty());
    }

    #[test]
    fn unparseable_versions_are_not_outdated() {
        let (summary, _) = classify(
            &[app("Mystery", "unknown", "enabled", ""), app("Zero", "0.1", "enabled", "")],
            &Thresholds::default(),
        );
        assert_eq!(summary.outdated, vec!["Zero".to_string()]);
    }
}
