use super::rules::{self, SETTINGS_RULES};
use crate::normalize::Setting;
use crate::types::config::EngineConfig;
use crate::types::issue::{Category, Issue, Origin};
use serde::Serialize;

const SECURITY_KEYWORDS: &[&str] = &[
    "password",
    "auth",
    "token",
    "secret",
    "ldap",
    "saml",
    "oauth",
    "security",
    "encryption",
    "ssl",
    "tls",
];

const PERFORMANCE_KEYWORDS: &[&str] = &[
    "cache",
    "limit",
    "timeout",
    "max",
    "pool",
    "buffer",
    "memory",
    "cpu",
    "performance",
    "rate",
    "throttle",
];

/// Two independent measurements over the same settings list.
///
/// `security_related` / `performance_related` count ids that merely look
/// relevant by name; the `*_issues` fields count what the rule table
/// actually flagged. The two are reported side by side and never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsSummary {
    pub total: usize,
    pub security_related: usize,
    pub performance_related: usize,
    pub security_issues: usize,
    pub performance_issues: usize,
    pub configuration_issues: usize,
    pub good_configuration: Vec<String>,
}

fn id_matches(id: &str, keywords: &[&str]) -> bool {
    let lowered = id.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

pub fn classify(settings: &[Setting], config: &EngineConfig) -> (SettingsSummary, Vec<Issue>) {
    let outcome = rules::evaluate(SETTINGS_RULES, settings, Origin::Settings, config);
    let count = |category: Category| {
        outcome
            .issues
            .iter()
            .filter(|issue| issue.category == category)
            .count()
    };

    let summary = SettingsSummary {
        total: settings.len(),
        security_related: settings
            .iter()
            .filter(|setting| id_matches(&setting.id, SECURITY_KEYWORDS))
            .count(),
        performance_related: settings
            .iter()
            .filter(|setting| id_matches(&setting.id, PERFORMANCE_KEYWORDS))
            .count(),
        security_issues: count(Category::Security),
        performance_issues: count(Category::Performance),
        configuration_issues: count(Category::Configuration),
        good_configuration: outcome.notes.clone(),
    };

    tracing::debug!(
        total = summary.total,
        security_issues = summary.security_issues,
        security_related = summary.security_related,
        "settings classified"
    );
    (summary, outcome.issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::issue::Tier;

    fn setting(id: &str, value: &str) -> Setting {
        Setting {
            id: id.to_string(),
            value: value.to_string(),
            kind: "string".to_string(),
        }
    }

    #[test]
    fn keyword_overview_is_independent_of_rule_table() {
        let settings = vec![
            setting("LDAP_Enable", "true"),
            setting("SAML_Custom_Default_issuer", "x"),
            setting("Custom_Password_Policy", "strict"),
        ];
        let (summary, issues) = classify(&settings, &EngineConfig::default());
        assert_eq!(summary.security_related, 3);
        assert_eq!(summary.security_issues, 0);
        assert!(issues.is_empty());
    }

    #[test]
    fn two_factor_disabled_is_a_single_security_issue() {
        let settings = vec![
            setting("Accounts_TwoFactorAuthentication_Enabled", "false"),
            setting("Site_Name", "chat"),
        ];
        let (summary, issues) = classify(&settings, &EngineConfig::default());
        assert_eq!(summary.security_issues, 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, Category::Security);
        assert_eq!(issues[0].tier, Tier::Critical);
        assert_eq!(
            issues[0].source_key.as_deref(),
            Some("Accounts_TwoFactorAuthentication_Enabled")
        );
    }

    #[test]
    fn full_rule_table_sweep() {
        let settings = vec![
            setting("Accounts_RegistrationForm", "Public"),
            setting("Accounts_AllowAnonymousRead", "true"),
            setting("Accounts_AllowAnonymousWrite", "true"),
            setting("API_Enable_Rate_Limiter", "false"),
            setting("API_Enable_Rate_Limiter_Dev", "true"),
            setting("FileUpload_MaxFileSize", "209715200"),
            setting("Message_MaxAllowedSize", "20000"),
            setting("RetentionPolicy_Enabled", "false"),
            setting("E2E_Enable", "false"),
            setting("Log_Level", "2"),
        ];
        let (summary, issues) = classify(&settings, &EngineConfig::default());
        assert_eq!(summary.security_issues, 4);
        assert_eq!(summary.performance_issues, 3);
        assert_eq!(summary.configuration_issues, 3);
        assert_eq!(issues.len(), 10);
        assert!(issues
            .iter()
            .filter(|issue| issue.category == Category::Performance)
            .all(|issue| issue.tier == Tier::Error));
        assert!(issues
            .iter()
            .filter(|issue| issue.category == Category::Configuration)
            .all(|issue| issue.tier == Tier::Warning));
    }

    #[test]
    fn good_configuration_produces_notes_not_issues() {
        let settings = vec![
            setting("E2E_Enable", "true"),
            setting("API_Enable_Rate_Limiter", "true"),
        ];
        let (summary, issues) = classify(&settings, &EngineConfig::default());
        assert!(issues.is_empty());
        assert_eq!(summary.good_configuration.len(), 2);
    }

    #[test]
    fn performance_keywords_match_case_insensitively() {
        let settings = vec![setting("Cache_TTL", "60"), setting("DB_POOL_SIZE", "10")];
        let (summary, _) = classify(&settings, &EngineConfig::default());
        assert_eq!(summary.performance_related, 2);
    }
}
