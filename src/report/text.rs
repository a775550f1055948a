use crate::types::issue::Tier;
use crate::types::report::ReportModel;

pub fn to_text(report: &ReportModel) -> String {
    let analysis = &report.analysis;
    let health = &analysis.health;
    let mut output = String::new();

    output.push_str("Chat Server Health Report\n");
    output.push_str("=========================\n\n");
    output.push_str(&format!("Source:    {}\n", report.metadata.source_path));
    output.push_str(&format!(
        "Generated: {}\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Health score: {}/100\n", health.overall));
    output.push_str(&format!(
        "Issues: {} total ({} critical, {} error, {} warning)\n\n",
        health.tier_counts.total(),
        health.tier_counts.critical,
        health.tier_counts.error,
        health.tier_counts.warning
    ));

    output.push_str("Sources\n-------\n");
    for (name, status) in analysis.sources.entries() {
        output.push_str(&format!("- {}: {}\n", name, status.as_str()));
    }
    for file in &report.metadata.files {
        output.push_str(&format!(
            "  {} <- {}{}\n",
            file.kind.as_str(),
            file.path.display(),
            if file.sniffed { " (detected from content)" } else { "" }
        ));
    }
    output.push('\n');

    if let Some(log) = &analysis.log {
        output.push_str("Log\n---\n");
        output.push_str(&format!(
            "- records: {} (info {}, warn {}, error {})\n- pattern matches: error {}, warning {}, security {} (total {})\n\n",
            log.total,
            log.info_count,
            log.warn_count,
            log.error_count,
            log.error_patterns.matched,
            log.warning_patterns.matched,
            log.security_patterns.matched,
            log.issues_found
        ));
    }

    if let Some(settings) = &analysis.settings {
        output.push_str("Settings\n--------\n");
        output.push_str(&format!(
            "- total settings: {}\n- security-related settings: {} (security issues found: {})\n- performance-related settings: {} (performance issues found: {})\n- configuration warnings: {}\n",
            settings.total,
            settings.security_related,
            settings.security_issues,
            settings.performance_related,
            settings.performance_issues,
            settings.configuration_issues
        ));
        for note in &settings.good_configuration {
            output.push_str(&format!("- ok: {note}\n"));
        }
        output.push('\n');
    }

    if let Some(stats) = &analysis.statistics {
        output.push_str("Statistics\n----------\n");
        output.push_str(&format!(
            "- version: {} on {}\n- uptime: {}d {}h\n- memory used: {} MiB\n- users: {} total, {} online\n- rooms: {}, messages: {}\n- database: {} MiB\n",
            stats.version,
            stats.platform,
            stats.uptime_days,
            stats.uptime_hours,
            stats.memory_used_mib,
            stats.users.total,
            stats.users.online,
            stats.rooms.rooms,
            stats.rooms.messages,
            stats.database_mib
        ));
        if let Some(ratio) = stats.rooms_per_user {
            output.push_str(&format!("- rooms per user: {ratio:.1}\n"));
        }
        output.push('\n');
    }

    if let Some(apps) = &analysis.apps {
        output.push_str("Apps\n----\n");
        output.push_str(&format!(
            "- installed: {} (enabled {}, disabled {})\n- security {}, performance {}, integration {}\n- potentially outdated: {}\n\n",
            apps.total,
            apps.enabled,
            apps.disabled,
            apps.security_related,
            apps.performance_related,
            apps.integration_related,
            if apps.outdated.is_empty() {
                "none".to_string()
            } else {
                apps.outdated.join(", ")
            }
        ));
    }

    if let Some(feature) = &analysis.feature_settings {
        output.push_str("Omnichannel\n-----------\n");
        output.push_str(&format!(
            "- settings: {}\n- service enabled: {}\n- routing method: {}\n- configuration issues: {}\n\n",
            feature.total,
            feature
                .service_enabled
                .map(|enabled| enabled.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            feature.routing_method.as_deref().unwrap_or("unknown"),
            feature.configuration_issues
        ));
    }

    output.push_str("Issues\n------\n");
    if analysis.issues.is_empty() {
        output.push_str("- none\n");
    }
    for tier in [Tier::Critical, Tier::Error, Tier::Warning] {
        for issue in report.issues_in(tier) {
            output.push_str(&format!(
                "- [{}] {} ({}): {}",
                tier, issue.category, issue.origin, issue.message
            ));
            if let Some(key) = &issue.source_key {
                output.push_str(&format!(" [{key}]"));
            }
            output.push('\n');
        }
    }
    output.push('\n');

    output.push_str("Recommendations\n---------------\n");
    for (index, recommendation) in health.recommendations.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, recommendation));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn text_report_contains_sections() {
        let rendered = to_text(&sample_report());
        assert!(rendered.contains("Health score: 30/100"));
        assert!(rendered.contains("- apps: not analyzed"));
        assert!(rendered.contains("- feature_settings: present but unparseable"));
        assert!(rendered.contains("security-related settings"));
        assert!(rendered.contains("[critical] security (settings)"));
        assert!(rendered.contains("1. Address security issues immediately"));
    }

    #[test]
    fn critical_issues_are_listed_before_errors() {
        let rendered = to_text(&sample_report());
        let critical = rendered.find("[critical]").expect("critical issue listed");
        let error = rendered.find("[error]").expect("error issue listed");
        assert!(critical < error);
    }
}
