//! Aggregates every classifier's issues into one 0-100 health score and a
//! prioritised recommendation list. Pure function of its inputs.

use crate::types::issue::{Category, Issue, Origin, Tier};
use crate::types::scoring::{HealthScore, TierCounts};

pub const CRITICAL_WEIGHT: i64 = 20;
pub const ERROR_WEIGHT: i64 = 10;
pub const WARNING_WEIGHT: i64 = 5;
pub const SECURITY_PENALTY: i64 = 15;
pub const OUTDATED_APPS_PENALTY: i64 = 10;

pub const REC_SECURITY: &str = "Address security issues immediately";
pub const REC_UPGRADE: &str = "Plan a version upgrade to a supported release";
pub const REC_PERFORMANCE: &str = "Optimize performance: review memory, load and database growth";
pub const REC_FEATURE: &str = "Fix omnichannel module configuration";
pub const REC_APPS: &str = "Update outdated apps";
pub const REC_HEALTHY: &str = "System appears healthy; no urgent action required";
pub const REC_MONITORING: &str = "Implement regular monitoring and maintenance procedures";

/// Facts the scorer needs beyond the issue list itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthSignals {
    pub outdated_version: bool,
    pub outdated_apps: usize,
    /// More outdated apps than this triggers the extra penalty.
    pub outdated_apps_penalty_min: usize,
}

pub fn tier_counts(issues: &[Issue]) -> TierCounts {
    issues
        .iter()
        .fold(TierCounts::default(), |mut counts, issue| {
            match issue.tier {
                Tier::Critical => counts.critical += 1,
                Tier::Error => counts.error += 1,
                Tier::Warning => counts.warning += 1,
            }
            counts
        })
}

pub fn score(issues: &[Issue], signals: &HealthSignals) -> HealthScore {
    let counts = tier_counts(issues);
    let has_security = issues
        .iter()
        .any(|issue| issue.category == Category::Security);

    let mut overall: i64 = 100
        - CRITICAL_WEIGHT * counts.critical as i64
        - ERROR_WEIGHT * counts.error as i64
        - WARNING_WEIGHT * counts.warning as i64;
    if has_security {
        overall -= SECURITY_PENALTY;
    }
    if signals.outdated_apps > signals.outdated_apps_penalty_min {
        overall -= OUTDATED_APPS_PENALTY;
    }
    let overall = overall.clamp(0, 100) as u8;

    HealthScore {
        overall,
        tier_counts: counts,
        recommendations: recommendations(issues, signals, has_security),
    }
}

fn recommendations(issues: &[Issue], signals: &HealthSignals, has_security: bool) -> Vec<String> {
    let any = |origin: Origin, category: Category| {
        issues
            .iter()
            .any(|issue| issue.origin == origin && issue.category == category)
    };

    let table = [
        (has_security, REC_SECURITY),
        (signals.outdated_version, REC_UPGRADE),
        (any(Origin::Statistics, Category::Performance), REC_PERFORMANCE),
        (any(Origin::FeatureModule, Category::Configuration), REC_FEATURE),
        (signals.outdated_apps > 0, REC_APPS),
    ];

    let mut out: Vec<String> = table
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| text.to_string())
        .collect();
    if out.is_empty() {
        out.push(REC_HEALTHY.to_string());
    }
    out.push(REC_MONITORING.to_string());
    out
}
