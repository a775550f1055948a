use crate::normalize::StatsObject;
use crate::types::config::Thresholds;
use crate::types::issue::{Category, Issue, Origin};
use serde::Serialize;
use serde_json::Value;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub total: u64,
    pub online: u64,
    pub away: u64,
    pub busy: u64,
    pub offline: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomCounts {
    pub rooms: u64,
    pub channels: u64,
    pub private_groups: u64,
    pub direct: u64,
    pub messages: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub federation: bool,
    pub ldap: bool,
    pub e2e: bool,
    pub omnichannel: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub version: String,
    pub platform: String,
    pub uptime_seconds: u64,
    pub uptime_days: u64,
    pub uptime_hours: u64,
    pub total_memory_bytes: u64,
    pub free_memory_bytes: u64,
    pub memory_used_mib: u64,
    pub users: UserCounts,
    pub rooms: RoomCounts,
    pub database_bytes: u64,
    pub database_mib: u64,
    pub rooms_per_user: Option<f64>,
    pub features: FeatureFlags,
    pub outdated_version: bool,
}

fn lookup<'a>(stats: &'a StatsObject, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = stats.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

fn number(stats: &StatsObject, paths: &[&str]) -> u64 {
    paths
        .iter()
        .filter_map(|path| lookup(stats, path))
        .find_map(|value| match value {
            Value::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
            Value::String(text) => text.trim().parse::<f64>().ok().map(|v| v.max(0.0) as u64),
            _ => None,
        })
        .unwrap_or(0)
}

fn text(stats: &StatsObject, paths: &[&str]) -> String {
    paths
        .iter()
        .filter_map(|path| lookup(stats, path))
        .find_map(|value| match value {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn flag(stats: &StatsObject, paths: &[&str]) -> bool {
    paths
        .iter()
        .filter_map(|path| lookup(stats, path))
        .find_map(|value| match value {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) => Some(text.eq_ignore_ascii_case("true")),
            _ => None,
        })
        .unwrap_or(false)
}

/// Leading numeric component of a dotted version string.
pub fn major_version(version: &str) -> Option<u64> {
    let digits: String = version
        .trim()
        .trim_start_matches(['v', 'V'])
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

pub fn extract(stats: &StatsObject, thresholds: &Thresholds) -> StatsSummary {
    let version = text(stats, &["version", "info.version"]);
    let uptime_seconds = number(stats, &["process.uptime", "uptime", "os.uptime"]);
    let total_memory_bytes = number(stats, &["os.totalmem", "totalMemory"]);
    let free_memory_bytes = number(stats, &["os.freemem", "freeMemory"]);
    let database_bytes = number(stats, &["dbSize", "database.size"]);
    let users = UserCounts {
        total: number(stats, &["totalUsers"]),
        online: number(stats, &["onlineUsers"]),
        away: number(stats, &["awayUsers"]),
        busy: number(stats, &["busyUsers"]),
        offline: number(stats, &["offlineUsers"]),
    };
    let rooms = RoomCounts {
        rooms: number(stats, &["totalRooms"]),
        channels: number(stats, &["totalChannels"]),
        private_groups: number(stats, &["totalPrivateGroups"]),
        direct: number(stats, &["totalDirect"]),
        messages: number(stats, &["totalMessages"]),
    };
    let rooms_per_user = (users.total > 0).then(|| rooms.rooms as f64 / users.total as f64);
    let outdated_version = major_version(&version)
        .map(|major| major <= thresholds.outdated_major_max)
        .unwrap_or(false);

    StatsSummary {
        platform: text(stats, &["os.platform", "platform"]),
        uptime_days: uptime_seconds / 86_400,
        uptime_hours: (uptime_seconds % 86_400) / 3_600,
        uptime_seconds,
        memory_used_mib: total_memory_bytes.saturating_sub(free_memory_bytes) / MIB,
        total_memory_bytes,
        free_memory_bytes,
        database_mib: database_bytes / MIB,
        database_bytes,
        users,
        rooms,
        rooms_per_user,
        features: FeatureFlags {
            federation: flag(stats, &["federationEnabled", "federation.enabled"]),
            ldap: flag(stats, &["ldapEnabled", "ldap.enabled"]),
            e2e: flag(stats, &["e2eEnabled", "e2e.enabled"]),
            omnichannel: flag(stats, &["omnichannelEnabled", "livechatEnabled"]),
        },
        outdated_version,
        version,
    }
}

pub fn classify(stats: &StatsObject, thresholds: &Thresholds) -> (StatsSummary, Vec<Issue>) {
    let summary = extract(stats, thresholds);
    let mut issues = Vec::new();

    if summary.memory_used_mib > thresholds.memory_mib {
        issues.push(Issue::new(
            Origin::Statistics,
            Category::Performance,
            format!(
                "High memory usage: {} MiB (threshold {} MiB)",
                summary.memory_used_mib, thresholds.memory_mib
            ),
        ));
    }
    if summary.users.online > thresholds.online_users {
        issues.push(Issue::new(
            Origin::Statistics,
            Category::Performance,
            format!(
                "High concurrent load: {} online users (threshold {})",
                summary.users.online, thresholds.online_users
            ),
        ));
    }
    if summary.database_mib > thresholds.database_mib {
        issues.push(Issue::new(
            Origin::Statistics,
            Category::Performance,
            format!(
                "Large database: {} MiB (threshold {} MiB)",
                summary.database_mib, thresholds.database_mib
            ),
        ));
    }
    if let Some(ratio) = summary.rooms_per_user {
        if ratio > thresholds.rooms_per_user {
            issues.push(Issue::new(
                Origin::Statistics,
                Category::Performance,
                format!(
                    "High rooms-per-user ratio: {ratio:.1} (threshold {})",
                    thresholds.rooms_per_user
                ),
            ));
        }
    }
    if summary.outdated_version {
        issues.push(
            Issue::new(
                Origin::Statistics,
                Category::Security,
                format!("Outdated server version {}; upgrade recommended", summary.version),
            )
            .with_key("version"),
        );
    }

    tracing::debug!(
        version = %summary.version,
        memory_mib = summary.memory_used_mib,
        issues = issues.len(),
        "statistics classified"
    );
    (summary, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::issue::Tier;
    use serde_json::json;

    fn stats(value: Value) -> StatsObject {
        value.as_object().cloned().expect("fixture should be an object")
    }

    #[test]
    fn absent_fields_use_documented_defaults() {
        let summary = extract(&stats(json!({})), &Thresholds::default());
        assert_eq!(summary.version, "unknown");
        assert_eq!(summary.platform, "unknown");
        assert_eq!(summary.users.total, 0);
        assert!(!summary.features.e2e);
        assert!(!summary.outdated_version);
        assert_eq!(summary.rooms_per_user, None);
    }

    #[test]
    fn derived_units() {
        let summary = extract(
            &stats(json!({
                "process": {"uptime": 97_200},
                "os": {"totalmem": 3_221_225_472u64, "freemem": 1_073_741_824u64, "platform": "linux"},
                "dbSize": 524_288_000u64
            })),
            &Thresholds::default(),
        );
        assert_eq!(summary.uptime_days, 1);
        assert_eq!(summary.uptime_hours, 3);
        assert_eq!(summary.memory_used_mib, 2048);
        assert_eq!(summary.database_mib, 500);
        assert_eq!(summary.platform, "linux");
    }

    #[test]
    fn zero_users_skips_rooms_per_user_rule() {
        let (summary, issues) = classify(
            &stats(json!({"totalUsers": 0, "totalRooms": 500})),
            &Thresholds::default(),
        );
        assert_eq!(summary.rooms_per_user, None);
        assert!(issues.is_empty());
    }

    #[test]
    fn threshold_rules_fire_as_critical_performance() {
        let (_, issues) = classify(
            &stats(json!({
                "os": {"totalmem": 4_294_967_296u64},
                "onlineUsers": 1001,
                "dbSize": 10_486_808_576u64,
                "totalUsers": 10,
                "totalRooms": 501,
                "version": "6.5.0"
            })),
            &Thresholds::default(),
        );
        assert_eq!(issues.len(), 4);
        assert!(issues
            .iter()
            .all(|issue| issue.category == Category::Performance && issue.tier == Tier::Critical));
    }

    #[test]
    fn old_major_versions_are_security_issues() {
        for (version, outdated) in [
            ("5.4.1", true),
            ("0.9", true),
            ("6.0.0", false),
            ("10.1.0", false),
            ("unknown", false),
        ] {
            let (summary, issues) =
                classify(&stats(json!({ "version": version })), &Thresholds::default());
            assert_eq!(summary.outdated_version, outdated, "version {version}");
            assert_eq!(
                issues.iter().any(|issue| issue.category == Category::Security),
                outdated
            );
        }
    }
}
