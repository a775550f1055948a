use serde::Deserialize;
use std::collections::HashSet;

/// On-disk configuration as read from `dumpscope.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DumpscopeConfig {
    pub log_patterns: Option<LogPatternsConfig>,
    pub log_limits: Option<LogLimitsConfig>,
    pub thresholds: Option<ThresholdsConfig>,
    pub rules: Option<RulesConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogPatternsConfig {
    pub error: Option<Vec<String>>,
    pub warning: Option<Vec<String>>,
    pub security: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogLimitsConfig {
    pub error_samples: Option<usize>,
    pub warning_samples: Option<usize>,
    pub security_samples: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    pub memory_mib: Option<u64>,
    pub online_users: Option<u64>,
    pub database_mib: Option<u64>,
    pub rooms_per_user: Option<f64>,
    pub outdated_major_max: Option<u64>,
    pub max_upload_bytes: Option<u64>,
    pub max_message_chars: Option<u64>,
    pub queue_size: Option<u64>,
    pub min_agent_chats: Option<u64>,
    pub outdated_app_major_max: Option<u64>,
    pub outdated_apps_penalty_min: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogPatterns {
    pub error: Vec<String>,
    pub warning: Vec<String>,
    pub security: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

impl Default for LogPatterns {
    fn default() -> Self {
        Self {
            error: owned(&[
                "error",
                "exception",
                "failed",
                "timeout",
                "connection refused",
                "cannot connect",
            ]),
            warning: owned(&["warn", "deprecated", "slow", "retry", "high memory"]),
            security: owned(&[
                "unauthorized",
                "forbidden",
                "permission denied",
                "invalid token",
                "authentication failed",
                "login failed",
                "brute force",
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimits {
    pub error_samples: usize,
    pub warning_samples: usize,
    pub security_samples: usize,
}

impl Default for LogLimits {
    fn default() -> Self {
        Self {
            error_samples: 20,
            warning_samples: 10,
            security_samples: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub memory_mib: u64,
    pub online_users: u64,
    pub database_mib: u64,
    pub rooms_per_user: f64,
    pub outdated_major_max: u64,
    pub max_upload_bytes: u64,
    pub max_message_chars: u64,
    pub queue_size: u64,
    pub min_agent_chats: u64,
    pub outdated_app_major_max: u64,
    pub outdated_apps_penalty_min: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            memory_mib: 2048,
            online_users: 1000,
            database_mib: 10_000,
            rooms_per_user: 50.0,
            outdated_major_max: 5,
            max_upload_bytes: 100 * 1024 * 1024,
            max_message_chars: 10_000,
            queue_size: 100,
            min_agent_chats: 1,
            outdated_app_major_max: 2,
            outdated_apps_penalty_min: 3,
        }
    }
}

/// Resolved engine configuration: file values layered over fixed defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub log_patterns: LogPatterns,
    pub log_limits: LogLimits,
    pub thresholds: Thresholds,
    pub disabled_rules: HashSet<String>,
}

impl EngineConfig {
    pub fn rule_enabled(&self, id: &str) -> bool {
        !self.disabled_rules.contains(id)
    }
}

impl DumpscopeConfig {
    pub fn log_patterns(&self) -> LogPatterns {
        let defaults = LogPatterns::default();
        match &self.log_patterns {
            Some(patterns) => LogPatterns {
                error: patterns.error.clone().unwrap_or(defaults.error),
                warning: patterns.warning.clone().unwrap_or(defaults.warning),
                security: patterns.security.clone().unwrap_or(defaults.security),
            },
            None => defaults,
        }
    }

    pub fn log_limits(&self) -> LogLimits {
        let defaults = LogLimits::default();
        match &self.log_limits {
            Some(limits) => LogLimits {
                error_samples: limits.error_samples.unwrap_or(defaults.error_samples),
                warning_samples: limits.warning_samples.unwrap_or(defaults.warning_samples),
                security_samples: limits
                    .security_samples
                    .unwrap_or(defaults.security_samples),
            },
            None => defaults,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        match &self.thresholds {
            Some(t) => Thresholds {
                memory_mib: t.memory_mib.unwrap_or(defaults.memory_mib),
                online_users: t.online_users.unwrap_or(defaults.online_users),
                database_mib: t.database_mib.unwrap_or(defaults.database_mib),
                rooms_per_user: t.rooms_per_user.unwrap_or(defaults.rooms_per_user),
                outdated_major_max: t.outdated_major_max.unwrap_or(defaults.outdated_major_max),
                max_upload_bytes: t.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
                max_message_chars: t.max_message_chars.unwrap_or(defaults.max_message_chars),
                queue_size: t.queue_size.unwrap_or(defaults.queue_size),
                min_agent_chats: t.min_agent_chats.unwrap_or(defaults.min_agent_chats),
                outdated_app_major_max: t
                    .outdated_app_major_max
                    .unwrap_or(defaults.outdated_app_major_max),
                outdated_apps_penalty_min: t
                    .outdated_apps_penalty_min
                    .unwrap_or(defaults.outdated_apps_penalty_min),
            },
            None => defaults,
        }
    }

    pub fn resolve(&self) -> EngineConfig {
        EngineConfig {
            log_patterns: self.log_patterns(),
            log_limits: self.log_limits(),
            thresholds: self.thresholds(),
            disabled_rules: self
                .rules
                .as_ref()
                .map(|rules| rules.disabled.iter().cloned().collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let cfg: DumpscopeConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.resolve(), EngineConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg: DumpscopeConfig = toml::from_str(
            r#"
[log_patterns]
error = ["panic"]

[thresholds]
memory_mib = 4096

[rules]
disabled = ["E2E_Enable"]
"#,
        )
        .expect("config should parse");

        let engine = cfg.resolve();
        assert_eq!(engine.log_patterns.error, vec!["panic".to_string()]);
        assert_eq!(engine.log_patterns.warning, LogPatterns::default().warning);
        assert_eq!(engine.thresholds.memory_mib, 4096);
        assert_eq!(engine.thresholds.online_users, 1000);
        assert!(!engine.rule_enabled("E2E_Enable"));
        assert!(engine.rule_enabled("Accounts_TwoFactorAuthentication_Enabled"));
    }
}
