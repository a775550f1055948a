use crate::analyze::apps::AppsSummary;
use crate::analyze::feature::FeatureSummary;
use crate::analyze::log::LogSummary;
use crate::analyze::settings::SettingsSummary;
use crate::analyze::statistics::StatsSummary;
use crate::normalize::SourceStatus;
use crate::scan::LocatedFile;
use crate::types::issue::{Issue, Tier};
use crate::types::scoring::HealthScore;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub source_path: String,
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub files: Vec<LocatedFile>,
}

impl RunMetadata {
    pub fn now(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<LocatedFile>) -> Self {
        self.files = files;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceStatuses {
    pub log: SourceStatus,
    pub settings: SourceStatus,
    pub statistics: SourceStatus,
    pub apps: SourceStatus,
    pub feature_settings: SourceStatus,
}

impl SourceStatuses {
    pub fn entries(&self) -> [(&'static str, SourceStatus); 5] {
        [
            ("log", self.log),
            ("settings", self.settings),
            ("statistics", self.statistics),
            ("apps", self.apps),
            ("feature_settings", self.feature_settings),
        ]
    }
}

/// Everything derived from the dump. Contains no time-dependent data, so
/// identical input always serialises identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub sources: SourceStatuses,
    pub health: HealthScore,
    pub log: Option<LogSummary>,
    pub settings: Option<SettingsSummary>,
    pub statistics: Option<StatsSummary>,
    pub apps: Option<AppsSummary>,
    pub feature_settings: Option<FeatureSummary>,
    pub issues: Vec<Issue>,
}

/// The renderer-facing report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub metadata: RunMetadata,
    /// SHA-256 of the serialised `analysis`.
    pub fingerprint: String,
    pub analysis: Analysis,
}

impl ReportModel {
    pub fn issues_in(&self, tier: Tier) -> impl Iterator<Item = &Issue> {
        self.analysis
            .issues
            .iter()
            .filter(move |issue| issue.tier == tier)
    }

    pub fn has_critical(&self) -> bool {
        self.analysis.health.tier_counts.critical > 0
    }
}
