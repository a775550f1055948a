pub mod apps;
pub mod feature;
pub mod health;
pub mod log;
pub mod rules;
pub mod settings;
pub mod statistics;

use crate::normalize::DumpBundle;
use crate::types::config::EngineConfig;
use crate::types::report::{Analysis, ReportModel, RunMetadata, SourceStatuses};
use health::HealthSignals;
use sha2::{Digest, Sha256};

/// Run every classifier whose source is present, score the merged issue set
/// and assemble the report.
pub fn analyze(bundle: &DumpBundle, config: &EngineConfig, metadata: RunMetadata) -> ReportModel {
    let analysis = assess(bundle, config);
    let fingerprint = fingerprint(&analysis);
    tracing::info!(
        score = analysis.health.overall,
        issues = analysis.issues.len(),
        "analysis complete"
    );
    ReportModel {
        metadata,
        fingerprint,
        analysis,
    }
}

pub fn assess(bundle: &DumpBundle, config: &EngineConfig) -> Analysis {
    let log = bundle
        .log
        .parsed()
        .map(|records| log::classify(records, &config.log_patterns, &config.log_limits));
    let settings = bundle
        .settings
        .parsed()
        .map(|list| settings::classify(list, config));
    let statistics = bundle
        .statistics
        .parsed()
        .map(|stats| statistics::classify(stats, &config.thresholds));
    let apps = bundle
        .apps
        .parsed()
        .map(|list| apps::classify(list, &config.thresholds));
    let feature = bundle
        .feature_settings
        .parsed()
        .map(|list| feature::classify(list, config));

    let mut issues = Vec::new();
    let log = log.map(|(summary, found)| {
        issues.extend(found);
        summary
    });
    let settings = settings.map(|(summary, found)| {
        issues.extend(found);
        summary
    });
    let statistics = statistics.map(|(summary, found)| {
        issues.extend(found);
        summary
    });
    let apps = apps.map(|(summary, found)| {
        issues.extend(found);
        summary
    });
    let feature = feature.map(|(summary, found)| {
        issues.extend(found);
        summary
    });

    let signals = HealthSignals {
        outdated_version: statistics
            .as_ref()
            .map(|summary| summary.outdated_version)
            .unwrap_or(false),
        outdated_apps: apps
            .as_ref()
            .map(|summary| summary.outdated.len())
            .unwrap_or(0),
        outdated_apps_penalty_min: config.thresholds.outdated_apps_penalty_min,
    };
    let health = health::score(&issues, &signals);

    Analysis {
        sources: SourceStatuses {
            log: bundle.log.status(),
            settings: bundle.settings.status(),
            statistics: bundle.statistics.status(),
            apps: bundle.apps.status(),
            feature_settings: bundle.feature_settings.status(),
        },
        health,
        log,
        settings,
        statistics,
        apps,
        feature_settings: feature,
        issues,
    }
}

/// Hex SHA-256 of the serialised analysis, or empty when it cannot be
/// serialised. An empty value never matches a real digest.
fn fingerprint(analysis: &Analysis) -> String {
    let bytes = match serde_json::to_vec(analysis) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "analysis could not be serialised; fingerprint omitted");
            return String::new();
        }
    };
    Sha256::digest(&bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
