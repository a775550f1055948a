use crate::normalize::{LogRecord, Severity};
use crate::types::config::{LogLimits, LogPatterns};
use crate::types::issue::{Category, Issue, Origin};
use serde::Serialize;

/// Matches and bounded samples for one keyword set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternBucket {
    pub matched: usize,
    pub samples: Vec<String>,
}

impl PatternBucket {
    fn record(&mut self, message: &str, limit: usize) {
        self.matched += 1;
        if self.samples.len() < limit {
            self.samples.push(message.to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub total: usize,
    pub info_count: usize,
    pub warn_count: usize,
    pub error_count: usize,
    pub error_patterns: PatternBucket,
    pub warning_patterns: PatternBucket,
    pub security_patterns: PatternBucket,
    /// Sum of the three bucket match counts. A message that hits several
    /// buckets is counted once per bucket, so this can exceed `total`.
    pub issues_found: usize,
}

fn matches_any(lowered: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| lowered.contains(&keyword.to_lowercase()))
}

pub fn classify(
    records: &[LogRecord],
    patterns: &LogPatterns,
    limits: &LogLimits,
) -> (LogSummary, Vec<Issue>) {
    let mut summary = LogSummary {
        total: records.len(),
        ..LogSummary::default()
    };

    for record in records {
        match record.severity {
            Severity::Info => summary.info_count += 1,
            Severity::Warn => summary.warn_count += 1,
            Severity::Error => summary.error_count += 1,
        }

        let lowered = record.message.to_lowercase();
        if matches_any(&lowered, &patterns.error) {
            summary
                .error_patterns
                .record(&record.message, limits.error_samples);
        }
        if matches_any(&lowered, &patterns.warning) {
            summary
                .warning_patterns
                .record(&record.message, limits.warning_samples);
        }
        if matches_any(&lowered, &patterns.security) {
            summary
                .security_patterns
                .record(&record.message, limits.security_samples);
        }
    }

    summary.issues_found = summary.error_patterns.matched
        + summary.warning_patterns.matched
        + summary.security_patterns.matched;

    let issues = summary
        .error_patterns
        .samples
        .iter()
        .map(|message| format!("Error in log: {message}"))
        .chain(
            summary
                .warning_patterns
                .samples
                .iter()
                .map(|message| format!("Warning in log: {message}")),
        )
        .chain(
            summary
                .security_patterns
                .samples
                .iter()
                .map(|message| format!("Security event in log: {message}")),
        )
        .map(|message| Issue::new(Origin::Log, Category::Log, message))
        .collect();

    tracing::debug!(
        total = summary.total,
        errors = summary.error_count,
        issues_found = summary.issues_found,
        "log classified"
    );
    (summary, issues)
}
