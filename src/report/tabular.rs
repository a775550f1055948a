use crate::error::{DumpscopeError, Result};
use crate::types::report::ReportModel;

const SUMMARY_HEADER: [&str; 2] = ["metric", "value"];
const ISSUE_HEADER: [&str; 5] = ["tier", "category", "source", "message", "source_key"];

/// Two stacked tables: `metric,value` summary rows, then one row per issue.
/// The writer is flexible because the tables differ in width.
pub fn to_csv(report: &ReportModel) -> Result<String> {
    let health = &report.analysis.health;
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(SUMMARY_HEADER)?;
    let summary = [
        ("overall_score", health.overall.to_string()),
        ("critical", health.tier_counts.critical.to_string()),
        ("error", health.tier_counts.error.to_string()),
        ("warning", health.tier_counts.warning.to_string()),
    ];
    for (metric, value) in summary {
        wtr.write_record([metric, value.as_str()])?;
    }

    wtr.write_record(ISSUE_HEADER)?;
    for issue in &report.analysis.issues {
        wtr.write_record([
            issue.tier.as_str(),
            issue.category.as_str(),
            issue.origin.as_str(),
            issue.message.as_str(),
            issue.source_key.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| DumpscopeError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
