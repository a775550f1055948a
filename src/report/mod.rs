pub mod html;
pub mod json;
pub mod tabular;
pub mod text;

use crate::error::DumpscopeError;
use crate::types::report::ReportModel;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

pub fn render(report: &ReportModel, format: OutputFormat) -> Result<String, DumpscopeError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(report)),
        OutputFormat::Json => json::to_json(report).map_err(DumpscopeError::Json),
        OutputFormat::Csv => tabular::to_csv(report),
        OutputFormat::Html => Ok(html::to_html(report)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::analyze::analyze;
    use crate::normalize::{DumpBundle, RawBundle};
    use crate::types::config::EngineConfig;
    use crate::types::report::{ReportModel, RunMetadata};
    use serde_json::json;

    pub fn sample_report() -> ReportModel {
        let raw = RawBundle {
            log: Some(json!([
                {"msg": "Connection refused to database", "level": 50},
                {"msg": "user <admin> login failed", "level": 40}
            ])),
            settings: Some(json!([
                {"_id": "Accounts_TwoFactorAuthentication_Enabled", "value": false},
                {"_id": "RetentionPolicy_Enabled", "value": false}
            ])),
            statistics: Some(json!({"version": "6.2.0", "totalUsers": 12})),
            apps: None,
            feature_settings: Some(json!("unreadable")),
        };
        analyze(
            &DumpBundle::from_raw(&raw),
            &EngineConfig::default(),
            RunMetadata::now("/var/dumps/chat"),
        )
    }
}
