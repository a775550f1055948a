use crate::types::report::ReportModel;

pub fn to_json(report: &ReportModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn json_report_exposes_score_tiers_and_sources() {
        let rendered = to_json(&sample_report()).expect("json should serialize");
        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("output should be valid json");

        assert!(value["analysis"]["health"]["overall"].is_u64());
        assert!(value["analysis"]["health"]["tier_counts"]["critical"].is_u64());
        assert_eq!(value["analysis"]["sources"]["apps"], "not_analyzed");
        assert_eq!(value["analysis"]["sources"]["feature_settings"], "unparseable");
        assert_eq!(value["analysis"]["issues"][0]["tier"], "error");
        assert_eq!(value["fingerprint"].as_str().map(str::len), Some(64));
    }
}
