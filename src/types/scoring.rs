use serde::Serialize;

pub type Score = u8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub critical: usize,
    pub error: usize,
    pub warning: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.critical + self.error + self.warning
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub overall: Score,
    pub tier_counts: TierCounts,
    pub recommendations: Vec<String>,
}
