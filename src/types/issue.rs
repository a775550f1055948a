use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Performance,
    Configuration,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    Error,
    Warning,
}

/// Which classifier produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Log,
    Settings,
    Statistics,
    Apps,
    FeatureModule,
}

impl Tier {
    /// Fixed category/origin to tier mapping used by every classifier.
    ///
    /// Security always lands in the critical tier. Performance findings are
    /// critical when they come from runtime statistics and errors when they
    /// come from configuration. Configuration findings from the feature
    /// module are errors; those from the main settings and from app
    /// version checks are warnings.
    pub fn for_issue(origin: Origin, category: Category) -> Tier {
        match (category, origin) {
            (Category::Security, _) => Tier::Critical,
            (Category::Performance, Origin::Statistics) => Tier::Critical,
            (Category::Performance, _) => Tier::Error,
            (Category::Log, _) => Tier::Error,
            (Category::Configuration, Origin::FeatureModule) => Tier::Error,
            (Category::Configuration, _) => Tier::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Error => "error",
            Tier::Warning => "warning",
        }
    }
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Configuration => "configuration",
            Category::Log => "log",
        }
    }
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Log => "log",
            Origin::Settings => "settings",
            Origin::Statistics => "statistics",
            Origin::Apps => "apps",
            Origin::FeatureModule => "feature_module",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub category: Category,
    pub tier: Tier,
    pub origin: Origin,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
}

impl Issue {
    pub fn new(origin: Origin, category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            tier: Tier::for_issue(origin, category),
            origin,
            message: message.into(),
            source_key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.source_key = Some(key.into());
        self
    }
}
