use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpscopeError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("no dump sources found in {0}")]
    NoSources(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DumpscopeError>;
