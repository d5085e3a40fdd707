use thiserror::Error;

#[derive(Error, Debug)]
pub enum TurnosError {
    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("change-stream subscription is not supported by this backend")]
    SubscriptionUnsupported,

    #[error("speech synthesis error: {0}")]
    Speech(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TurnosError>;
