use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("unit {0} not found")]
    UnitNotFound(u64),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid unit type '{0}'")]
    InvalidUnitType(String),

    #[error("{0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Message suitable for direct display to the user.
    ///
    /// Server-provided messages and validation messages pass through without
    /// the error-kind prefix; everything else uses the `Display` form.
    pub fn display_message(&self) -> String {
        match self {
            DashboardError::Api(msg) | DashboardError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
