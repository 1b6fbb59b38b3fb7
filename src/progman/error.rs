use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgmanError {
    #[error("Config file not found (looked for {preferred} and {fallback})")]
    ConfigNotFound { preferred: PathBuf, fallback: PathBuf },

    #[error("Config file {path} is not a valid catalog: {reason}")]
    ConfigMalformed { path: PathBuf, reason: String },

    #[error("Scan path template not found: {0}")]
    PathTemplateNotFound(PathBuf),

    #[error("Scan path template {path} is not valid: {reason}")]
    PathTemplateMalformed { path: PathBuf, reason: String },

    #[error("Catalog template not found: {0}")]
    CatalogTemplateNotFound(PathBuf),

    #[error("Catalog template {path} is not a valid catalog: {reason}")]
    CatalogTemplateMalformed { path: PathBuf, reason: String },

    #[error("Unable to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Process query failed: {0}")]
    ProbeFailure(String),

    #[error("Could not end {process}: {reason}")]
    TerminationFailure { process: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ProgmanError>;
