use thiserror::Error;

pub type LensResult<T> = Result<T, LensError>;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("No header row found: the sheet has no month column like 'Jan-24'")]
    HeaderNotFound,

    #[error("Config error: {0}")]
    Config(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate service key '{0}' after disambiguation")]
    DuplicateKey(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
