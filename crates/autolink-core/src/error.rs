use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutolinkError>;

#[derive(Debug, Error)]
pub enum AutolinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed alias list: {0}")]
    MalformedAliases(String),

    #[error("Glossary entry not found: {0}")]
    EntryNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
