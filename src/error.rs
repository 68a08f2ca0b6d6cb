use thiserror::Error;

#[derive(Error, Debug)]
pub enum KhataError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SMS text is required")]
    EmptyInput,

    #[error("Could not parse SMS - no matching pattern found")]
    NoMatch,

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("No queue item with ID {0}")]
    UnknownQueueItem(i64),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KhataError>;
