use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// The host refused or failed to show a notification.
    #[error("display failure: {0}")]
    Display(String),

    #[error("close failure: {0}")]
    Close(String),

    /// The host failed to open or focus a view.
    #[error("navigation failure: {0}")]
    Navigation(String),

    /// Install or activate did not complete.
    #[error("lifecycle failure: {0}")]
    Lifecycle(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to decode worker event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
