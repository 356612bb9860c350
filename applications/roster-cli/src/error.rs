/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client error: {0}")]
    Client(#[from] roster_client::ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The panel reported a failure through its message board
    #[error("{0}")]
    Action(String),

    #[error("User {0} not found")]
    NotFound(i64),
}
