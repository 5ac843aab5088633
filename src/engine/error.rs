use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Timer engine is no longer running")]
    Closed,

    #[error("Unrecognized timer command: {0}")]
    UnrecognizedCommand(String),

    #[error("Timer engine task failed: {0}")]
    Task(String),
}
