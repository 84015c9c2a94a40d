use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Die must have at least one face")]
    EmptyDie,

    #[error("Modulus must be positive")]
    ZeroModulus,

    #[error("fairness violation: revealed key/value do not match the committed digest (expected {expected}, got {actual})")]
    TamperedReveal { expected: String, actual: String },

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),
}
