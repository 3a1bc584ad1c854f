use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Insufficient items: requested {requested} examples but only {available} available")]
    InsufficientItems { requested: usize, available: usize },
}

impl Error {
    /// True for errors raised by option validation rather than by the input size
    pub fn is_config(&self) -> bool {
        matches!(self, Error::InvalidConfig(_))
    }
}
