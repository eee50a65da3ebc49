use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisingError {
    #[error("Advising record not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(#[from] eyre::Report),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Analytics error: {0}")]
    Analytics(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type AdvisingResult<T> = Result<T, AdvisingError>;
