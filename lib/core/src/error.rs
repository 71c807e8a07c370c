use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid relevance query: {0}")]
    InvalidQuery(String),

    #[error("Content source error: {0}")]
    DataSource(String),

    #[error("Relevance scan deadline exceeded")]
    Timeout,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
