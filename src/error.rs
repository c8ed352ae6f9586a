use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("key not found")]
    KeyNotFound,
    #[error("empty priority queue")]
    EmptyQueue,
}
