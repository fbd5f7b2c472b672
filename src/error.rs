use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Search expansion limit of {0} exceeded")]
    LimitExceeded(usize),
}
