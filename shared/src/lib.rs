// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Cache miss. Never surfaced to HTTP callers.
    #[error("not found")]
    NotFound,
    /// The upstream answered, but with a structured error in the body.
    #[error("{0}")]
    Upstream(String),
    /// Network failure, non-2xx status or a body that could not be parsed.
    #[error("{0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
