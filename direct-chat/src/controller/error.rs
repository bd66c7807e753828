//! Errors that can be returned by a controller.
//!
//! Conversions exist from the errors of every layer underneath, so the `?` operator
//! works inside controllers. Anything else can be wrapped with [`Error::new`].
use crate::http::Error as HttpError;
use thiserror::Error;

/// A controller error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("fmt error: {0}")]
    FmtError(#[from] std::fmt::Error),

    #[error("crypto error: {0}")]
    CryptoError(#[from] crate::crypto::Error),

    #[error("store error: {0}")]
    StoreError(#[from] crate::store::Error),

    #[error("config error: {0}")]
    Config(#[from] crate::config::Error),

    #[error("http error: {0}")]
    HttpError(Box<HttpError>),

    #[error("{0}")]
    Error(#[from] Box<dyn std::error::Error + Sync + Send>),
}

impl Error {
    /// Create new error from any error implementing the standard [`std::error::Error`] trait.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::Error(Box::new(err))
    }
}

impl From<HttpError> for Error {
    fn from(error: HttpError) -> Self {
        Error::HttpError(Box::new(error))
    }
}
