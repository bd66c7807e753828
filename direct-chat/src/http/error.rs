use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    #[error("invalid route \"{0}\"")]
    InvalidRoute(String),

    #[error("json")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Crypto(#[from] crate::crypto::Error),

    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    pub fn code(&self) -> u16 {
        match self {
            Self::MalformedRequest(_) => 400,
            _ => 500,
        }
    }
}
