use thiserror::Error;

/// Store error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store replied with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("command failed: {0}")]
    Command(String),

    #[error("unexpected reply to {0}")]
    UnexpectedReply(&'static str),

    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store url and token are not configured")]
    NotConfigured,

    #[error("invalid store url: {0}")]
    Url(#[from] url::ParseError),
}
