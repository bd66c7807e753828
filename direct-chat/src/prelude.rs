//! Types and traits needed by almost every part of the application.
//!
//! ```
//! use direct_chat::prelude::*;
//! ```
pub use crate::chat::{ChatId, Message, User};
pub use crate::config::{get_config, Config};
pub use crate::controller::{Controller, Error, PageController, Session};
pub use crate::http::{Method, Request, Response};
pub use crate::logging::Logger;

/// A macro to easily implement async traits methods.
pub use async_trait::async_trait;

pub use serde::{Deserialize, Serialize};
pub use time::{Duration, OffsetDateTime};
pub use tokio;
