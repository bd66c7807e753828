//! Direct messaging chat page.
//!
//! A small web application serving `GET /dashboard/chat/:chat_id`: it reads the viewer's
//! session, checks the viewer is one of the two participants encoded in the chat identifier,
//! loads the partner's profile and the chat history from Redis, and renders the page.
//!
//! The HTTP server, sessions and configuration follow the same model-view-controller layout
//! as a regular web framework, trimmed down to what one page needs.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use direct_chat::prelude::*;
//! use direct_chat::{http::Server, store::Upstash};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     Logger::init();
//!
//!     let store = Arc::new(Upstash::from_config(get_config())?);
//!     Server::new(direct_chat::routes(store.clone(), store)?)?
//!         .launch()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
pub mod chat;
pub mod colors;
pub mod config;
pub mod controller;
pub mod crypto;
pub mod http;
pub mod logging;
pub mod prelude;
pub mod store;
pub mod view;

/// Wrapper around async traits to make them easy to use.
pub use async_trait::async_trait;
/// Tokio is an asynchronous runtime for Rust.
pub use tokio;

use std::sync::Arc;

use controller::{ChatController, Controller};
use http::Handler;
use store::{MessageStore, UserStore};

/// Path of the chat page. The only parameter is the chat identifier.
pub const CHAT_ROUTE: &str = "/dashboard/chat/:chat_id";

/// Route table of the application.
pub fn routes(
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserStore>,
) -> Result<Vec<Handler>, http::Error> {
    Ok(vec![ChatController::new(messages, users).route(CHAT_ROUTE)?])
}

