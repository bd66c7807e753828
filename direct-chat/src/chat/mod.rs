//! Direct chats between two users.
//!
//! A chat is identified by the two participant ids joined with `--`. Messages
//! live in a Redis sorted set named after the chat, users in plain keys.
pub mod authorize;
pub mod history;
pub mod id;
pub mod message;
pub mod user;

pub use authorize::{authorize, Authorized, Denied};
pub use history::{fetch_history, HistoryError};
pub use id::{ChatId, ChatIdError, DELIMITER};
pub use message::{Message, SchemaError};
pub use user::User;
