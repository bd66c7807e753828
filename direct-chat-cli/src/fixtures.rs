//! Users and chats from a JSON file, for running the server without Upstash.
//!
//! ```json
//! {
//!     "users": [{"id": "a", "name": "Ann", "email": "ann@example.com"}],
//!     "chats": {
//!         "a--b": [
//!             {"id": "m2", "senderId": "b", "text": "hey", "timestamp": 1700000060000},
//!             {"id": "m1", "senderId": "a", "text": "hi", "timestamp": 1700000000000}
//!         ]
//!     }
//! }
//! ```
//!
//! Chat entries are listed the way the store ranks them, newest first. An entry that's
//! a JSON string is stored verbatim, so broken entries can be reproduced too.
use std::collections::HashMap;
use std::path::Path;

use direct_chat::chat::{ChatId, User};
use direct_chat::controller::Error;
use direct_chat::store::MemoryStore;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Deserialize, Default)]
struct Fixtures {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    chats: HashMap<String, Vec<Value>>,
}

/// Load a fixture file into a fresh in-memory store.
pub fn load(path: &Path) -> Result<MemoryStore, Error> {
    let fixtures: Fixtures = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let store = MemoryStore::new();

    info!(
        "Loaded {} users and {} chats from \"{}\"",
        fixtures.users.len(),
        fixtures.chats.len(),
        path.display()
    );

    for user in fixtures.users {
        store.insert_user(user);
    }

    for (chat_id, entries) in fixtures.chats {
        let chat = ChatId::parse(&chat_id).map_err(Error::new)?;
        store.push_messages(
            &chat,
            entries.into_iter().map(|entry| match entry {
                Value::String(raw) => raw,
                entry => entry.to_string(),
            }),
        );
    }

    Ok(store)
}
