//! In-process store.
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{rank_bounds, Error, MessageStore, UserStore};
use crate::chat::{ChatId, User};

/// Sorted sets and user records kept in memory.
///
/// Members are kept in rank order, exactly as pushed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: RwLock<HashMap<String, Vec<String>>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw entries to the sorted set at `key`, in rank order.
    pub fn push(&self, key: &str, entries: impl IntoIterator<Item = String>) {
        self.sets
            .write()
            .entry(key.to_string())
            .or_default()
            .extend(entries);
    }

    /// Append raw entries to a chat's history. The newest message goes first.
    pub fn push_messages(&self, chat: &ChatId, entries: impl IntoIterator<Item = String>) {
        self.push(&chat.messages_key(), entries);
    }

    /// Store a user record, replacing any previous one with the same id.
    pub fn insert_user(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, Error> {
        let sets = self.sets.read();
        let Some(members) = sets.get(key) else {
            return Ok(vec![]);
        };

        Ok(match rank_bounds(members.len(), start, stop) {
            Some((from, to)) => members[from..to].to_vec(),
            None => vec![],
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn user(&self, id: &str) -> Result<Option<User>, Error> {
        Ok(self.users.read().get(id).cloned())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_range() {
        let store = MemoryStore::new();
        store.push("set", ["c", "b", "a"].map(String::from));

        assert_eq!(store.range("set", 0, -1).await.unwrap(), vec!["c", "b", "a"]);
        assert_eq!(store.range("set", -1, -1).await.unwrap(), vec!["a"]);
        assert!(store.range("set", 5, 10).await.unwrap().is_empty());
        assert!(store.range("missing", 0, -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_users() {
        let store = MemoryStore::new();
        store.insert_user(User::new("a", "Ann", "ann@example.com"));

        assert_eq!(store.user("a").await.unwrap().unwrap().name, "Ann");
        assert!(store.user("b").await.unwrap().is_none());
    }
}
