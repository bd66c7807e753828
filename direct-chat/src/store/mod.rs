//! Where chats and users live.
//!
//! The application reads from a Redis-compatible store: each chat is a sorted set
//! of JSON-encoded messages under `chat:{id}:messages`, newest first, and each
//! user is a JSON-encoded record under `user:{id}`.
//!
//! [`Upstash`] talks to an Upstash Redis database over its REST API. [`MemoryStore`]
//! keeps everything in process and backs the tests and the fixture server.
use async_trait::async_trait;

pub mod error;
pub mod memory;
pub mod upstash;

pub use error::Error;
pub use memory::MemoryStore;
pub use upstash::Upstash;

use crate::chat::User;

/// Read access to sorted sets of messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Members of the sorted set at `key`, between ranks `start` and `stop` inclusive.
    ///
    /// Negative ranks count from the end, so `range(key, 0, -1)` is the whole set.
    /// A missing key is an empty set.
    async fn range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, Error>;
}

/// Read access to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The user stored under `user:{id}`, if any.
    async fn user(&self, id: &str) -> Result<Option<User>, Error>;
}

/// Resolve Redis rank bounds against a set of `len` members.
///
/// Returns the half-open index range to take, or `None` if it's empty.
pub(crate) fn rank_bounds(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start >= len || stop < 0 || start > stop {
        None
    } else {
        Some((start as usize, stop as usize + 1))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rank_bounds() {
        assert_eq!(rank_bounds(3, 0, -1), Some((0, 3)));
        assert_eq!(rank_bounds(3, 1, 1), Some((1, 2)));
        assert_eq!(rank_bounds(3, -2, -1), Some((1, 3)));
        assert_eq!(rank_bounds(3, 0, 100), Some((0, 3)));
        assert_eq!(rank_bounds(3, -100, 0), Some((0, 1)));
        assert_eq!(rank_bounds(3, 2, 1), None);
        assert_eq!(rank_bounds(3, 3, -1), None);
        assert_eq!(rank_bounds(0, 0, -1), None);
    }
}
