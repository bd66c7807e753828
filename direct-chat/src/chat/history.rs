//! Reading a chat's message history.
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::{ChatId, Message, SchemaError};
use crate::store::{self, MessageStore};

/// Why the history couldn't be loaded. `index` is the entry's position in store order.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("store: {0}")]
    Store(#[from] store::Error),

    #[error("entry {index} is not valid JSON: {source}")]
    Json {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("entry {index} is not a message: {source}")]
    Schema {
        index: usize,
        #[source]
        source: SchemaError,
    },
}

/// Load the full history of a chat, oldest message first.
///
/// The store keeps the newest message first, so the entries are reversed after parsing.
/// One bad entry fails the whole history.
pub async fn fetch_history(
    store: &dyn MessageStore,
    chat: &ChatId,
) -> Result<Vec<Message>, HistoryError> {
    let entries = store.range(&chat.messages_key(), 0, -1).await?;
    debug!("chat \"{}\": {} stored messages", chat, entries.len());

    let values = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_str::<Value>(entry)
                .map_err(|source| HistoryError::Json { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    values
        .into_iter()
        .enumerate()
        .rev()
        .map(|(index, value)| {
            Message::validate(value).map_err(|source| HistoryError::Schema { index, source })
        })
        .collect()
}
