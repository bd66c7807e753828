use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

/// Why a stored entry isn't a valid message.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("{0}")]
    Shape(#[from] serde_json::Error),

    #[error("field \"{0}\" is empty")]
    Empty(&'static str),
}

/// A chat message, as stored in the chat's sorted set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
}

impl Message {
    /// Check a parsed store entry against the message schema.
    ///
    /// `id`, `senderId` and `text` must be strings and `timestamp` an integer.
    /// Unknown fields are ignored.
    pub fn validate(value: Value) -> Result<Self, SchemaError> {
        let message: Message = serde_json::from_value(value)?;

        if message.id.is_empty() {
            return Err(SchemaError::Empty("id"));
        }

        if message.sender_id.is_empty() {
            return Err(SchemaError::Empty("senderId"));
        }

        Ok(message)
    }

    /// When the message was sent, if the timestamp is in range.
    pub fn sent_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(self.timestamp as i128 * 1_000_000).ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate() {
        let message = Message::validate(json!({
            "id": "m1",
            "senderId": "a",
            "text": "hi",
            "timestamp": 1_700_000_000_000i64,
            "seen": true,
        }))
        .expect("valid");
        assert_eq!(message.sender_id, "a");
        assert_eq!(message.sent_at().unwrap().year(), 2023);
    }

    #[test]
    fn test_schema_errors() {
        let missing = Message::validate(json!({"id": "m1", "senderId": "a", "text": "hi"}));
        assert!(matches!(missing, Err(SchemaError::Shape(_))));

        let wrong_type = Message::validate(json!({
            "id": "m1", "senderId": "a", "text": 5, "timestamp": 1,
        }));
        assert!(matches!(wrong_type, Err(SchemaError::Shape(_))));

        let not_object = Message::validate(json!("hello"));
        assert!(matches!(not_object, Err(SchemaError::Shape(_))));

        let empty = Message::validate(json!({
            "id": "m1", "senderId": "", "text": "hi", "timestamp": 1,
        }));
        assert!(matches!(empty, Err(SchemaError::Empty("senderId"))));
    }
}
