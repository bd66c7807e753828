use thiserror::Error;

/// Separates the two participant ids in a chat id.
pub const DELIMITER: &str = "--";

#[derive(Error, Debug, PartialEq)]
pub enum ChatIdError {
    #[error("chat id has no \"--\" delimiter")]
    MissingDelimiter,

    #[error("chat id has more than two participants")]
    TooManyParticipants,

    #[error("chat id has an empty participant")]
    EmptyParticipant,
}

/// Identifier of a chat between two users, e.g. `alice--bob`.
///
/// The pair is unordered in meaning: `alice--bob` and `bob--alice` have the same
/// participants. The text is kept as received though, since it names the message
/// collection in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatId {
    raw: String,
    split: usize,
}

impl ChatId {
    /// Parse a chat id. Exactly one delimiter, both sides non-empty.
    pub fn parse(raw: &str) -> Result<Self, ChatIdError> {
        let split = raw.find(DELIMITER).ok_or(ChatIdError::MissingDelimiter)?;
        let (first, second) = (&raw[..split], &raw[split + DELIMITER.len()..]);

        if second.contains(DELIMITER) {
            return Err(ChatIdError::TooManyParticipants);
        }

        if first.is_empty() || second.is_empty() {
            return Err(ChatIdError::EmptyParticipant);
        }

        Ok(Self {
            raw: raw.to_string(),
            split,
        })
    }

    /// The canonical chat id of two users, with the ids in lexical order,
    /// so both sides build the same link.
    pub fn between(a: &str, b: &str) -> Result<Self, ChatIdError> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self::parse(&format!("{}{}{}", first, DELIMITER, second))
    }

    /// Both participants, in textual order.
    pub fn participants(&self) -> (&str, &str) {
        (
            &self.raw[..self.split],
            &self.raw[self.split + DELIMITER.len()..],
        )
    }

    /// Is this user one of the two participants?
    pub fn includes(&self, user_id: &str) -> bool {
        let (first, second) = self.participants();
        user_id == first || user_id == second
    }

    /// The other participant, if `user_id` takes part in the chat.
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        match self.participants() {
            (first, second) if first == user_id => Some(second),
            (first, second) if second == user_id => Some(first),
            _ => None,
        }
    }

    /// Name of the sorted set holding this chat's messages.
    pub fn messages_key(&self) -> String {
        format!("chat:{}:messages", self.raw)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
