//! Who may see a chat.
use thiserror::Error;

use super::{ChatId, ChatIdError, User};
use crate::controller::Session;

/// Why the viewer can't see the chat. All of these render the same "not found" page.
#[derive(Error, Debug, PartialEq)]
pub enum Denied {
    #[error("no signed in user")]
    NoSession,

    #[error("malformed chat id: {0}")]
    MalformedChatId(#[from] ChatIdError),

    #[error("user \"{0}\" is not a participant")]
    NotParticipant(String),
}

/// The viewer is one of the two participants of the chat.
#[derive(Debug)]
pub struct Authorized<'a> {
    pub chat: ChatId,
    pub viewer: &'a User,
}

impl Authorized<'_> {
    /// The participant who isn't the viewer. In a chat with oneself, that's the viewer.
    pub fn partner_id(&self) -> &str {
        self.chat
            .partner_of(&self.viewer.id)
            .unwrap_or(self.viewer.id.as_str())
    }
}

/// Check that the session belongs to one of the users named by the chat id.
pub fn authorize<'a>(
    session: Option<&'a Session>,
    chat_id: &str,
) -> Result<Authorized<'a>, Denied> {
    let viewer = session.and_then(|s| s.user()).ok_or(Denied::NoSession)?;
    let chat = ChatId::parse(chat_id)?;

    if !chat.includes(&viewer.id) {
        return Err(Denied::NotParticipant(viewer.id.clone()));
    }

    Ok(Authorized { chat, viewer })
}

#[cfg(test)]
mod test {
    use super::*;

    fn session(id: &str) -> Session {
        Session::new(User::new(id, id.to_uppercase(), format!("{}@example.com", id)))
    }

    #[test]
    fn test_participants_pass() {
        let a = session("a");
        let authorized = authorize(Some(&a), "a--b").expect("a may see a--b");
        assert_eq!(authorized.partner_id(), "b");

        let b = session("b");
        let authorized = authorize(Some(&b), "a--b").expect("b may see a--b");
        assert_eq!(authorized.partner_id(), "a");
    }

    #[test]
    fn test_outsider_denied() {
        let c = session("c");
        assert_eq!(
            authorize(Some(&c), "a--b").unwrap_err(),
            Denied::NotParticipant("c".into())
        );
    }

    #[test]
    fn test_no_session_denied() {
        for chat_id in ["a--b", "c--d", "", "nonsense"] {
            assert_eq!(authorize(None, chat_id).unwrap_err(), Denied::NoSession);
        }

        let anonymous = Session {
            user: None,
            ..session("a")
        };
        assert_eq!(
            authorize(Some(&anonymous), "a--b").unwrap_err(),
            Denied::NoSession
        );
    }

    #[test]
    fn test_malformed_chat_id() {
        let a = session("a");
        assert!(matches!(
            authorize(Some(&a), "a"),
            Err(Denied::MalformedChatId(ChatIdError::MissingDelimiter))
        ));
    }

    #[test]
    fn test_chat_with_self() {
        let a = session("a");
        let authorized = authorize(Some(&a), "a--a").expect("own chat");
        assert_eq!(authorized.partner_id(), "a");
    }
}
