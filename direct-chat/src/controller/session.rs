//! The viewer's session.
//!
//! Sessions are issued by the authentication provider and handed to the browser as an
//! encrypted cookie. This application only reads them; [`Session::to_cookie`] exists so
//! the CLI and tests can mint one.
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Error;
use crate::chat::User;
use crate::config::get_config;
use crate::crypto::encrypt;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "direct_chat_session";

/// A client's session.
///
/// This is a JSON-encoded object that's stored securely in a cookie (using encryption).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    /// Signed in user, if any.
    #[serde(rename = "u")]
    pub user: Option<User>,
    /// Session expiration (UNIX timestamp in UTC).
    #[serde(rename = "e")]
    pub expiration: i64,
}

impl Session {
    /// Create a session for this user, valid for the configured session duration.
    pub fn new(user: User) -> Self {
        Self {
            user: Some(user),
            expiration: (OffsetDateTime::now_utc() + get_config().general.session_duration)
                .unix_timestamp(),
        }
    }

    /// Check if the session has expired.
    pub fn expired(&self) -> bool {
        self.expiration < OffsetDateTime::now_utc().unix_timestamp()
    }

    /// The signed in user, unless the session has expired.
    pub fn user(&self) -> Option<&User> {
        if self.expired() {
            None
        } else {
            self.user.as_ref()
        }
    }

    /// Encrypt the session into a `name=value` cookie pair.
    pub fn to_cookie(&self) -> Result<String, Error> {
        let value = encrypt(serde_json::to_string(self)?.as_bytes())?;
        Ok(format!("{}={}", SESSION_COOKIE, value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_expired() {
        let mut session = Session::new(User::new("a", "Ann", "ann@example.com"));
        assert!(!session.expired());
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("a"));

        session.expiration = OffsetDateTime::now_utc().unix_timestamp() - 60;
        assert!(session.expired());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_no_user() {
        let session = Session {
            user: None,
            ..Session::new(User::new("a", "Ann", "ann@example.com"))
        };
        assert!(!session.expired());
        assert!(session.user().is_none());
    }
}
