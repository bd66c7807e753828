//! HTTP cookies.
//!
//! Decodes the `Cookie` header sent by the browser. Private cookies are
//! encrypted with the application secret key, see [`crate::crypto`].
use std::collections::HashMap;

use tracing::debug;

use super::Error;
use crate::controller::{Session, SESSION_COOKIE};
use crate::crypto::decrypt;

/// Cookies sent by the client.
#[derive(Debug, Clone, Default)]
pub struct Cookies {
    cookies: HashMap<String, Cookie>,
}

impl Cookies {
    /// Parse cookies from the `Cookie` header.
    ///
    /// # Example
    ///
    /// ```
    /// # use direct_chat::http::Cookies;
    /// let cookies = Cookies::parse("theme=dark; direct_chat_session=foo");
    /// assert_eq!(cookies.get("theme").unwrap().value(), "dark");
    /// ```
    pub fn parse(value: &str) -> Cookies {
        let cookies = value
            .split(';')
            .filter_map(|part| Cookie::parse(part.trim()))
            .map(|cookie| (cookie.name.clone(), cookie))
            .collect();

        Cookies { cookies }
    }

    /// Get a cookie sent by the client.
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    /// Get an encrypted cookie. The value is decrypted automatically.
    ///
    /// If the decryption fails, `None` is returned. This indicates the cookie has been modified,
    /// or has been encrypted with a different secret key.
    pub fn get_private(&self, name: &str) -> Result<Option<Cookie>, Error> {
        let Some(cookie) = self.get(name) else {
            return Ok(None);
        };

        let value = match decrypt(&cookie.value) {
            Ok(value) => value,
            Err(err) => {
                debug!("cookie \"{}\" rejected: {}", name, err);
                return Ok(None);
            }
        };

        Ok(Some(Cookie {
            name: cookie.name.clone(),
            value: String::from_utf8(value)?,
        }))
    }

    /// Get the session from the session cookie.
    ///
    /// A cookie that can't be decrypted or decoded is treated as no session at all.
    pub fn get_session(&self) -> Result<Option<Session>, Error> {
        let Some(cookie) = self.get_private(SESSION_COOKIE)? else {
            return Ok(None);
        };

        match serde_json::from_str(cookie.value()) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                debug!("session cookie is not a session: {}", err);
                Ok(None)
            }
        }
    }
}

/// A browser cookie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookie {
    name: String,
    value: String,
}

impl Cookie {
    /// Parse a single `name=value` pair.
    fn parse(value: &str) -> Option<Self> {
        let (name, value) = value.split_once('=').unwrap_or((value, ""));
        let name = name.trim();

        if name.is_empty() {
            return None;
        }

        Some(Cookie {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
        })
    }

    /// Get cookie value.
    pub fn value(&self) -> &str {
        &self.value
    }
}
