//! HTTP request.

use std::marker::Unpin;
use std::ops::Deref;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Error, Head, Params};
use crate::controller::Session;

/// Largest request body we are willing to buffer.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// HTTP request.
///
/// The request is fully loaded into memory. It's cheap to clone
/// since the body is behind an [`std::sync::Arc`].
#[derive(Debug, Clone)]
pub struct Request {
    head: Head,
    session: Option<Session>,
    body: Arc<Vec<u8>>,
    params: Params,
}

impl Request {
    /// Read the request in its entirety from a stream.
    pub async fn read(mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let head = Head::read(&mut stream).await?;
        let content_length = head.content_length().unwrap_or(0);

        if content_length > MAX_BODY_SIZE {
            return Err(Error::MalformedRequest("body too large"));
        }

        let mut body = vec![0u8; content_length];
        stream
            .read_exact(&mut body)
            .await
            .map_err(|_| Error::MalformedRequest("incorrect content length"))?;

        let session = head.cookies().get_session()?;

        Ok(Request {
            head,
            session,
            body: Arc::new(body),
            params: Params::default(),
        })
    }

    /// Set path parameters extracted by the router.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Get a path parameter, percent-decoded.
    ///
    /// # Example
    ///
    /// For the route `/dashboard/chat/:chat_id` and the path `/dashboard/chat/a--b`:
    ///
    /// ```rust,ignore
    /// assert_eq!(request.parameter("chat_id")?, Some("a--b".to_string()));
    /// ```
    pub fn parameter(&self, name: &str) -> Result<Option<String>, Error> {
        match self.params.get(name) {
            Some(value) => urlencoding::decode(value)
                .map(|value| Some(value.into_owned()))
                .map_err(|_| Error::MalformedRequest("parameter is not valid utf-8")),
            None => Ok(None),
        }
    }

    /// Request's body as bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Request's session, if the client sent a valid one.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

impl Deref for Request {
    type Target = Head;

    fn deref(&self) -> &Self::Target {
        &self.head
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::chat::User;

    /// Build a `GET` request for `path`, optionally signed in as `user`.
    pub async fn get_request(path: &str, user: Option<User>) -> Request {
        let mut raw = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n", path);

        if let Some(user) = user {
            let cookie = Session::new(user).to_cookie().expect("session cookie");
            raw.push_str(&format!("Cookie: {}\r\n", cookie));
        }

        raw.push_str("\r\n");

        Request::read(raw.as_bytes())
            .await
            .expect("request")
    }

    #[tokio::test]
    async fn test_read_body() {
        let raw = "POST /api HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let request = Request::read(raw.as_bytes())
            .await
            .expect("request");
        assert!(request.post());
        assert_eq!(request.body(), b"hello");
        assert!(request.session().is_none());
    }

    #[tokio::test]
    async fn test_short_body() {
        let raw = "POST /api HTTP/1.1\r\nContent-Length: 50\r\n\r\nhello";
        let err = Request::read(raw.as_bytes())
            .await
            .expect_err("short body");
        assert_eq!(err.code(), 400);
    }

    #[tokio::test]
    async fn test_session() {
        let request = get_request("/", Some(User::new("a", "Ann", "ann@example.com"))).await;
        let session = request.session().expect("session");
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("a"));
    }

    #[tokio::test]
    async fn test_parameter() {
        let request = get_request("/", None)
            .await
            .with_params(Params::from([("chat_id".to_string(), "a%20b--c".to_string())]));
        assert_eq!(
            request.parameter("chat_id").unwrap(),
            Some("a b--c".to_string())
        );
        assert_eq!(request.parameter("missing").unwrap(), None);
    }

    #[tokio::test]
    async fn test_parameter_not_utf8() {
        let request = get_request("/", None)
            .await
            .with_params(Params::from([("chat_id".to_string(), "%FF--b".to_string())]));
        let err = request.parameter("chat_id").expect_err("invalid utf-8");
        assert_eq!(err.code(), 400);
    }
}
