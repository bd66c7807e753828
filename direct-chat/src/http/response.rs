//! HTTP response.

use std::collections::HashMap;
use std::marker::Unpin;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Response status, e.g. 404, 200, etc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
    Code(u16),
}

impl Status {
    pub fn code(&self) -> u16 {
        use Status::*;

        match self {
            Ok => 200,
            BadRequest => 400,
            NotFound => 404,
            MethodNotAllowed => 405,
            InternalServerError => 500,
            Code(code) => *code,
        }
    }

    fn reason(&self) -> &'static str {
        match self.code() {
            200 => "OK",
            301 => "Moved Permanently",
            302 => "Found",
            400 => "Bad Request",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Status {
        use Status::*;

        match code {
            200 => Ok,
            400 => BadRequest,
            404 => NotFound,
            405 => MethodNotAllowed,
            500 => InternalServerError,
            code => Code(code),
        }
    }
}

/// Response body.
#[derive(Debug, Clone)]
pub enum Body {
    /// UTF-8 encoded HTML.
    Html(String),
    /// UTF-8 encoded text.
    Text(String),
}

impl Body {
    fn mime_type(&self) -> &'static str {
        match self {
            Body::Html(_) => "text/html; charset=utf-8",
            Body::Text(_) => "text/plain; charset=utf-8",
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Html(s) | Body::Text(s) => s.as_bytes(),
        }
    }
}

/// HTTP response.
#[derive(Debug)]
pub struct Response {
    code: u16,
    headers: HashMap<String, String>,
    body: Body,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create empty response.
    pub fn new() -> Self {
        Self {
            code: 200,
            headers: HashMap::from([
                ("server".to_string(), "direct-chat".to_string()),
                ("cache-control".to_string(), "no-store".to_string()),
            ]),
            body: Body::Text(String::new()),
        }
    }

    /// Response status, e.g. 200 OK.
    pub fn status(&self) -> Status {
        self.code.into()
    }

    /// Set response code.
    pub fn code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Create a response with an HTML body.
    ///
    /// # Example
    ///
    /// ```
    /// use direct_chat::http::Response;
    ///
    /// let response = Response::new().html("<h1>Hello world</h1>");
    /// ```
    pub fn html(mut self, body: impl ToString) -> Self {
        self.body = Body::Html(body.to_string());
        self
    }

    /// Create a response with a plain text body.
    pub fn text(mut self, body: impl ToString) -> Self {
        self.body = Body::Text(body.to_string());
        self
    }

    /// Add a header to the response. The name is lowercased.
    pub fn header(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.headers
            .insert(name.to_string().to_lowercase(), value.to_string());
        self
    }

    /// Write the response to the stream. The stream is not flushed.
    pub async fn send(&self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        let status = self.status();
        let body = self.body.as_bytes();

        let mut head = format!("HTTP/1.1 {} {}\r\n", status.code(), status.reason());
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str(&format!("content-type: {}\r\n", self.body.mime_type()));
        head.push_str(&format!("content-length: {}\r\n\r\n", body.len()));

        stream.write_all(head.as_bytes()).await?;
        stream.write_all(body).await?;

        Ok(())
    }

    /// Generic not found page.
    ///
    /// Also used for chats the viewer is not allowed to see, so the two
    /// can't be told apart.
    pub fn not_found() -> Self {
        Self::error_page(404, "404 - Not Found", "This page doesn't exist.")
    }

    pub fn bad_request() -> Self {
        Self::error_page(400, "400 - Bad Request", "The request could not be understood.")
    }

    pub fn method_not_allowed() -> Self {
        Self::error_page(405, "405 - Method Not Allowed", "Only GET is supported here.")
    }

    /// Internal server error. The error is not shown to the client.
    pub fn internal_error(_err: impl std::error::Error) -> Self {
        Self::error_page(
            500,
            "500 - Internal Server Error",
            "Something went wrong. Please try again later.",
        )
    }

    fn error_page(code: u16, title: &str, message: &str) -> Self {
        Self::new().code(code).html(format!(
            "<!doctype html><html><head><title>{title}</title></head>\
            <body><h1>{title}</h1><p>{message}</p></body></html>"
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_send() {
        let response = Response::new().html("<p>hi</p>").header("X-Chat", "a--b");
        let mut buf = Vec::new();
        response.send(&mut buf).await.expect("send");

        let raw = String::from_utf8(buf).unwrap();
        assert!(raw.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(raw.contains("x-chat: a--b\r\n"));
        assert!(raw.contains("content-type: text/html; charset=utf-8\r\n"));
        assert!(raw.contains("content-length: 9\r\n"));
        assert!(raw.ends_with("\r\n\r\n<p>hi</p>"));
    }

    #[test]
    fn test_not_found() {
        let response = Response::not_found();
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.status().code(), 404);
    }
}
