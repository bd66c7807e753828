//! Request head: method, path, HTTP version and headers.

use std::collections::HashMap;
use std::marker::Unpin;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Cookies, Error};
use crate::config::get_config;

/// HTTP method, e.g. GET, POST, etc.
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    /// Some other request we don't have a name for.
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "PATCH" => Method::Patch,
            _ => Method::Other(value.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Method::*;

        let name = match self {
            Get => "GET",
            Post => "POST",
            Put => "PUT",
            Delete => "DELETE",
            Head => "HEAD",
            Patch => "PATCH",
            Other(other) => other.as_str(),
        };

        write!(f, "{}", name)
    }
}

/// HTTP version.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Version {
    /// HTTP/1.0, no keep-alive unless asked for.
    Http10,
    /// HTTP/1.1.
    #[default]
    Http11,
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "HTTP/1.1" => Ok(Version::Http11),
            "HTTP/1.0" => Ok(Version::Http10),
            _ => Err(Error::MalformedRequest("unsupported http version")),
        }
    }
}

/// Request HTTP method, path, HTTP version and headers.
#[derive(Debug, Clone, Default)]
pub struct Head {
    method: Method,
    path: String,
    version: Version,
    headers: HashMap<String, String>,
}

impl Head {
    /// Read request head from a stream.
    ///
    /// Returns an I/O error of kind `UnexpectedEof` if the client closed
    /// the connection before sending anything.
    pub async fn read(mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let max_size = get_config().general.header_max_size;

        let line = Self::read_line(&mut stream, max_size).await?;
        let mut request = line.split(' ');

        let method = request
            .next()
            .filter(|m| !m.is_empty())
            .ok_or(Error::MalformedRequest("method"))?;
        let method = Method::from(method);

        let target = request.next().ok_or(Error::MalformedRequest("path"))?;
        if !target.starts_with('/') {
            return Err(Error::MalformedRequest("path"));
        }
        let path = match target.split_once('?') {
            Some((path, _query)) => path.to_string(),
            None => target.to_string(),
        };

        let version = request.next().ok_or(Error::MalformedRequest("version"))?;
        let version = Version::try_from(version)?;

        let mut headers = HashMap::new();

        loop {
            let header = Self::read_line(&mut stream, max_size).await?;
            if header.is_empty() {
                break;
            }

            let (name, value) = header
                .split_once(':')
                .ok_or(Error::MalformedRequest("header"))?;
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }

        Ok(Head {
            method,
            path,
            version,
            headers,
        })
    }

    /// Parse the `Cookie` header.
    pub fn cookies(&self) -> Cookies {
        match self.header("cookie") {
            Some(cookie) => Cookies::parse(cookie),
            None => Cookies::default(),
        }
    }

    /// Request path without the query string, e.g. `/dashboard/chat/a--b`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Is this a GET request?
    pub fn get(&self) -> bool {
        self.method() == &Method::Get
    }

    /// Is this a POST request?
    pub fn post(&self) -> bool {
        self.method() == &Method::Post
    }

    /// The size of the request body in bytes, from the `Content-Length` header.
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")?.parse::<usize>().ok()
    }

    /// Get a header value by name. Case insensitive.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Should the connection stay open after the response?
    pub fn keep_alive(&self) -> bool {
        let connection = self.header("connection").map(|c| c.to_lowercase());

        match self.version {
            Version::Http11 => connection.map(|c| !c.contains("close")).unwrap_or(true),
            Version::Http10 => connection.map(|c| c.contains("keep-alive")).unwrap_or(false),
        }
    }

    /// Read a line from the stream, parsing out \r\n.
    async fn read_line(
        mut stream: impl AsyncRead + Unpin,
        mut bytes_remaining: usize,
    ) -> Result<String, Error> {
        let mut buf = Vec::new();

        loop {
            if bytes_remaining == 0 {
                return Err(Error::MalformedRequest("header too large"));
            }

            // `stream` should be buffered.
            let b = stream.read_u8().await?;
            bytes_remaining -= 1;

            match b {
                b'\r' => {
                    if stream.read_u8().await? != b'\n' {
                        return Err(Error::MalformedRequest("cr without nl"));
                    }
                    break;
                }
                b'\n' => return Err(Error::MalformedRequest("nl before cr")),
                b => buf.push(b),
            }
        }

        Ok(String::from_utf8(buf)?)
    }
}
