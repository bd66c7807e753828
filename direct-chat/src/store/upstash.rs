//! Upstash Redis over its REST API.
//!
//! Every command is a `POST` to the database URL with the command and its
//! arguments as a JSON array, e.g. `["ZRANGE", "chat:a--b:messages", "0", "-1"]`.
//! The reply is `{"result": ...}` on success and `{"error": "..."}` on failure.
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Error, MessageStore, UserStore};
use crate::chat::User;
use crate::colors::MaybeColorize;
use crate::config::Config;

/// Upstash REST client.
#[derive(Debug, Clone)]
pub struct Upstash {
    http: reqwest::Client,
    url: Url,
    token: String,
}

#[derive(Deserialize)]
struct Reply {
    #[serde(default)]
    result: Value,
    error: Option<String>,
}

impl Upstash {
    pub fn new(url: &str, token: impl ToString, timeout: std::time::Duration) -> Result<Self, Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            url: Url::parse(url)?,
            token: token.to_string(),
        })
    }

    /// Client for the database in the `[store]` section of the config.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        match (&config.store.url, &config.store.token) {
            (Some(url), Some(token)) => Self::new(url, token, config.store.timeout),
            _ => Err(Error::NotConfigured),
        }
    }

    /// Run a command and return its result.
    async fn command(&self, args: &[&str]) -> Result<Value, Error> {
        debug!("{} {}", "upstash".purple(), args.first().copied().unwrap_or_default());

        let response = self
            .http
            .post(self.url.clone())
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let code = response.status();
        let body = response.text().await?;

        let reply: Reply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !code.is_success() => {
                return Err(Error::Status {
                    code: code.as_u16(),
                    body,
                })
            }
            Err(err) => return Err(err.into()),
        };

        match reply.error {
            Some(err) => Err(Error::Command(err)),
            None if !code.is_success() => Err(Error::Status {
                code: code.as_u16(),
                body,
            }),
            None => Ok(reply.result),
        }
    }
}

#[async_trait]
impl MessageStore for Upstash {
    async fn range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, Error> {
        let (start, stop) = (start.to_string(), stop.to_string());

        match self.command(&["ZRANGE", key, &start, &stop]).await? {
            Value::Array(members) => members
                .into_iter()
                .map(|member| match member {
                    Value::String(member) => Ok(member),
                    _ => Err(Error::UnexpectedReply("ZRANGE")),
                })
                .collect(),
            Value::Null => Ok(vec![]),
            _ => Err(Error::UnexpectedReply("ZRANGE")),
        }
    }
}

#[async_trait]
impl UserStore for Upstash {
    async fn user(&self, id: &str) -> Result<Option<User>, Error> {
        match self.command(&["GET", &User::key(id)]).await? {
            Value::String(record) => Ok(Some(serde_json::from_str(&record)?)),
            Value::Null => Ok(None),
            _ => Err(Error::UnexpectedReply("GET")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::http::{Request, Response};
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Serve one canned reply per request and hand the request bodies back.
    async fn fake_upstash(
        replies: Vec<(u16, String)>,
    ) -> (Upstash, mpsc::UnboundedReceiver<(Option<String>, Value)>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (code, body) in replies {
                let (stream, _) = listener.accept().await.unwrap();
                let mut stream = BufReader::new(stream);
                let request = Request::read(&mut stream).await.unwrap();
                let command = serde_json::from_slice(request.body()).unwrap();
                tx.send((request.header("authorization").cloned(), command))
                    .unwrap();

                let response = Response::new()
                    .code(code)
                    .text(body)
                    .header("connection", "close");
                response.send(&mut stream).await.unwrap();
                stream.flush().await.unwrap();
            }
        });

        let client = Upstash::new(
            &format!("http://{}", addr),
            "secret",
            Duration::from_secs(5),
        )
        .unwrap();

        (client, rx)
    }

    #[tokio::test]
    async fn test_range() {
        let (client, mut commands) =
            fake_upstash(vec![(200, json!({"result": ["b", "a"]}).to_string())]).await;

        let members = client.range("chat:a--b:messages", 0, -1).await.unwrap();
        assert_eq!(members, vec!["b", "a"]);

        let (auth, command) = commands.recv().await.unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer secret"));
        assert_eq!(command, json!(["ZRANGE", "chat:a--b:messages", "0", "-1"]));
    }

    #[tokio::test]
    async fn test_user() {
        let record = json!({"id": "b", "name": "Bob", "email": "bob@example.com"}).to_string();
        let (client, mut commands) = fake_upstash(vec![
            (200, json!({ "result": record }).to_string()),
            (200, json!({ "result": null }).to_string()),
        ])
        .await;

        let user = client.user("b").await.unwrap().expect("user");
        assert_eq!(user.name, "Bob");
        assert_eq!(commands.recv().await.unwrap().1, json!(["GET", "user:b"]));

        assert!(client.user("c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_errors() {
        let (client, _commands) = fake_upstash(vec![
            (400, json!({"error": "WRONGTYPE"}).to_string()),
            (401, "Unauthorized".to_string()),
            (200, json!({"result": 5}).to_string()),
        ])
        .await;

        assert!(matches!(
            client.range("k", 0, -1).await,
            Err(Error::Command(err)) if err == "WRONGTYPE"
        ));
        assert!(matches!(
            client.range("k", 0, -1).await,
            Err(Error::Status { code: 401, .. })
        ));
        assert!(matches!(
            client.range("k", 0, -1).await,
            Err(Error::UnexpectedReply("ZRANGE"))
        ));
    }

    #[test]
    fn test_not_configured() {
        let mut config = Config::default();
        config.store.token = None;
        assert!(matches!(
            Upstash::from_config(&config),
            Err(Error::NotConfigured)
        ));
    }
}
