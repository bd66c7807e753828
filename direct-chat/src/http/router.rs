//! HTTP request routing.
use super::{Error, Handler, Params};
use crate::colors::MaybeColorize;

use regex::RegexSet;
use tracing::info;

pub struct Router {
    regex: RegexSet,
    handlers: Vec<Handler>,
}

impl Router {
    pub fn new(handlers: Vec<Handler>) -> Result<Self, Error> {
        let regex = RegexSet::new(handlers.iter().map(|h| h.regex().as_str()))?;

        Ok(Self { regex, handlers })
    }

    /// Find the handler for this path. When several routes match,
    /// the one with the most literal segments wins.
    pub fn find(&self, path: &str) -> Option<(&Handler, Params)> {
        let handler = self
            .regex
            .matches(path)
            .into_iter()
            .map(|i| &self.handlers[i])
            .max_by_key(|h| (h.literal_segments(), h.path().len()))?;

        let params = handler.params(path)?;

        Some((handler, params))
    }

    pub fn log_routes(&self) {
        let mut handlers = self.handlers.iter().collect::<Vec<_>>();
        handlers.sort_by_key(|h| h.path());

        for handler in handlers {
            info!(
                ">> {} => {}",
                handler.path().purple(),
                handler.controller_name().green()
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::async_trait;
    use crate::controller::{Controller, Error as ControllerError};
    use crate::http::{Request, Response};

    struct ChatsController;
    struct SettingsController;

    #[async_trait]
    impl Controller for ChatsController {
        async fn handle(&self, _request: &Request) -> Result<Response, ControllerError> {
            Ok(Response::new().text("chats"))
        }
    }

    #[async_trait]
    impl Controller for SettingsController {
        async fn handle(&self, _request: &Request) -> Result<Response, ControllerError> {
            Ok(Response::new().text("settings"))
        }
    }

    fn router() -> Router {
        Router::new(vec![
            ChatsController.route("/dashboard/chat/:chat_id").unwrap(),
            SettingsController.route("/dashboard/chat/settings").unwrap(),
        ])
        .expect("to compile")
    }

    #[test]
    fn test_find() {
        let router = router();

        let (handler, params) = router.find("/dashboard/chat/a--b").expect("to match");
        assert_eq!(handler.path(), "/dashboard/chat/:chat_id");
        assert_eq!(params.get("chat_id").map(|s| s.as_str()), Some("a--b"));

        let (handler, _) = router.find("/dashboard/chat/settings").expect("to match");
        assert_eq!(handler.path(), "/dashboard/chat/settings");
    }

    #[test]
    fn test_no_match() {
        let router = router();

        assert!(router.find("/dashboard/chat/").is_none());
        assert!(router.find("/dashboard/chat/a/b").is_none());
        assert!(router.find("/dashboard").is_none());
    }

    #[test]
    fn test_invalid_route() {
        assert!(ChatsController.route("dashboard").is_err());
        assert!(ChatsController.route("/chat/:").is_err());
        assert!(ChatsController.route("/chat/:1d").is_err());
    }
}
