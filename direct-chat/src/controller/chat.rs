//! `GET /dashboard/chat/:chat_id`
use std::sync::Arc;

use tracing::{debug, warn};

use super::{Controller, Error, PageController};
use crate::async_trait;
use crate::chat::{authorize, fetch_history};
use crate::http::{Request, Response};
use crate::store::{MessageStore, UserStore};
use crate::view::ChatPage;

/// Renders a chat between the signed in user and one other user.
///
/// A chat the viewer can't see, and one whose history can't be read,
/// both render as "not found".
pub struct ChatController {
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserStore>,
}

impl ChatController {
    pub fn new(messages: Arc<dyn MessageStore>, users: Arc<dyn UserStore>) -> Self {
        Self { messages, users }
    }
}

#[async_trait]
impl Controller for ChatController {
    async fn handle(&self, request: &Request) -> Result<Response, Error> {
        PageController::handle(self, request).await
    }
}

#[async_trait]
impl PageController for ChatController {
    async fn get(&self, request: &Request) -> Result<Response, Error> {
        let chat_id = match request.parameter("chat_id") {
            Ok(chat_id) => chat_id.unwrap_or_default(),
            Err(err) => {
                debug!("chat id denied: {}", err);
                return Ok(Response::not_found());
            }
        };

        let authorized = match authorize(request.session(), &chat_id) {
            Ok(authorized) => authorized,
            Err(denied) => {
                debug!("chat \"{}\" denied: {}", chat_id, denied);
                return Ok(Response::not_found());
            }
        };

        let (partner, history) = tokio::join!(
            self.users.user(authorized.partner_id()),
            fetch_history(self.messages.as_ref(), &authorized.chat),
        );

        let Some(partner) = partner? else {
            debug!("chat \"{}\": user \"{}\" doesn't exist", chat_id, authorized.partner_id());
            return Ok(Response::not_found());
        };

        let messages = match history {
            Ok(messages) => messages,
            Err(err) => {
                warn!("chat \"{}\": {}", chat_id, err);
                return Ok(Response::not_found());
            }
        };

        let html = ChatPage {
            chat: &authorized.chat,
            viewer: authorized.viewer,
            partner: &partner,
            messages: &messages,
        }
        .render()?;

        Ok(Response::new().html(html))
    }
}
