//! The chat page.
use std::fmt::Write;

use super::escape;
use crate::chat::{ChatId, Message, User};

/// Where the input box posts new messages.
pub const SEND_MESSAGE_PATH: &str = "/api/message/send";

/// Everything the chat page shows.
#[derive(Debug)]
pub struct ChatPage<'a> {
    pub chat: &'a ChatId,
    pub viewer: &'a User,
    pub partner: &'a User,
    /// Oldest first.
    pub messages: &'a [Message],
}

impl ChatPage<'_> {
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut html = String::new();

        write!(
            html,
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>Chat with {}</title></head><body>",
            escape(&self.partner.name)
        )?;
        write!(html, "<main class=\"chat\">")?;
        self.header(&mut html)?;
        self.messages(&mut html)?;
        self.input(&mut html)?;
        write!(html, "</main></body></html>")?;

        Ok(html)
    }

    fn header(&self, html: &mut String) -> std::fmt::Result {
        write!(html, "<header class=\"chat-partner\">")?;

        if let Some(ref image) = self.partner.image {
            write!(
                html,
                "<img class=\"avatar\" src=\"{}\" alt=\"{} profile picture\" referrerpolicy=\"no-referrer\">",
                escape(image),
                escape(&self.partner.name)
            )?;
        }

        write!(
            html,
            "<div><span class=\"name\">{}</span><span class=\"email\">{}</span></div></header>",
            escape(&self.partner.name),
            escape(&self.partner.email)
        )
    }

    fn messages(&self, html: &mut String) -> std::fmt::Result {
        write!(
            html,
            "<ol id=\"messages\" data-chat-id=\"{}\" data-session-id=\"{}\">",
            escape(self.chat.as_str()),
            escape(&self.viewer.id)
        )?;

        for (i, message) in self.messages.iter().enumerate() {
            let mine = message.sender_id == self.viewer.id;
            let last_of_run = self
                .messages
                .get(i + 1)
                .map_or(true, |next| next.sender_id != message.sender_id);

            write!(
                html,
                "<li class=\"message {}\" data-message-id=\"{}\"><p>{}<time>{}</time></p>",
                if mine { "mine" } else { "theirs" },
                escape(&message.id),
                escape(&message.text),
                sent_at(message)
            )?;

            if last_of_run {
                let sender = if mine { self.viewer } else { self.partner };
                avatar(html, sender)?;
            }

            write!(html, "</li>")?;
        }

        write!(html, "</ol>")
    }

    fn input(&self, html: &mut String) -> std::fmt::Result {
        write!(
            html,
            "<form class=\"chat-input\" method=\"post\" action=\"{}\">\
            <input type=\"hidden\" name=\"chatId\" value=\"{}\">\
            <textarea name=\"text\" rows=\"1\" placeholder=\"Message {}\"></textarea>\
            <button type=\"submit\">Post</button></form>",
            SEND_MESSAGE_PATH,
            escape(self.chat.as_str()),
            escape(&self.partner.name)
        )
    }
}

fn avatar(html: &mut String, user: &User) -> std::fmt::Result {
    match user.image {
        Some(ref image) => write!(
            html,
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\" referrerpolicy=\"no-referrer\">",
            escape(image),
            escape(&user.name)
        ),
        None => write!(
            html,
            "<span class=\"avatar\">{}</span>",
            escape(&user.name.chars().take(1).collect::<String>())
        ),
    }
}

/// `HH:MM` in UTC.
fn sent_at(message: &Message) -> String {
    match message.sent_at() {
        Some(time) => format!("{:02}:{:02}", time.hour(), time.minute()),
        None => String::from("--:--"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn message(id: &str, sender: &str, text: &str, timestamp: i64) -> Message {
        Message {
            id: id.to_string(),
            sender_id: sender.to_string(),
            text: text.to_string(),
            timestamp,
        }
    }

    fn users() -> (User, User) {
        (
            User::new("a", "Ann", "ann@example.com").with_image("https://img/a.png"),
            User::new("b", "Bob <3", "bob@example.com"),
        )
    }

    #[test]
    fn test_render() {
        let chat = ChatId::parse("a--b").unwrap();
        let (ann, bob) = users();
        let messages = vec![
            message("m1", "a", "hi", 0),
            message("m2", "a", "you there?", 60_000),
            message("m3", "b", "<b>yes</b>", 13 * 3_600_000 + 5 * 60_000),
        ];

        let html = ChatPage {
            chat: &chat,
            viewer: &ann,
            partner: &bob,
            messages: &messages,
        }
        .render()
        .unwrap();

        assert!(html.contains("<span class=\"name\">Bob &lt;3</span>"));
        assert!(html.contains("data-chat-id=\"a--b\" data-session-id=\"a\""));
        assert!(html.contains("&lt;b&gt;yes&lt;/b&gt;"));
        assert!(!html.contains("<b>yes</b>"));
        assert!(html.contains("placeholder=\"Message Bob &lt;3\""));
        assert!(html.contains("action=\"/api/message/send\""));

        assert_eq!(html.matches("class=\"message mine\"").count(), 2);
        assert_eq!(html.matches("class=\"message theirs\"").count(), 1);
        assert!(html.contains("<time>00:00</time>"));
        assert!(html.contains("<time>13:05</time>"));

        // one avatar per run: Ann's after m2, Bob's initial after m3
        assert_eq!(html.matches("src=\"https://img/a.png\" alt=\"Ann\"").count(), 1);
        assert!(html.contains("<span class=\"avatar\">B</span>"));

        let first = html.find("data-message-id=\"m1\"").unwrap();
        let third = html.find("data-message-id=\"m3\"").unwrap();
        assert!(first < third);
    }

    #[test]
    fn test_empty_history() {
        let chat = ChatId::parse("a--b").unwrap();
        let (ann, bob) = users();

        let html = ChatPage {
            chat: &chat,
            viewer: &bob,
            partner: &ann,
            messages: &[],
        }
        .render()
        .unwrap();

        assert!(html.contains("data-session-id=\"b\"></ol>"));
        assert!(html.contains("alt=\"Ann profile picture\""));
    }
}
