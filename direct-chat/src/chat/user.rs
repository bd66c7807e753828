use serde::{Deserialize, Serialize};

/// A user profile, as stored under `user:{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Profile picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl User {
    pub fn new(id: impl ToString, name: impl ToString, email: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl ToString) -> Self {
        self.image = Some(image.to_string());
        self
    }

    /// Store key of this user's record.
    pub fn key(id: &str) -> String {
        format!("user:{}", id)
    }
}
