use std::fmt;

use serde::{Deserialize, Serialize};

/// Sanitized registration values, ready for the store.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The `{"user": {...}}` wrapper used by every user payload in the API.
#[derive(Serialize, Deserialize, Debug)]
pub struct UserEnvelope<T> {
    pub user: T,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct UserRes {
    pub email: String,
    pub token: String,
    pub username: String,
    // no profile feature yet; always null
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl UserRes {
    pub fn new(user: entity::user::Model, token: String) -> Self {
        UserRes {
            email: user.email,
            token,
            username: user.username,
            bio: None,
            image: None,
        }
    }
}
