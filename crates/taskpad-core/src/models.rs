//! Wire types shared between the service client and the controllers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The username/password pair proving identity to the remote service.
///
/// Forwarded verbatim on every request; exactly zero or one instance is
/// persisted at a time. The `Debug` impl masks the password so credentials
/// never leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Server-confirmed identity. Fetched from the service, never locally
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A task item. The `id` is assigned by the service; the client never
/// invents one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Partial update for `PUT /todos/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that flips `completed`, carrying the title through unchanged.
    pub fn toggle_of(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            completed: Some(!task.completed),
        }
    }
}
