//! The per-request context the admin hooks receive.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::messages::{MessageLevel, MessageStorage};

/// The staff user performing an admin operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// The user's primary key.
    pub id: u64,
    /// The user's unique username.
    pub username: String,
}

impl AdminUser {
    /// Creates a new acting user.
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Returns the value stored in a foreign key column pointing at this user.
    pub fn reference(&self) -> Value {
        Value::from(self.id)
    }
}

/// One admin request: who is acting, and where operator messages go.
///
/// # Examples
///
/// ```
/// use basic_models_admin::request::{AdminRequest, AdminUser};
///
/// let mut request = AdminRequest::new(AdminUser::new(1, "editor"));
/// request.messages.info("Hello");
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AdminRequest {
    /// The acting user.
    pub user: AdminUser,
    /// Messages to show the operator on the next page.
    pub messages: MessageStorage,
}

impl AdminRequest {
    /// Creates a request for `user` with empty message storage.
    pub fn new(user: AdminUser) -> Self {
        Self {
            user,
            messages: MessageStorage::new(),
        }
    }

    /// Adds a message for the operator.
    pub fn message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.add(level, text);
    }
}
