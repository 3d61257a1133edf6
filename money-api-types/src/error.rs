use serde::{Deserialize, Serialize};

/// Public API error entry.
///
/// `user_message` is localized for display to end users, `dev_message` is the
/// raw diagnostic text and is never localized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    user_message: String,
    dev_message: String,
}

impl ErrorEntry {
    pub fn new(user_message: impl Into<String>, dev_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            dev_message: dev_message.into(),
        }
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn dev_message(&self) -> &str {
        &self.dev_message
    }
}
