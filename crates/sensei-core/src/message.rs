//! Chat bubbles produced by the engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Bot,
    User,
}

/// A single chat bubble with optional quick-reply buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub from: Speaker,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<String>>,
}

impl OutgoingMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            from: Speaker::Bot,
            text: text.into(),
            buttons: None,
        }
    }

    pub fn with_buttons<I, S>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons = Some(buttons.into_iter().map(Into::into).collect());
        self
    }

    pub fn buttons(&self) -> &[String] {
        self.buttons.as_deref().unwrap_or_default()
    }
}
