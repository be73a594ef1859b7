//! Request/response envelope exchanged with the widget.

use serde::{Deserialize, Deserializer, Serialize};

use crate::message::OutgoingMessage;
use crate::state::SessionData;

/// Inbound chat turn.
///
/// `clientState`/`clientData` are the client's echo of the previous
/// `nextState`/`nextData`. `init` is the out-of-band start signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_data: Option<SessionData>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub init: bool,
}

// Widgets send `null` for fields they have not populated yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    pub fn init(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            init: true,
            ..Default::default()
        }
    }

    pub fn message(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_client_state(mut self, state: impl Into<String>, data: Option<SessionData>) -> Self {
        self.client_state = Some(state.into());
        self.client_data = data;
        self
    }
}

/// Outbound result of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub messages: Vec<OutgoingMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    pub next_state: String,
    pub next_data: SessionData,
}
