//! The chat widget: owns the authoritative conversation state between
//! requests and echoes it back on every turn.
//!
//! Requests are strictly sequential; callers must not overlap `send` calls
//! for the same widget.

use std::sync::Arc;

use sensei_core::{ChatRequest, ChatResponse, OutgoingMessage, SessionData};
use tracing::warn;
use uuid::Uuid;

use crate::storage::{ClientStorage, DATA_KEY, SESSION_ID_KEY, STATE_KEY};
use crate::transport::{ClientError, Transport};

pub const CONNECTION_ERROR_TEXT: &str = "Connection error. Please try again.";
pub const UNEXPECTED_RESPONSE_TEXT: &str = "Unexpected server response.";

/// What to render after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub messages: Vec<OutgoingMessage>,
    pub checkout_url: Option<String>,
    /// False when the request failed and nothing was persisted.
    pub delivered: bool,
}

impl Reply {
    fn failed(text: &str) -> Self {
        Self {
            messages: vec![OutgoingMessage::bot(text)],
            checkout_url: None,
            delivered: false,
        }
    }

    /// Buttons offered by the last message, if any.
    pub fn buttons(&self) -> &[String] {
        self.messages
            .last()
            .map(OutgoingMessage::buttons)
            .unwrap_or_default()
    }
}

pub struct Widget {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn ClientStorage>,
}

impl Widget {
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn ClientStorage>) -> Self {
        Self { transport, storage }
    }

    /// Current session id, minting one if none is stored.
    pub fn session_id(&self) -> Result<String, ClientError> {
        if let Some(sid) = self.storage.get(SESSION_ID_KEY) {
            return Ok(sid);
        }
        let sid = Uuid::new_v4().to_string();
        self.storage.set(SESSION_ID_KEY, &sid)?;
        Ok(sid)
    }

    /// Forget state and data and start a new session id.
    pub fn reset(&self) -> Result<(), ClientError> {
        self.storage.remove(STATE_KEY)?;
        self.storage.remove(DATA_KEY)?;
        self.storage.remove(SESSION_ID_KEY)?;
        self.storage
            .set(SESSION_ID_KEY, &Uuid::new_v4().to_string())?;
        Ok(())
    }

    /// Start fresh: reset, then send the init signal without client state.
    pub async fn open(&self) -> Result<Reply, ClientError> {
        self.reset()?;
        let request = ChatRequest::init(self.session_id()?);
        self.exchange(request).await
    }

    /// Send typed text along with the persisted state.
    pub async fn send(&self, text: &str) -> Result<Reply, ClientError> {
        let mut request = ChatRequest::message(self.session_id()?, text);
        if let Some(state) = self.storage.get(STATE_KEY) {
            request = request.with_client_state(state, self.stored_data());
        }
        self.exchange(request).await
    }

    /// Press a quick-reply button. "Start" wipes local state first.
    pub async fn press(&self, label: &str) -> Result<Reply, ClientError> {
        if label.eq_ignore_ascii_case("start") {
            self.reset()?;
        }
        // The label then goes out as plain text on a fresh consent turn, which
        // is not "yes", so the visitor lands on the freebie offer.
        self.send(label).await
    }

    /// Persisted state name, if any.
    pub fn stored_state(&self) -> Option<String> {
        self.storage.get(STATE_KEY)
    }

    /// Persisted data map; unreadable JSON counts as absent.
    pub fn stored_data(&self) -> Option<SessionData> {
        let raw = self.storage.get(DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("discarding unreadable stored data: {}", e);
                None
            }
        }
    }

    async fn exchange(&self, request: ChatRequest) -> Result<Reply, ClientError> {
        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(ClientError::Connection(e)) => {
                warn!("chat request failed: {}", e);
                return Ok(Reply::failed(CONNECTION_ERROR_TEXT));
            }
            Err(ClientError::UnexpectedResponse(e)) => {
                warn!("chat response unreadable: {}", e);
                return Ok(Reply::failed(UNEXPECTED_RESPONSE_TEXT));
            }
            Err(e) => return Err(e),
        };
        self.persist(&response)?;

        let ChatResponse {
            messages,
            checkout_url,
            ..
        } = response;
        Ok(Reply {
            messages,
            checkout_url,
            delivered: true,
        })
    }

    fn persist(&self, response: &ChatResponse) -> Result<(), ClientError> {
        if !response.next_state.is_empty() {
            self.storage.set(STATE_KEY, &response.next_state)?;
        }
        let data = serde_json::to_string(&response.next_data).map_err(anyhow::Error::from)?;
        self.storage.set(DATA_KEY, &data)?;
        Ok(())
    }
}
