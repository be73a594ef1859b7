//! State synchronization between the widget and the engine.
//!
//! Resolution order for the session used on a turn:
//! 1. `init` requests start from a fresh session, ignoring everything else.
//! 2. A client echo (`clientState` + `clientData`) replaces any stored copy.
//!    The two are never merged.
//! 3. Otherwise the store is consulted by session id; a miss starts fresh.
//!
//! The resulting session is written back to the store and returned verbatim
//! so the client can persist and echo it. A blank session id is anonymous:
//! the store is neither read nor written for that turn.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::checkout::CheckoutError;
use crate::engine::{Engine, Input};
use crate::state::{Session, SessionData, StateId};
use crate::store::SessionStore;
use crate::wire::{ChatRequest, ChatResponse};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("checkout link construction failed: {0}")]
    Checkout(#[from] CheckoutError),
}

#[derive(Clone)]
pub struct ChatService {
    engine: Arc<Engine>,
    store: Arc<dyn SessionStore>,
}

impl ChatService {
    pub fn new(engine: Engine, store: Arc<dyn SessionStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
        }
    }

    /// Run one chat turn.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let ChatRequest {
            session_id,
            message,
            client_state,
            client_data,
            init,
        } = request;

        let (session, input) = if init {
            (Session::fresh(), Input::Init)
        } else {
            let session = self.resolve(&session_id, client_state, client_data).await;
            (session, Input::Text(message))
        };

        let from = session.state;
        let turn = self.engine.advance(session, &input)?;
        let anonymous = is_anonymous(&session_id);

        if from == StateId::Unrecognized {
            info!(session_id = %session_id, "unrecognized state, conversation restarted");
        }
        debug!(
            session_id = %session_id,
            from = %from,
            to = %turn.session.state,
            terminal = turn.session.state.is_terminal(),
            checkout = turn.checkout_url.is_some(),
            anonymous,
            "chat turn"
        );

        if !anonymous {
            if let Err(e) = self.store.put(&session_id, &turn.session).await {
                warn!(session_id = %session_id, "failed to cache session: {:#}", e);
            }
        }

        Ok(ChatResponse {
            messages: turn.messages,
            checkout_url: turn.checkout_url.map(String::from),
            next_state: turn.session.state.as_str().to_string(),
            next_data: turn.session.data,
        })
    }

    async fn resolve(
        &self,
        session_id: &str,
        client_state: Option<String>,
        client_data: Option<SessionData>,
    ) -> Session {
        if let Some(state) = client_state {
            return Session::from_echo(&state, client_data);
        }
        if is_anonymous(session_id) {
            return Session::fresh();
        }
        match self.store.get(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => Session::fresh(),
            Err(e) => {
                warn!(session_id = %session_id, "session store lookup failed: {:#}", e);
                Session::fresh()
            }
        }
    }
}

fn is_anonymous(session_id: &str) -> bool {
    session_id.trim().is_empty()
}
