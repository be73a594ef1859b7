//! Conversation state: the FSM node identifier and the per-visitor session.
//!
//! `StateId` is the trust boundary for client-echoed state. Parsing never
//! fails; anything outside the known set becomes [`StateId::Unrecognized`],
//! which the engine routes to the recovery prompt.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Visitor-provided facts collected along the funnel.
pub type SessionData = BTreeMap<String, String>;

// ─── Data keys ────────────────────────────────────────────────

pub const KEY_GOAL: &str = "goal";
pub const KEY_BUCKET: &str = "bucket";
pub const KEY_PAIN: &str = "pain";
pub const KEY_YEARS: &str = "years";
pub const KEY_EMAIL: &str = "email";
/// Never collected by the funnel itself; passed through to checkout if present.
pub const KEY_FIRST_NAME: &str = "first_name";

// ─── StateId ──────────────────────────────────────────────────

/// Node of the conversation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateId {
    Consent,
    Goal,
    Pain,
    Years,
    Email,
    Prescribe,
    /// Terminal: checkout link handed out.
    Checkout,
    Freebie,
    FreebieEmail,
    /// Terminal: lead magnet requested.
    End,
    /// Any identifier outside the known set (corrupted or tampered echo).
    #[serde(other)]
    Unrecognized,
}

impl StateId {
    pub const ALL: [StateId; 11] = [
        StateId::Consent,
        StateId::Goal,
        StateId::Pain,
        StateId::Years,
        StateId::Email,
        StateId::Prescribe,
        StateId::Checkout,
        StateId::Freebie,
        StateId::FreebieEmail,
        StateId::End,
        StateId::Unrecognized,
    ];

    /// Wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateId::Consent => "consent",
            StateId::Goal => "goal",
            StateId::Pain => "pain",
            StateId::Years => "years",
            StateId::Email => "email",
            StateId::Prescribe => "prescribe",
            StateId::Checkout => "checkout",
            StateId::Freebie => "freebie",
            StateId::FreebieEmail => "freebie_email",
            StateId::End => "end",
            StateId::Unrecognized => "unrecognized",
        }
    }

    /// Lenient parse used at the trust boundary. Never fails.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "consent" => StateId::Consent,
            "goal" => StateId::Goal,
            "pain" => StateId::Pain,
            "years" => StateId::Years,
            "email" => StateId::Email,
            "prescribe" => StateId::Prescribe,
            "checkout" => StateId::Checkout,
            "freebie" => StateId::Freebie,
            "freebie_email" => StateId::FreebieEmail,
            "end" => StateId::End,
            _ => StateId::Unrecognized,
        }
    }

    /// Whether the funnel has finished on this node.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StateId::Checkout | StateId::End)
    }
}

impl FromStr for StateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Session ──────────────────────────────────────────────────

/// Per-visitor `(state, data)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub state: StateId,
    #[serde(default)]
    pub data: SessionData,
}

impl Session {
    /// A brand-new visitor: `{consent, {}}`.
    pub fn fresh() -> Self {
        Self {
            state: StateId::Consent,
            data: SessionData::new(),
        }
    }

    /// Rebuild a session from a client echo. Unknown state names are kept as
    /// [`StateId::Unrecognized`] so the engine can recover.
    pub fn from_echo(state: &str, data: Option<SessionData>) -> Self {
        Self {
            state: StateId::parse_lenient(state),
            data: data.unwrap_or_default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub(crate) fn set(&mut self, key: &str, value: impl Into<String>) {
        self.data.insert(key.to_string(), value.into());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::fresh()
    }
}
