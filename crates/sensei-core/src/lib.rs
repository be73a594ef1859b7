//! Sensei-bot conversation core
//!
//! A scripted sales-funnel conversation: the visitor answers a fixed sequence
//! of prompts, the engine classifies their goal into a product bucket, pitches
//! the matching product and finally hands back a checkout link.
//!
//! ```text
//! consent ──► goal ──► pain ──► years ──► email ──► prescribe ──► checkout*
//!    │                                                 ▲   │
//!    │                                                 └───┘ (re-pitch)
//!    └──► freebie ──► freebie_email ──► end*
//! ```
//!
//! The [`engine`] is pure; [`service::ChatService`] wraps it with the
//! client-authoritative state synchronization and the best-effort
//! [`store::SessionStore`].

pub mod bucket;
pub mod catalog;
pub mod checkout;
pub mod engine;
pub mod message;
pub mod script;
pub mod service;
pub mod state;
pub mod store;
pub mod wire;

pub use bucket::Bucket;
pub use catalog::{Catalog, Product};
pub use checkout::{build_checkout_link, CheckoutError};
pub use engine::{Engine, Input, Turn};
pub use message::{OutgoingMessage, Speaker};
pub use service::{ChatError, ChatService};
pub use state::{Session, SessionData, StateId};
pub use store::{MemorySessionStore, SessionStore};
pub use wire::{ChatRequest, ChatResponse};
