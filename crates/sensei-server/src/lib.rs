//! sensei-server: HTTP boundary for the sensei-bot chat funnel.
//!
//! Routes:
//!   POST /api/chat    one chat turn (`ChatRequest` → `ChatResponse`)
//!   GET  /api/health  liveness
//!
//! Preflight `OPTIONS` requests are answered by the CORS layer.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use sensei_core::{ChatService, Engine, MemorySessionStore};

pub use config::{ConfigError, ServerConfig};
pub use router::build_router;

/// Chat service backed by a process-local session cache.
pub fn memory_chat_service(config: &ServerConfig) -> ChatService {
    ChatService::new(
        Engine::new(config.catalog.clone()),
        Arc::new(MemorySessionStore::new()),
    )
}

/// Router wired from configuration, ready to serve.
pub fn app(config: &ServerConfig) -> axum::Router {
    build_router(memory_chat_service(config), config.allowed_origins.clone())
}
