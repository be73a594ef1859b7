//! Widget client for the sensei-bot chat funnel.
//!
//! The server keeps only a best-effort session cache, so the widget is the
//! durable holder of `(state, data)`: it persists every `nextState`/`nextData`
//! it receives and echoes them back on the following request.

pub mod storage;
pub mod transport;
pub mod widget;

pub use storage::{ClientStorage, FileStorage, MemoryStorage};
pub use transport::{ClientError, HttpTransport, Transport};
pub use widget::{Reply, Widget};
