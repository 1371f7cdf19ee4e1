//! Terminal UI for relaychat
//!
//! A thin shell over [`relaychat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`relaychat_app::Runtime`].
//!
//! This crate only handles terminal rendering, the system clock and the
//! loopback transport the binary runs against.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod system_env;
pub mod terminal;
pub mod transport;
pub mod ui;

pub use relaychat_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
pub use transport::{Chatter, LoopbackConfig, TransportHandle, spawn_loopback};
