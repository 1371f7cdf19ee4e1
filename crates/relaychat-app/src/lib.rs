//! Application layer for relaychat
//!
//! Pure state machine and generic runtime for the chat client, so the same
//! routing and navigation code runs in the terminal and in simulation.
//!
//! # Components
//!
//! - [`App`]: state machine (event routing, buffer navigation, input line)
//! - [`UpdateSender`]/[`UpdateReceiver`]: serialized update queue feeding the
//!   UI task from other tasks and threads
//! - [`Driver`]: trait for platform-specific I/O (render surface, transport)
//! - [`Runtime`]: generic orchestration loop using a Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod queue;
mod runtime;

pub use action::{AppAction, OutboundMessage, RenderRequest};
pub use app::App;
pub use driver::Driver;
pub use event::{AppEvent, InboundEvent};
pub use input::{InputCommand, InputLine, KeyInput};
pub use queue::{QueueError, UpdateReceiver, UpdateSender, update_queue};
pub use runtime::Runtime;
