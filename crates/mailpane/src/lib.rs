//! # mailpane
//!
//! UI-agnostic mailbox state synchronization engine.
//!
//! Keeps a list view, a detail view, and a composer consistent with a
//! remote, authoritative backend. Built as a pure reducer over a single
//! [`Mailbox`] state struct (Elm-style) plus a tokio [`Engine`] that runs
//! debounce timers and backend calls as effects. Rendering layers dispatch
//! [`Message`]s through an [`EngineHandle`] and observe state snapshots on
//! a watch channel; the engine itself draws nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod controller;
mod engine;
mod message;
mod model;

pub use controller::Effect;
pub use engine::{DEBOUNCE_QUIET_PERIOD, Engine, EngineHandle};
pub use message::{ComposeMessage, Message};
pub use model::{
    ComposeState, DEFAULT_RECIPIENT, Mailbox, SENDER_EMAIL, SENDER_NAME, SelectionOutcome,
    recipient_email,
};
