//! Data models for the mailbox engine.

mod compose;
mod mailbox;

pub use compose::{ComposeState, DEFAULT_RECIPIENT, SENDER_EMAIL, SENDER_NAME, recipient_email};
pub use mailbox::{Mailbox, SelectionOutcome};
