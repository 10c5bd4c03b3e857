//! Message types for mailbox events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.
//! User intent and asynchronous completions arrive through the same enum so
//! the reducer is the single writer of the mailbox state.

use mailpane_core::{Email, EmailId, EmailPatch, Tab};

/// Mailbox events (user intent and async completions).
#[derive(Debug, Clone)]
pub enum Message {
    /// Engine started; issue the initial list fetch.
    Started,

    // List
    /// A tab was selected.
    TabSelected(Tab),
    /// A search keystroke changed the raw query value.
    QueryChanged(String),
    /// The debounce quiet period elapsed for a given keystroke epoch.
    QuerySettled {
        /// Epoch captured when the debounce timer was scheduled.
        epoch: u64,
    },
    /// A list fetch completed.
    ListLoaded {
        /// Epoch captured when the fetch was issued; stale epochs are discarded.
        epoch: u64,
        /// Fetched emails, or the error message of a failed call.
        result: Result<Vec<Email>, String>,
    },

    // Selection / detail
    /// An email row was selected (or the selection was cleared).
    EmailSelected(Option<EmailId>),
    /// A detail fetch completed.
    DetailLoaded {
        /// Selection id the fetch was issued for.
        id: EmailId,
        /// Fetched record, or the error message of a failed call.
        result: Result<Email, String>,
    },

    // Mutations
    /// Request a partial update of an email.
    UpdateRequested {
        /// Target record.
        id: EmailId,
        /// Fields to change.
        patch: EmailPatch,
    },
    /// An update call completed.
    EmailUpdated {
        /// Target record.
        id: EmailId,
        /// Whether the issued patch touched tab-membership fields.
        refresh_list: bool,
        /// Resulting full record, or the error message of a failed call.
        result: Result<Email, String>,
    },
    /// Request deletion of an email.
    DeleteRequested(EmailId),
    /// A delete call completed.
    EmailDeleted {
        /// Target record.
        id: EmailId,
        /// Success, or the error message of a failed call.
        result: Result<(), String>,
    },

    // Composer
    /// Composer form events.
    Compose(ComposeMessage),
    /// A create (send) call completed.
    EmailCreated {
        /// Created record with its backend-assigned id, or the error message.
        result: Result<Email, String>,
    },
}

/// Messages for the composer form.
#[derive(Debug, Clone)]
pub enum ComposeMessage {
    /// Open the composer with a fresh draft.
    Open,
    /// Open the composer prefilled as a reply to the selected detail.
    Reply,
    /// Recipient display name changed.
    RecipientChanged(String),
    /// Subject line changed.
    SubjectChanged(String),
    /// Rich-text body buffer changed.
    BodyChanged(String),
    /// Submit the draft.
    Send,
    /// Discard the draft and close the composer.
    Close,
}
