//! Synchronization controller.
//!
//! A pure reducer over [`Mailbox`]: each [`Message`] mutates state and
//! returns the [`Effect`]s to run. The engine executes effects and feeds
//! their completions back in as messages, so every async result passes the
//! same apply-if-still-relevant checks:
//!
//! - keystrokes are debounced through `query_epoch`; only the timer that
//!   survives without being superseded commits the query
//! - list responses carry the `list_epoch` of their fetch; stale epochs are
//!   discarded so the latest-issued fetch wins
//! - detail responses are applied only while their id is still the selected
//!   id (last-selection-wins)

use mailpane_core::{EmailId, EmailPatch, NewEmail, Tab};
use tracing::warn;

use crate::message::{ComposeMessage, Message};
use crate::model::{Mailbox, SelectionOutcome};

/// Side effects requested by the reducer, executed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Wait out the debounce quiet period, then send
    /// [`Message::QuerySettled`] with the same epoch.
    Debounce {
        /// Keystroke epoch this timer belongs to.
        epoch: u64,
    },
    /// Fetch the list for `(tab, query)`; completes as [`Message::ListLoaded`].
    FetchList {
        /// Tab filter.
        tab: Tab,
        /// Trimmed query, `None` when empty (match all).
        query: Option<String>,
        /// List epoch this fetch belongs to.
        epoch: u64,
    },
    /// Fetch full detail; completes as [`Message::DetailLoaded`].
    FetchDetail {
        /// Selection id at issue time.
        id: EmailId,
    },
    /// Partial update; completes as [`Message::EmailUpdated`].
    Update {
        /// Target record.
        id: EmailId,
        /// Fields to change.
        patch: EmailPatch,
    },
    /// Delete; completes as [`Message::EmailDeleted`].
    Delete {
        /// Target record.
        id: EmailId,
    },
    /// Create; completes as [`Message::EmailCreated`].
    Create {
        /// Creation payload built from the draft.
        payload: NewEmail,
    },
}

impl Mailbox {
    /// Applies a message and returns the effects to execute.
    #[allow(clippy::too_many_lines)]
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Started => vec![self.issue_list_fetch()],

            Message::TabSelected(tab) => {
                if self.active_tab == tab {
                    return Vec::new();
                }
                self.active_tab = tab;
                vec![self.issue_list_fetch()]
            }

            Message::QueryChanged(query) => {
                self.pending_query = query;
                let epoch = self.next_query_epoch();
                vec![Effect::Debounce { epoch }]
            }

            Message::QuerySettled { epoch } => {
                // A newer keystroke reset the quiet period; this timer lost.
                if !self.query_epoch_is_current(epoch) {
                    return Vec::new();
                }
                let settled = self.pending_query.trim().to_string();
                if settled == self.query {
                    return Vec::new();
                }
                self.query = settled;
                vec![self.issue_list_fetch()]
            }

            Message::ListLoaded { epoch, result } => {
                if !self.list_epoch_is_current(epoch) {
                    return Vec::new();
                }
                self.is_loading_list = false;
                match result {
                    Ok(emails) => {
                        self.replace_list(emails);
                        match self.reconcile_selection() {
                            // Reassigned selection needs its detail; an
                            // unchanged one must not refetch.
                            SelectionOutcome::Selected(id) => {
                                self.is_loading_detail = true;
                                vec![Effect::FetchDetail { id }]
                            }
                            SelectionOutcome::Unchanged | SelectionOutcome::Cleared => Vec::new(),
                        }
                    }
                    Err(error) => {
                        warn!("List fetch failed: {error}");
                        Vec::new()
                    }
                }
            }

            Message::EmailSelected(Some(id)) => {
                if self.selected_id == Some(id) {
                    return Vec::new();
                }
                self.selected_id = Some(id);
                self.selected_detail = None;
                self.is_loading_detail = true;

                let mut effects = vec![Effect::FetchDetail { id }];
                // Opening an unread email marks it read; the row indicator
                // clears on merge without waiting for a list refetch.
                if self.email(id).is_some_and(|e| !e.is_read) {
                    effects.push(Effect::Update {
                        id,
                        patch: EmailPatch::read(true),
                    });
                }
                effects
            }

            Message::EmailSelected(None) => {
                self.selected_id = None;
                self.selected_detail = None;
                self.is_loading_detail = false;
                Vec::new()
            }

            Message::DetailLoaded { id, result } => {
                // Selection moved on while this fetch was in flight.
                if self.selected_id != Some(id) {
                    return Vec::new();
                }
                self.is_loading_detail = false;
                match result {
                    Ok(email) => self.selected_detail = Some(email),
                    Err(error) => {
                        // Non-success detail means "no data", not a failure
                        // surface; the pane keeps its placeholder state.
                        warn!("Detail fetch for {id} failed: {error}");
                    }
                }
                Vec::new()
            }

            Message::UpdateRequested { id, patch } => vec![Effect::Update { id, patch }],

            Message::EmailUpdated {
                id,
                refresh_list,
                result,
            } => match result {
                Ok(updated) => {
                    self.merge_email(id, &EmailPatch::from_full(&updated));
                    if refresh_list {
                        // Membership may have changed; refetch so rows that
                        // no longer match the active tab disappear.
                        vec![self.issue_list_fetch()]
                    } else {
                        Vec::new()
                    }
                }
                Err(error) => {
                    warn!("Update of {id} failed: {error}");
                    Vec::new()
                }
            },

            Message::DeleteRequested(id) => vec![Effect::Delete { id }],

            Message::EmailDeleted { id, result } => match result {
                Ok(()) => {
                    self.remove_email(id);
                    Vec::new()
                }
                Err(error) => {
                    warn!("Delete of {id} failed: {error}");
                    Vec::new()
                }
            },

            Message::Compose(msg) => self.update_compose(msg),

            Message::EmailCreated { result } => match result {
                Ok(created) => {
                    let id = created.id;
                    self.compose.close();
                    self.prepend_email(created);
                    self.selected_id = Some(id);
                    self.selected_detail = None;
                    self.is_loading_detail = true;
                    vec![Effect::FetchDetail { id }]
                }
                Err(error) => {
                    // Draft stays open so nothing typed is lost.
                    self.compose.is_sending = false;
                    warn!("Create failed: {error}");
                    Vec::new()
                }
            },
        }
    }

    fn update_compose(&mut self, message: ComposeMessage) -> Vec<Effect> {
        match message {
            ComposeMessage::Open => self.compose.open_new(),
            ComposeMessage::Reply => {
                if let Some(original) = self.selected_detail.clone() {
                    self.compose.open_reply(&original);
                }
            }
            ComposeMessage::RecipientChanged(to_name) => self.compose.to_name = to_name,
            ComposeMessage::SubjectChanged(subject) => self.compose.subject = subject,
            ComposeMessage::BodyChanged(body_html) => self.compose.body_html = body_html,
            ComposeMessage::Send => {
                if self.compose.is_sending {
                    return Vec::new();
                }
                // An all-blank draft is a no-op: no network call, draft open.
                if let Some(payload) = self.compose.payload() {
                    self.compose.is_sending = true;
                    return vec![Effect::Create { payload }];
                }
            }
            ComposeMessage::Close => self.compose.close(),
        }
        Vec::new()
    }

    /// Issues a list fetch for the current `(tab, query)` pair under a fresh
    /// list epoch, superseding any fetch still in flight.
    fn issue_list_fetch(&mut self) -> Effect {
        self.is_loading_list = true;
        let epoch = self.next_list_epoch();
        let query = if self.query.is_empty() {
            None
        } else {
            Some(self.query.clone())
        };
        Effect::FetchList {
            tab: self.active_tab,
            query,
            epoch,
        }
    }
}
