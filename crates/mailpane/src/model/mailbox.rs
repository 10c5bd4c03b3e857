//! Mailbox state store.
//!
//! Holds the current tab, query, list, selection, and draft. Mutated only by
//! the reducer in `controller`, which is the single writer; no locking is
//! needed, only apply-if-still-relevant checks on async completions.

use mailpane_core::{Email, EmailId, EmailPatch, Tab};

use super::ComposeState;

/// Outcome of reconciling the selection after a list replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selected id is still present; selection untouched.
    Unchanged,
    /// Selection moved to the first entry of the new list.
    Selected(EmailId),
    /// The new list is empty; selection cleared.
    Cleared,
}

/// Client-side mailbox state (process-local).
#[derive(Debug, Clone)]
pub struct Mailbox {
    /// Active tab filter.
    pub active_tab: Tab,
    /// Raw query value, updated on every keystroke for UI echo.
    pub pending_query: String,
    /// Debounced, trimmed query that drives list fetches.
    pub query: String,
    /// Email list as of the last completed fetch for `(active_tab, query)`.
    pub emails: Vec<Email>,
    /// Currently selected email id, if any.
    pub selected_id: Option<EmailId>,
    /// Full record of the last successful detail fetch for `selected_id`.
    pub selected_detail: Option<Email>,
    /// Composer draft.
    pub compose: ComposeState,
    /// Whether a list fetch is in flight.
    pub is_loading_list: bool,
    /// Whether a detail fetch is in flight.
    pub is_loading_detail: bool,
    query_epoch: u64,
    list_epoch: u64,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self {
            active_tab: Tab::All,
            pending_query: String::new(),
            query: String::new(),
            emails: Vec::new(),
            selected_id: None,
            selected_detail: None,
            compose: ComposeState::default(),
            is_loading_list: false,
            is_loading_detail: false,
            query_epoch: 0,
            list_epoch: 0,
        }
    }
}

impl Mailbox {
    /// Creates an empty mailbox on the default tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a list row by id.
    #[must_use]
    pub fn email(&self, id: EmailId) -> Option<&Email> {
        self.emails.iter().find(|e| e.id == id)
    }

    /// Whether the list contains the given id.
    #[must_use]
    pub fn contains(&self, id: EmailId) -> bool {
        self.email(id).is_some()
    }

    /// Unread, non-archived rows in the currently loaded list.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.emails
            .iter()
            .filter(|e| !e.is_read && !e.is_archived)
            .count()
    }

    /// Wholesale replacement of the email list.
    pub fn replace_list(&mut self, emails: Vec<Email>) {
        self.emails = emails;
    }

    /// Reconciles the selection against the current list.
    ///
    /// If the selected id is still present the selection is untouched, which
    /// avoids an unnecessary detail refetch on every list refresh. Otherwise
    /// the first entry wins, or the selection is cleared on an empty list.
    pub fn reconcile_selection(&mut self) -> SelectionOutcome {
        if let Some(id) = self.selected_id
            && self.contains(id)
        {
            return SelectionOutcome::Unchanged;
        }
        match self.emails.first() {
            Some(first) => {
                let id = first.id;
                self.selected_id = Some(id);
                self.selected_detail = None;
                SelectionOutcome::Selected(id)
            }
            None => {
                self.selected_id = None;
                self.selected_detail = None;
                SelectionOutcome::Cleared
            }
        }
    }

    /// Shallow-merges a patch onto the matching list row and, if it is the
    /// selected email, onto the detail record too. Idempotent.
    pub fn merge_email(&mut self, id: EmailId, patch: &EmailPatch) {
        if let Some(row) = self.emails.iter_mut().find(|e| e.id == id) {
            patch.apply_to(row);
        }
        if self.selected_id == Some(id)
            && let Some(detail) = self.selected_detail.as_mut()
        {
            patch.apply_to(detail);
        }
    }

    /// Removes a row from the list. Deleting the selected email clears the
    /// selection and detail without reselecting.
    pub fn remove_email(&mut self, id: EmailId) {
        self.emails.retain(|e| e.id != id);
        if self.selected_id == Some(id) {
            self.selected_id = None;
            self.selected_detail = None;
            self.is_loading_detail = false;
        }
    }

    /// Inserts a newly created email at the head of the list. Created emails
    /// sort first regardless of `received_at` until the next refetch.
    pub fn prepend_email(&mut self, email: Email) {
        self.emails.insert(0, email);
    }

    pub(crate) fn next_query_epoch(&mut self) -> u64 {
        self.query_epoch += 1;
        self.query_epoch
    }

    pub(crate) const fn query_epoch_is_current(&self, epoch: u64) -> bool {
        self.query_epoch == epoch
    }

    pub(crate) fn next_list_epoch(&mut self) -> u64 {
        self.list_epoch += 1;
        self.list_epoch
    }

    pub(crate) const fn list_epoch_is_current(&self, epoch: u64) -> bool {
        self.list_epoch == epoch
    }
}
