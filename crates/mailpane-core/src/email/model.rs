//! Email data models shared between the client engine and the gateway.

use serde::{Deserialize, Serialize};

/// Unique identifier for an email record, assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmailId(pub i64);

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Mailbox view filter. The three tabs are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// All non-archived emails.
    #[default]
    All,
    /// Unread, non-archived emails.
    Unread,
    /// Archived emails.
    Archive,
}

impl Tab {
    /// Query-parameter value used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Archive => "archive",
        }
    }
}

/// An attachment entry on an email. Immutable once set on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAttachment {
    /// Original file name.
    pub filename: String,
    /// Human-readable size (backend-formatted, e.g. "2.4 MB").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Download path or absolute URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl EmailAttachment {
    /// Resolves the download URL against the static-asset origin.
    ///
    /// Absolute URLs are passed through untouched; relative paths are joined
    /// onto `static_origin` (see [`backend_static_origin`]).
    ///
    /// [`backend_static_origin`]: crate::email::backend_static_origin
    #[must_use]
    pub fn resolved_url(&self, static_origin: &str) -> Option<String> {
        let url = self.download_url.as_deref()?;
        if url.starts_with("http://") || url.starts_with("https://") {
            Some(url.to_string())
        } else if url.starts_with('/') {
            Some(format!("{static_origin}{url}"))
        } else {
            Some(format!("{static_origin}/{url}"))
        }
    }
}

/// A materialized snapshot of a backend email record.
///
/// The client never computes `is_read`/`is_archived` locally except as the
/// confirmed result of a just-completed update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// Backend-assigned identifier, stable for the record's lifetime.
    pub id: EmailId,
    /// Sender display name.
    pub sender_name: String,
    /// Sender address.
    pub sender_email: String,
    /// Recipient display name.
    pub to_name: String,
    /// Recipient address.
    pub to_email: String,
    /// Subject line.
    pub subject: String,
    /// Backend-derived summary, independent of `body`.
    pub preview: String,
    /// Full message body.
    pub body: String,
    /// ISO 8601 timestamp, immutable after creation.
    pub received_at: String,
    /// Whether the email has been read.
    pub is_read: bool,
    /// Whether the email is archived.
    pub is_archived: bool,
    /// Attachments, if any.
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
}

/// Wire shape of the list endpoint: `{"emails": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailList {
    /// Emails matching the requested `(tab, query)` pair, backend-ordered.
    pub emails: Vec<Email>,
}

/// Partial update for an email record.
///
/// Serialized with unset fields omitted, matching the backend's
/// exclude-unset PUT semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailPatch {
    /// New sender display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    /// New sender address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    /// New recipient display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    /// New recipient address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_email: Option<String>,
    /// New subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// New preview text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// New message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// New received timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
    /// New read flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    /// New archived flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// Replacement attachment list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<EmailAttachment>>,
}

impl EmailPatch {
    /// Patch that sets only the read flag.
    #[must_use]
    pub fn read(is_read: bool) -> Self {
        Self {
            is_read: Some(is_read),
            ..Self::default()
        }
    }

    /// Patch that sets only the archived flag.
    #[must_use]
    pub fn archived(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Self::default()
        }
    }

    /// Full-record patch built from a refreshed backend snapshot.
    ///
    /// Merging this patch is equivalent to replacing the record.
    #[must_use]
    pub fn from_full(email: &Email) -> Self {
        Self {
            sender_name: Some(email.sender_name.clone()),
            sender_email: Some(email.sender_email.clone()),
            to_name: Some(email.to_name.clone()),
            to_email: Some(email.to_email.clone()),
            subject: Some(email.subject.clone()),
            preview: Some(email.preview.clone()),
            body: Some(email.body.clone()),
            received_at: Some(email.received_at.clone()),
            is_read: Some(email.is_read),
            is_archived: Some(email.is_archived),
            attachments: Some(email.attachments.clone()),
        }
    }

    /// Whether this patch can change which tab the email belongs to.
    ///
    /// `is_read` and `is_archived` drive tab membership, so a successful
    /// update touching either requires a list refetch.
    #[must_use]
    pub const fn affects_membership(&self) -> bool {
        self.is_read.is_some() || self.is_archived.is_some()
    }

    /// Applies the set fields of this patch onto an email record.
    pub fn apply_to(&self, email: &mut Email) {
        if let Some(v) = &self.sender_name {
            email.sender_name.clone_from(v);
        }
        if let Some(v) = &self.sender_email {
            email.sender_email.clone_from(v);
        }
        if let Some(v) = &self.to_name {
            email.to_name.clone_from(v);
        }
        if let Some(v) = &self.to_email {
            email.to_email.clone_from(v);
        }
        if let Some(v) = &self.subject {
            email.subject.clone_from(v);
        }
        if let Some(v) = &self.preview {
            email.preview.clone_from(v);
        }
        if let Some(v) = &self.body {
            email.body.clone_from(v);
        }
        if let Some(v) = &self.received_at {
            email.received_at.clone_from(v);
        }
        if let Some(v) = self.is_read {
            email.is_read = v;
        }
        if let Some(v) = self.is_archived {
            email.is_archived = v;
        }
        if let Some(v) = &self.attachments {
            email.attachments.clone_from(v);
        }
    }
}

/// Creation payload for a new email record (no id; the backend assigns one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmail {
    /// Sender display name.
    pub sender_name: String,
    /// Sender address.
    pub sender_email: String,
    /// Recipient display name.
    pub to_name: String,
    /// Recipient address.
    pub to_email: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Initial read flag (own sent mail starts read).
    pub is_read: bool,
    /// Initial archived flag.
    pub is_archived: bool,
}
