//! Composer draft model.

use mailpane_core::{Email, NewEmail, html_to_text};

/// Fixed sending identity (single-user deployment, no authentication).
pub const SENDER_NAME: &str = "Richard Brown";
/// Address of the fixed sending identity.
pub const SENDER_EMAIL: &str = "richard.brown@company.com";
/// Recipient preselected when the composer opens.
pub const DEFAULT_RECIPIENT: &str = "Jane Doe";

/// Subject used when the draft's subject is blank.
const FALLBACK_SUBJECT: &str = "No Subject";
/// Body used when the stripped draft body is empty.
const FALLBACK_BODY: &str = "(empty)";

/// Resolves a recipient display name to an address via the built-in
/// directory; unknown names fall through to the support address.
#[must_use]
pub fn recipient_email(name: &str) -> &'static str {
    match name {
        "Jane Doe" => "jane.doe@business.com",
        "Michael Lee" => "michael.lee@cusana.io",
        "Sarah Connor" => "sarah.connor@client.com",
        "Natasha Brown" => "natasha.brown@kozuki.com",
        _ => "support@cusana.io",
    }
}

/// State of the composer form.
///
/// The draft is transient: it is discarded on successful submit or explicit
/// close, never persisted.
#[derive(Debug, Clone)]
pub struct ComposeState {
    /// Whether the composer is open.
    pub is_open: bool,
    /// Recipient display name.
    pub to_name: String,
    /// Subject line.
    pub subject: String,
    /// Rich-text body buffer (HTML), stripped to plain text on send.
    pub body_html: String,
    /// Whether a create call is in flight.
    pub is_sending: bool,
}

impl Default for ComposeState {
    fn default() -> Self {
        Self {
            is_open: false,
            to_name: DEFAULT_RECIPIENT.to_string(),
            subject: String::new(),
            body_html: String::new(),
            is_sending: false,
        }
    }
}

impl ComposeState {
    /// Opens the composer with a fresh draft.
    pub fn open_new(&mut self) {
        *self = Self {
            is_open: true,
            ..Self::default()
        };
    }

    /// Opens the composer prefilled as a reply to an email.
    ///
    /// Keeps an existing `Re:` prefix instead of stacking a second one.
    pub fn open_reply(&mut self, original: &Email) {
        let subject = if original.subject.to_lowercase().starts_with("re:") {
            original.subject.clone()
        } else {
            format!("Re: {}", original.subject)
        };
        let first_name = original
            .sender_name
            .split_whitespace()
            .next()
            .unwrap_or(&original.sender_name);
        let body_html = format!(
            "<p>Hi {first_name},</p><p><br/></p><p><br/></p><p>Warm regards,<br/>{SENDER_NAME}</p>"
        );

        *self = Self {
            is_open: true,
            to_name: original.sender_name.clone(),
            subject,
            body_html,
            is_sending: false,
        };
    }

    /// Discards the draft and closes the composer.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Builds the creation payload from the draft.
    ///
    /// Returns `None` when both subject and stripped body are blank; such a
    /// draft is not submitted at all. Blank subject or body alone fall back
    /// to fixed placeholders.
    #[must_use]
    pub fn payload(&self) -> Option<NewEmail> {
        let body_text = html_to_text(&self.body_html);
        let subject = self.subject.trim();
        if body_text.is_empty() && subject.is_empty() {
            return None;
        }

        Some(NewEmail {
            sender_name: SENDER_NAME.to_string(),
            sender_email: SENDER_EMAIL.to_string(),
            to_name: self.to_name.clone(),
            to_email: recipient_email(&self.to_name).to_string(),
            subject: if subject.is_empty() {
                FALLBACK_SUBJECT.to_string()
            } else {
                subject.to_string()
            },
            body: if body_text.is_empty() {
                FALLBACK_BODY.to_string()
            } else {
                body_text
            },
            is_read: true,
            is_archived: false,
        })
    }
}
