//! Email domain model and text helpers.

mod model;
mod text;

pub use model::{Email, EmailAttachment, EmailId, EmailList, EmailPatch, NewEmail, Tab};
pub use text::{backend_static_origin, format_received_at, html_to_text};
