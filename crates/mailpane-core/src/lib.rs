//! # mailpane-core
//!
//! Domain model and backend API client for the mailpane mailbox engine.
//!
//! This crate provides:
//! - The [`Email`] record and its wire shapes ([`EmailPatch`], [`NewEmail`])
//! - The [`Tab`] filter and text helpers (rich-text stripping, timestamps)
//! - The [`MailApi`] seam and its `reqwest` implementation [`HttpMailApi`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod email;
mod error;

pub use client::{HttpMailApi, MailApi};
pub use email::{
    Email, EmailAttachment, EmailId, EmailList, EmailPatch, NewEmail, Tab, backend_static_origin,
    format_received_at, html_to_text,
};
pub use error::{Error, Result};
