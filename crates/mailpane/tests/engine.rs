//! Integration tests for the mailbox engine.
//!
//! These tests drive the full reducer-plus-effects loop against an
//! in-memory backend, with the tokio clock paused so debounce timers run
//! deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use mailpane::{ComposeMessage, Engine, EngineHandle, Mailbox, Message};
use mailpane_core::{Email, EmailId, EmailPatch, MailApi, NewEmail, Result, Tab};

/// In-memory backend implementing the same filtering rules as the real one.
#[derive(Clone, Default)]
struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    emails: Vec<Email>,
    next_id: i64,
    list_calls: Vec<(Tab, Option<String>)>,
    detail_delays: HashMap<i64, Duration>,
}

impl MockApi {
    fn with_emails(emails: Vec<Email>) -> Self {
        let next_id = emails.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Inner {
                emails,
                next_id,
                ..Inner::default()
            })),
        }
    }

    fn delay_detail(&self, id: i64, delay: Duration) {
        self.lock().detail_delays.insert(id, delay);
    }

    fn list_calls(&self) -> Vec<(Tab, Option<String>)> {
        self.lock().list_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

fn matches_tab(email: &Email, tab: Tab) -> bool {
    match tab {
        Tab::All => !email.is_archived,
        Tab::Unread => !email.is_read && !email.is_archived,
        Tab::Archive => email.is_archived,
    }
}

fn matches_query(email: &Email, q: &str) -> bool {
    let q = q.to_lowercase();
    email.subject.to_lowercase().contains(&q)
        || email.sender_name.to_lowercase().contains(&q)
        || email.sender_email.to_lowercase().contains(&q)
        || email.preview.to_lowercase().contains(&q)
}

impl MailApi for MockApi {
    async fn list_emails(&self, tab: Tab, query: Option<String>) -> Result<Vec<Email>> {
        let mut inner = self.lock();
        inner.list_calls.push((tab, query.clone()));
        Ok(inner
            .emails
            .iter()
            .filter(|e| matches_tab(e, tab))
            .filter(|e| query.as_deref().is_none_or(|q| matches_query(e, q)))
            .cloned()
            .collect())
    }

    async fn get_email(&self, id: EmailId) -> Result<Email> {
        let (email, delay) = {
            let inner = self.lock();
            (
                inner.emails.iter().find(|e| e.id == id).cloned(),
                inner.detail_delays.get(&id.0).copied(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        email.ok_or(mailpane_core::Error::Status { code: 404 })
    }

    async fn update_email(&self, id: EmailId, patch: EmailPatch) -> Result<Email> {
        let mut inner = self.lock();
        let email = inner
            .emails
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(mailpane_core::Error::Status { code: 404 })?;
        patch.apply_to(email);
        Ok(email.clone())
    }

    async fn create_email(&self, payload: NewEmail) -> Result<Email> {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let email = Email {
            id: EmailId(id),
            sender_name: payload.sender_name,
            sender_email: payload.sender_email,
            to_name: payload.to_name,
            to_email: payload.to_email,
            subject: payload.subject,
            preview: payload.body.replace('\n', " "),
            body: payload.body,
            received_at: "2026-08-27T10:00:00+00:00".into(),
            is_read: payload.is_read,
            is_archived: payload.is_archived,
            attachments: Vec::new(),
        };
        inner.emails.push(email.clone());
        Ok(email)
    }

    async fn delete_email(&self, id: EmailId) -> Result<()> {
        let mut inner = self.lock();
        let before = inner.emails.len();
        inner.emails.retain(|e| e.id != id);
        if inner.emails.len() == before {
            return Err(mailpane_core::Error::Status { code: 404 });
        }
        Ok(())
    }
}

fn email(id: i64, subject: &str, is_read: bool) -> Email {
    Email {
        id: EmailId(id),
        sender_name: format!("Sender {id}"),
        sender_email: format!("sender{id}@example.com"),
        to_name: "Richard Brown".into(),
        to_email: "richard.brown@company.com".into(),
        subject: subject.into(),
        preview: "preview".into(),
        body: "body".into(),
        received_at: "2026-08-20T09:15:00+00:00".into(),
        is_read,
        is_archived: false,
        attachments: Vec::new(),
    }
}

fn start_engine(api: MockApi) -> EngineHandle {
    let (engine, handle) = Engine::new(api);
    tokio::spawn(engine.run());
    handle
}

/// Waits until the mailbox satisfies a predicate, with a virtual-time guard
/// against hangs.
async fn wait_for(
    rx: &mut watch::Receiver<Mailbox>,
    pred: impl Fn(&Mailbox) -> bool,
) -> Mailbox {
    tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            {
                let state = rx.borrow();
                if pred(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("engine dropped");
        }
    })
    .await
    .expect("mailbox never reached expected state")
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_selects_first_and_loads_detail() {
    let api = MockApi::with_emails(vec![
        email(1, "First", true),
        email(2, "Second", true),
    ]);
    let handle = start_engine(api.clone());
    let mut state = handle.state();

    let mailbox = wait_for(&mut state, |m| {
        m.selected_detail.as_ref().map(|e| e.id) == Some(EmailId(1))
    })
    .await;
    assert_eq!(mailbox.emails.len(), 2);
    assert_eq!(mailbox.selected_id, Some(EmailId(1)));
    assert_eq!(api.list_calls(), vec![(Tab::All, None)]);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_keystrokes_trigger_one_fetch_with_final_value() {
    let api = MockApi::with_emails(vec![email(1, "Invoice #1234", true)]);
    let handle = start_engine(api.clone());
    let mut state = handle.state();
    wait_for(&mut state, |m| !m.emails.is_empty()).await;

    // All three keystrokes land inside one quiet period.
    handle.dispatch(Message::QueryChanged("i".into()));
    handle.dispatch(Message::QueryChanged("in".into()));
    handle.dispatch(Message::QueryChanged("invoice".into()));

    let mailbox = wait_for(&mut state, |m| m.query == "invoice" && !m.is_loading_list).await;
    assert_eq!(mailbox.pending_query, "invoice");
    assert_eq!(
        api.list_calls(),
        vec![
            (Tab::All, None),
            (Tab::All, Some("invoice".into())),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_stale_detail_response_never_overwrites_newer_selection() {
    let api = MockApi::with_emails(vec![
        email(1, "Slow", true),
        email(2, "Fast", true),
    ]);
    // Email 1's detail resolves long after email 2's.
    api.delay_detail(1, Duration::from_millis(500));
    api.delay_detail(2, Duration::from_millis(10));

    let handle = start_engine(api);
    let mut state = handle.state();
    wait_for(&mut state, |m| !m.emails.is_empty()).await;

    // Selection goes 1 -> 2 before 1's fetch can resolve.
    handle.dispatch(Message::EmailSelected(Some(EmailId(2))));
    wait_for(&mut state, |m| {
        m.selected_detail.as_ref().map(|e| e.id) == Some(EmailId(2))
    })
    .await;

    // Let email 1's delayed response arrive and be discarded.
    tokio::time::sleep(Duration::from_millis(600)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    let mailbox = state.borrow().clone();
    assert_eq!(
        mailbox.selected_detail.as_ref().map(|e| e.id),
        Some(EmailId(2))
    );
}

#[tokio::test(start_paused = true)]
async fn test_opening_unread_email_marks_it_read() {
    let api = MockApi::with_emails(vec![
        email(1, "First", true),
        email(2, "Second", false),
    ]);
    let handle = start_engine(api.clone());
    let mut state = handle.state();
    wait_for(&mut state, |m| !m.emails.is_empty()).await;

    handle.dispatch(Message::EmailSelected(Some(EmailId(2))));
    let mailbox = wait_for(&mut state, |m| {
        m.email(EmailId(2)).is_some_and(|e| e.is_read) && !m.is_loading_list
    })
    .await;

    assert_eq!(mailbox.selected_id, Some(EmailId(2)));
    // The mark-read update touches membership, so the list was refetched.
    assert!(api.list_calls().len() >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_archiving_on_unread_tab_drops_the_row() {
    let api = MockApi::with_emails(vec![
        email(1, "First", false),
        email(2, "Second", false),
    ]);
    let handle = start_engine(api.clone());
    let mut state = handle.state();
    wait_for(&mut state, |m| !m.emails.is_empty()).await;

    handle.dispatch(Message::TabSelected(Tab::Unread));
    wait_for(&mut state, |m| m.active_tab == Tab::Unread && !m.is_loading_list).await;

    handle.dispatch(Message::UpdateRequested {
        id: EmailId(2),
        patch: EmailPatch::archived(true),
    });
    let mailbox = wait_for(&mut state, |m| !m.contains(EmailId(2))).await;
    assert!(mailbox.contains(EmailId(1)));
}

#[tokio::test(start_paused = true)]
async fn test_delete_selected_email_clears_selection() {
    let api = MockApi::with_emails(vec![
        email(1, "First", true),
        email(2, "Second", true),
    ]);
    let handle = start_engine(api.clone());
    let mut state = handle.state();
    wait_for(&mut state, |m| m.selected_id == Some(EmailId(1))).await;

    handle.dispatch(Message::DeleteRequested(EmailId(1)));
    let mailbox = wait_for(&mut state, |m| m.emails.len() == 1).await;
    assert_eq!(mailbox.emails[0].id, EmailId(2));
    assert_eq!(mailbox.selected_id, None);
    assert!(mailbox.selected_detail.is_none());
    // Delete removes locally; the one list call is the initial load.
    assert_eq!(api.list_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_send_prepends_and_selects_created_email() {
    let api = MockApi::with_emails(vec![email(1, "First", true)]);
    let handle = start_engine(api);
    let mut state = handle.state();
    wait_for(&mut state, |m| !m.emails.is_empty()).await;

    handle.dispatch(Message::Compose(ComposeMessage::Open));
    handle.dispatch(Message::Compose(ComposeMessage::SubjectChanged(
        "Weekly status".into(),
    )));
    handle.dispatch(Message::Compose(ComposeMessage::BodyChanged(
        "<p>All on track.</p>".into(),
    )));
    handle.dispatch(Message::Compose(ComposeMessage::Send));

    let mailbox = wait_for(&mut state, |m| {
        m.selected_detail.as_ref().map(|e| e.subject.as_str()) == Some("Weekly status")
    })
    .await;
    assert_eq!(mailbox.emails[0].subject, "Weekly status");
    assert_eq!(mailbox.selected_id, mailbox.emails.first().map(|e| e.id));
    assert!(!mailbox.compose.is_open);
}
