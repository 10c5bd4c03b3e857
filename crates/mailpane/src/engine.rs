//! Tokio-driven engine that executes reducer effects.
//!
//! The engine owns the [`Mailbox`] and is its only writer. It consumes
//! messages from a channel, runs the reducer, publishes a state snapshot on
//! a watch channel for rendering layers, and spawns one task per effect.
//! Spawned tasks never touch state; they report back as messages, so all
//! the race rules live in the reducer.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use mailpane_core::MailApi;

use crate::controller::Effect;
use crate::message::Message;
use crate::model::Mailbox;

/// Quiet period a query must be stable for before it drives a fetch.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Handle used by a rendering layer to drive the engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<Message>,
    state: watch::Receiver<Mailbox>,
}

impl EngineHandle {
    /// Sends an event to the engine. Silently dropped once the engine has
    /// shut down.
    pub fn dispatch(&self, message: Message) {
        let _ = self.tx.send(message);
    }

    /// Watch channel carrying a snapshot of the mailbox after every applied
    /// message.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<Mailbox> {
        self.state.clone()
    }
}

/// The mailbox engine: reducer loop plus effect executor.
pub struct Engine<A: MailApi> {
    api: A,
    mailbox: Mailbox,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    state_tx: watch::Sender<Mailbox>,
}

impl<A: MailApi> Engine<A> {
    /// Creates an engine and its handle. The initial list fetch is queued;
    /// it runs as soon as [`Engine::run`] starts.
    #[must_use]
    pub fn new(api: A) -> (Self, EngineHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(Mailbox::new());
        let _ = tx.send(Message::Started);
        let handle = EngineHandle {
            tx: tx.clone(),
            state: state_rx,
        };
        let engine = Self {
            api,
            mailbox: Mailbox::new(),
            tx,
            rx,
            state_tx,
        };
        (engine, handle)
    }

    /// Runs the reducer loop. Callers typically `tokio::spawn` this; the
    /// loop lives for the lifetime of the engine.
    pub async fn run(mut self) {
        while let Some(message) = self.rx.recv().await {
            let effects = self.mailbox.update(message);
            self.state_tx.send_replace(self.mailbox.clone());
            for effect in effects {
                self.execute(effect);
            }
        }
        debug!("Engine loop finished");
    }

    fn execute(&self, effect: Effect) {
        let tx = self.tx.clone();
        match effect {
            Effect::Debounce { epoch } => {
                tokio::spawn(async move {
                    tokio::time::sleep(DEBOUNCE_QUIET_PERIOD).await;
                    let _ = tx.send(Message::QuerySettled { epoch });
                });
            }
            Effect::FetchList { tab, query, epoch } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api
                        .list_emails(tab, query)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Message::ListLoaded { epoch, result });
                });
            }
            Effect::FetchDetail { id } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.get_email(id).await.map_err(|e| e.to_string());
                    let _ = tx.send(Message::DetailLoaded { id, result });
                });
            }
            Effect::Update { id, patch } => {
                let api = self.api.clone();
                let refresh_list = patch.affects_membership();
                tokio::spawn(async move {
                    let result = api.update_email(id, patch).await.map_err(|e| e.to_string());
                    let _ = tx.send(Message::EmailUpdated {
                        id,
                        refresh_list,
                        result,
                    });
                });
            }
            Effect::Delete { id } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.delete_email(id).await.map_err(|e| e.to_string());
                    let _ = tx.send(Message::EmailDeleted { id, result });
                });
            }
            Effect::Create { payload } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.create_email(payload).await.map_err(|e| e.to_string());
                    let _ = tx.send(Message::EmailCreated { result });
                });
            }
        }
    }
}
