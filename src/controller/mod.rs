//! Debounced auto-translate controller.
//!
//! A single task owns a [`ControllerState`] and is the only thing that mutates
//! it. User actions arrive over a channel, the debounce is one deadline inside
//! `tokio::select!`, and each request runs in its own task that reports back
//! with the [`Ticket`] it was issued under. Observers read [`ViewState`]
//! through a `watch` channel.

mod state;

pub use state::{
    Command, ControllerState, Effect, Snapshot, Status, Ticket, ViewState, AUTO_TARGET_ERROR,
    DEFAULT_PROVIDER, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, FALLBACK_SOURCE_LANG, FETCH_ERROR,
    SAME_LANGUAGE_ERROR,
};

use crate::client::{ClientError, ProxyClient, TranslationOutcome};
use crate::translate::Provider;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("translate controller has stopped")]
    Closed,
}

type Completion = (Ticket, Result<TranslationOutcome, ClientError>);

/// Handle to a running controller task.
pub struct TranslateController {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl TranslateController {
    /// Start a controller with default selections.
    pub fn spawn(client: ProxyClient, debounce: Duration) -> Self {
        Self::spawn_with_state(client, debounce, ControllerState::default())
    }

    pub fn spawn_with_state(
        client: ProxyClient,
        debounce: Duration,
        state: ControllerState,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view) = watch::channel(state.view());

        let task = tokio::spawn(run(state, client, debounce, command_rx, view_tx));

        Self {
            commands,
            view,
            task,
        }
    }

    pub fn set_text(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::SetText(text.into()))
    }

    pub fn set_source_lang(&self, code: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::SetSourceLang(code.into()))
    }

    pub fn set_target_lang(&self, code: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::SetTargetLang(code.into()))
    }

    pub fn set_provider(&self, provider: Provider) -> Result<(), ControllerError> {
        self.send(Command::SetProvider(provider))
    }

    pub fn swap_languages(&self) -> Result<(), ControllerError> {
        self.send(Command::SwapLanguages)
    }

    /// Latest published view.
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// Stop the controller. Requests still in flight are abandoned.
    pub async fn shutdown(self) {
        drop(self.commands);
        if let Err(e) = self.task.await {
            debug!("Translate controller task ended abnormally: {}", e);
        }
    }

    fn send(&self, command: Command) -> Result<(), ControllerError> {
        self.commands
            .send(command)
            .map_err(|_| ControllerError::Closed)
    }
}

async fn run(
    mut state: ControllerState,
    client: ProxyClient,
    debounce: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    view: watch::Sender<ViewState>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut deadline: Option<Instant> = None;

    loop {
        let effect = tokio::select! {
            command = commands.recv() => match command {
                Some(command) => state.apply(command),
                None => break,
            },
            Some((ticket, result)) = done_rx.recv() => {
                state.complete(ticket, result);
                Effect::None
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                state.debounce_elapsed()
            }
        };

        match effect {
            Effect::None => {}
            Effect::Debounce => deadline = Some(Instant::now() + debounce),
            Effect::CancelDebounce => deadline = None,
            Effect::Request(ticket) => {
                deadline = None;
                debug!(
                    "Issuing translation request {} via {}",
                    ticket.id, ticket.snapshot.provider
                );

                let client = client.clone();
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let result = client.translate(&ticket.snapshot).await;
                    // The controller may already be gone
                    let _ = done_tx.send((ticket, result));
                });
            }
        }

        view.send_if_modified(|current| {
            let next = state.view();
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    debug!("Translate controller stopped");
}
