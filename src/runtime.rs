//! Event loop wiring collaborators to the state machine.
//!
//! The [`Runtime`] owns [`AppState`] and is the single thread of control that
//! mutates it. Host commands arrive over an unbounded channel; collaborator
//! calls (permission prompt, position fetch, searches) run as tasks in a
//! `JoinSet` whose only output is the [`Event`] they resolve to. Both streams
//! are fed through [`handle_event`] one at a time.
//!
//! ```text
//!  RuntimeHandle ──HostCommand──┐
//!                               ▼
//!                    ┌────────────────────┐   actions   ┌───────────────┐
//!                    │ select! loop       │────────────▶│ JoinSet tasks │
//!                    │  handle_event      │◀────Event───│ (collaborators)│
//!                    └────────────────────┘             └───────────────┘
//!                               │ render
//!                               ▼
//!                          MapPresenter
//! ```
//!
//! Searches are never cancelled. When a newer search supersedes an older one,
//! both tasks run to completion and the coordinator discards the stale answer.

use crate::app::{handle_event, Action, AppState, Event};
use crate::device::{PermissionGate, PositionProvider};
use crate::domain::{DevRadarError, Result};
use crate::observability::ErrorReporter;
use crate::ui::{MapPresenter, Navigator};
use crate::worker::{SearchBackend, SearchWorker};
use crate::{initialize, Config};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};

/// Commands a [`RuntimeHandle`] enqueues for a running [`Runtime`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCommand {
    /// Feed an event through the state machine.
    Event(Event),
    /// Stop accepting commands, reconcile in-flight tasks, then return.
    Shutdown,
}

/// Cloneable sender for host commands.
///
/// Hosts only reach the state machine through the typed methods below;
/// collaborator outcomes are fed in by the runtime itself. Every method fails with [`DevRadarError::RuntimeStopped`] once the
/// runtime has returned.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: mpsc::UnboundedSender<HostCommand>,
}

impl RuntimeHandle {
    fn send(&self, event: Event) -> Result<()> {
        self.command(HostCommand::Event(event))
    }

    /// Replaces the technology selection.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::RuntimeStopped`] if the runtime has exited.
    pub fn select_techs<I, S>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send(Event::SelectTechs(tags.into_iter().map(Into::into).collect()))
    }

    /// Toggles one technology in the selection.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::RuntimeStopped`] if the runtime has exited.
    pub fn toggle_tech(&self, tag: impl Into<String>) -> Result<()> {
        self.send(Event::ToggleTech(tag.into()))
    }

    /// Updates the picker's search input.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::RuntimeStopped`] if the runtime has exited.
    pub fn filter_catalog(&self, query: impl Into<String>) -> Result<()> {
        self.send(Event::CatalogQuery(query.into()))
    }

    /// Reports a tap on a marker callout.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::RuntimeStopped`] if the runtime has exited.
    pub fn activate_callout(&self, developer_id: impl Into<String>) -> Result<()> {
        self.send(Event::CalloutActivated {
            developer_id: developer_id.into(),
        })
    }

    /// Asks the runtime to finish.
    ///
    /// # Errors
    ///
    /// Returns [`DevRadarError::RuntimeStopped`] if the runtime has exited.
    pub fn shutdown(&self) -> Result<()> {
        self.command(HostCommand::Shutdown)
    }

    fn command(&self, command: HostCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| DevRadarError::RuntimeStopped)
    }
}

/// External collaborators the runtime drives.
pub struct Collaborators {
    pub permission: Arc<dyn PermissionGate>,
    pub position: Arc<dyn PositionProvider>,
    pub backend: Arc<dyn SearchBackend>,
    pub presenter: Box<dyn MapPresenter>,
    pub navigator: Box<dyn Navigator>,
    pub reporter: Box<dyn ErrorReporter>,
}

/// Owner of application state and the loop that drives it.
pub struct Runtime {
    state: AppState,
    worker: SearchWorker,
    permission: Arc<dyn PermissionGate>,
    position: Arc<dyn PositionProvider>,
    position_timeout: Duration,
    presenter: Box<dyn MapPresenter>,
    navigator: Box<dyn Navigator>,
    reporter: Box<dyn ErrorReporter>,
    commands: mpsc::UnboundedReceiver<HostCommand>,
    sender: Option<mpsc::UnboundedSender<HostCommand>>,
    tasks: JoinSet<Event>,
}

impl Runtime {
    /// Creates a runtime with fresh state built from `config`.
    #[must_use]
    pub fn new(config: &Config, collaborators: Collaborators) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            state: initialize(config),
            worker: SearchWorker::new(collaborators.backend, config.search_timeout()),
            permission: collaborators.permission,
            position: collaborators.position,
            position_timeout: config.position_timeout(),
            presenter: collaborators.presenter,
            navigator: collaborators.navigator,
            reporter: collaborators.reporter,
            commands: rx,
            sender: Some(tx),
            tasks: JoinSet::new(),
        }
    }

    /// Returns a handle for sending host commands.
    #[must_use]
    pub fn handle(&self) -> RuntimeHandle {
        let tx = self
            .sender
            .clone()
            .unwrap_or_else(|| mpsc::unbounded_channel().0);
        RuntimeHandle { tx }
    }

    /// Runs until shutdown is requested or every handle is dropped.
    ///
    /// Posts [`Event::Launch`] first. On exit, tasks still in flight are
    /// awaited and reconciled (including any they trigger in turn), so no
    /// outstanding response is lost. Returns the final state.
    pub async fn run(mut self) -> AppState {
        // Only handles keep the command channel open from here on.
        self.sender = None;

        self.dispatch(Event::Launch);

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(HostCommand::Event(event)) => self.dispatch(event),
                    Some(HostCommand::Shutdown) => {
                        tracing::info!(in_flight = self.tasks.len(), "shutdown requested");
                        break;
                    }
                    None => {
                        tracing::info!(in_flight = self.tasks.len(), "all handles dropped");
                        break;
                    }
                },

                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    self.complete(joined);
                }
            }
        }

        while let Some(joined) = self.tasks.join_next().await {
            self.complete(joined);
        }

        tracing::debug!(
            results = self.state.results().len(),
            coordinator = ?self.state.coordinator.state(),
            "runtime stopped"
        );
        self.state
    }

    fn complete(&mut self, joined: std::result::Result<Event, JoinError>) {
        match joined {
            Ok(event) => self.dispatch(event),
            Err(e) => tracing::error!(error = %e, "collaborator task did not complete"),
        }
    }

    fn dispatch(&mut self, event: Event) {
        match handle_event(&mut self.state, &event) {
            Ok((should_render, actions)) => {
                if should_render {
                    self.presenter.present(&self.state.compute_viewmodel());
                }
                for action in actions {
                    self.execute(action);
                }
            }
            Err(e) => tracing::error!(error = %e, "event handling failed"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute(&mut self, action: Action) {
        match action {
            Action::RequestPermission => {
                let gate = Arc::clone(&self.permission);
                self.tasks.spawn(async move {
                    let status = gate.request_location_permission().await;
                    Event::PermissionResult { status }
                });
            }
            Action::RequestPosition { high_accuracy } => {
                let provider = Arc::clone(&self.position);
                let limit = self.position_timeout;
                self.tasks.spawn(async move {
                    match tokio::time::timeout(limit, provider.current_position(high_accuracy)).await {
                        Ok(Ok(coordinate)) => Event::PositionResolved(coordinate),
                        Ok(Err(e)) => Event::PositionFailed { error: e.to_string() },
                        Err(_) => Event::PositionFailed {
                            error: DevRadarError::PositionUnavailable(format!(
                                "no fix within {}ms",
                                limit.as_millis()
                            ))
                            .to_string(),
                        },
                    }
                });
            }
            Action::PostToWorker(message) => {
                let response = self.worker.handle_message(message);
                self.tasks.spawn(async move { Event::WorkerResponse(response.await) });
            }
            Action::ReportError { sequence, message } => {
                self.reporter.report(sequence, &message);
            }
            Action::Navigate { developer_username } => {
                self.navigator.navigate(&developer_username);
            }
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("state", &self.state)
            .field("in_flight", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
