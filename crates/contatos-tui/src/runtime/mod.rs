//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers.rs`: Backend calls run by spawned tasks

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contatos_core::backend::Backend;
use contatos_core::observable::Subscription;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while something is animating (spinner, toasts).
pub const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    backend: Backend,
    /// Inbox sender - spawned tasks send results here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - drained each frame.
    inbox_rx: UiEventReceiver,
    /// Redraw whenever the contact list changes.
    list_sub: Subscription,
    last_tick: Instant,
}

impl TuiRuntime {
    pub fn new(backend: Backend) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new();
        let list_sub = state.contacts.list.subscribe();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            backend,
            inbox_tx,
            inbox_rx,
            list_sub,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if self.list_sub.has_changed() {
                self.list_sub.mark_seen();
                dirty = true;
            }

            if dirty && !self.state.should_quit {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let needs_fast_poll = self.state.tasks.is_any_running() || !self.state.toasts.is_empty();
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block on the terminal only when nothing else is pending.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::CancelScope { token } => token.cancel(),

            UiEffect::SignIn {
                task,
                cancel,
                email,
                password,
            } => {
                let backend = self.backend.clone();
                spawn_task(
                    &self.inbox_tx,
                    TaskKind::SignIn,
                    task,
                    cancel,
                    move || handlers::sign_in(backend, email, password),
                );
            }
            UiEffect::FetchContacts {
                task,
                cancel,
                session,
            } => {
                let backend = self.backend.clone();
                spawn_task(
                    &self.inbox_tx,
                    TaskKind::FetchContacts,
                    task,
                    cancel,
                    move || handlers::fetch_contacts(backend, session),
                );
            }
            UiEffect::CreateContact {
                task,
                cancel,
                session,
                contact,
            } => {
                let backend = self.backend.clone();
                spawn_task(
                    &self.inbox_tx,
                    TaskKind::CreateContact,
                    task,
                    cancel,
                    move || handlers::create_contact(backend, session, contact),
                );
            }
            UiEffect::DeleteContact {
                task,
                cancel,
                session,
                id,
            } => {
                let backend = self.backend.clone();
                spawn_task(
                    &self.inbox_tx,
                    TaskKind::DeleteContact,
                    task,
                    cancel,
                    move || handlers::delete_contact(backend, session, id),
                );
            }
        }
    }
}

/// Spawns a backend task on the runtime.
///
/// The completion is sent to the inbox only if `cancel` has not fired first.
fn spawn_task<F, Fut>(
    tx: &UiEventSender,
    kind: TaskKind,
    id: TaskId,
    cancel: CancellationToken,
    f: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = UiEvent> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(?kind, ?id, "Task cancelled");
            }
            inner = f() => {
                let completed = TaskCompleted {
                    id,
                    result: Box::new(inner),
                };
                let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
            }
        }
    })
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
