//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::chat::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Two kinds of tokio tasks report back over a std `mpsc` channel of
//! [`Action`]s, drained once per loop iteration:
//!
//! - **Starter fetch**: spawned once per backend URL. Fire-and-forget; if the
//!   loop has exited by the time it resolves, the send fails and is logged.
//! - **Response stream**: spawned on [`Effect::SpawnRequest`], aborted on
//!   [`Effect::CancelRequest`] or when a new request replaces it.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (response pending): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background actions.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{ChatResponder, HttpResponder, load_starter_questions};
use crate::core::chat::{Action, ChatState, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::message::NewMessage;
use crate::tui::component::EventHandler;
use crate::tui::components::{Composer, ComposerEvent, TranscriptEvent, TranscriptState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core chat logic)
pub struct TuiState {
    pub transcript: TranscriptState,
    pub composer: Composer,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript: TranscriptState::new(),
            composer: Composer::new(),
        }
    }
}

impl From<TranscriptEvent> for Action {
    fn from(event: TranscriptEvent) -> Self {
        match event {
            TranscriptEvent::Reload => Action::Reload,
            TranscriptEvent::Stop => Action::Stop,
            TranscriptEvent::Append(message) => Action::Append(message),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // blinking resets on every draw()
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Owns the in-flight response task so it can be replaced or aborted.
#[derive(Default)]
struct ActiveRequest {
    handles: Vec<tokio::task::AbortHandle>,
}

impl ActiveRequest {
    fn abort(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    fn replace(&mut self, handles: Vec<tokio::task::AbortHandle>) {
        self.abort();
        self.handles = handles;
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let http = reqwest::Client::new();
    let responder: Arc<dyn ChatResponder> =
        Arc::new(HttpResponder::new(config.backend_url.clone(), http.clone()));
    info!(
        "Using {} responder against {} (caps: {:?})",
        responder.name(),
        config.backend_url,
        config.capabilities
    );

    let mut chat = ChatState::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut active = ActiveRequest::default();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if chat.starters.needs_fetch(&config.backend_url) {
            chat.starters.mark_requested(&config.backend_url);
            spawn_starter_fetch(http.clone(), config.backend_url.clone(), tx.clone());
        }

        let animating = chat.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &chat, &config, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut actions = Vec::new();
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit => actions.push(Action::Quit),
                event => {
                    if let Some(action) = dispatch_event(&mut tui, &event) {
                        actions.push(action);
                    }
                }
            }
        }

        // Handle background task actions (starters, streaming responses)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            actions.push(action);
        }

        let mut should_quit = false;
        for action in actions {
            match update(&mut chat, action) {
                Effect::Quit => should_quit = true,
                Effect::SpawnRequest => {
                    active.replace(spawn_request(&chat, responder.clone(), tx.clone()));
                }
                Effect::CancelRequest => active.abort(),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    active.abort();
    ratatui::restore();
    Ok(())
}

/// Routes one input event: the transcript gets first refusal, the composer
/// gets the rest.
fn dispatch_event(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    // Enter belongs to the grid only while a starter is focused
    let is_submit = matches!(event, TuiEvent::Submit);
    if !is_submit || tui.transcript.starter_grid.is_focused() {
        if let Some(transcript_event) = tui.transcript.handle_event(event) {
            return Some(transcript_event.into());
        }
        if is_submit {
            return None;
        }
    }

    match tui.composer.handle_event(event)? {
        ComposerEvent::Submit(text) => Some(Action::Append(NewMessage::user(text))),
        ComposerEvent::ContentChanged => {
            // Typing takes focus away from the starter grid
            tui.transcript.starter_grid.focused = None;
            None
        }
    }
}

fn spawn_starter_fetch(client: reqwest::Client, backend: String, tx: mpsc::Sender<Action>) {
    info!("Fetching starter questions from {}", backend);
    tokio::spawn(async move {
        let Some(questions) = load_starter_questions(&client, &backend).await else {
            return;
        };
        if tx.send(Action::StartersLoaded(questions)).is_err() {
            warn!("Dropping starter questions: view is gone");
        }
    });
}

fn spawn_request(
    chat: &ChatState,
    responder: Arc<dyn ChatResponder>,
    tx: mpsc::Sender<Action>,
) -> Vec<tokio::task::AbortHandle> {
    let request = chat.request_id();
    info!(
        "Spawning chat request {} ({} messages)",
        request,
        chat.messages.len()
    );

    let messages = chat.messages.clone();
    let (chunk_tx, mut chunk_rx) = tokio::sync::mpsc::channel::<String>(100);

    let stream_task =
        tokio::spawn(async move { responder.stream_reply(messages, chunk_tx).await });
    let stream_handle = stream_task.abort_handle();

    // Forwards chunks, then reports the outcome. Done/Failed always follow
    // the last chunk of the same request.
    let forward_handle = tokio::spawn(async move {
        let mut forwarded = 0usize;
        let mut total_len = 0usize;
        while let Some(text) = chunk_rx.recv().await {
            forwarded += 1;
            total_len += text.len();
            if tx.send(Action::ResponseChunk { request, text }).is_err() {
                warn!("Failed to forward ResponseChunk: receiver dropped");
                return;
            }
        }
        info!(
            "Request {} stream closed: {} chunks, {} content bytes",
            request, forwarded, total_len
        );

        let outcome = match stream_task.await {
            Ok(Ok(())) => Action::ResponseDone(request),
            Ok(Err(e)) => {
                info!("Stream error: {}", e);
                Action::ResponseFailed {
                    request,
                    error: e.to_string(),
                }
            }
            Err(e) if e.is_cancelled() => return,
            Err(e) => Action::ResponseFailed {
                request,
                error: format!("response task failed: {e}"),
            },
        };
        if tx.send(outcome).is_err() {
            warn!("Failed to send response outcome: receiver dropped");
        }
    });

    vec![stream_handle, forward_handle.abort_handle()]
}
