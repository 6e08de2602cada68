//! TUI application state and event loop.
//!
//! This module defines the `App` struct that owns the search control's state
//! machine and drives it from three event sources with `tokio::select!`:
//! terminal input, debounce firings, and settled lookups from the worker.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tk_core::{DebounceFired, Debouncer, InputOutcome, SearchSession};
use tk_protocol::{Candidate, Event, Op};
use tokio::select;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;
use tracing::info;

use crate::event::EventStatus;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{results_overlay, SearchBox};

/// Runtime options for the search UI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the lookup service.
    pub endpoint: String,
    /// Page size requested per lookup.
    pub limit: u32,
    /// Quiet window between the last keystroke and the lookup.
    pub debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/search".to_string(),
            limit: 10,
            debounce: Debouncer::DEFAULT_DELAY,
        }
    }
}

/// Main TUI application state.
pub struct App {
    /// The interaction state machine.
    session: SearchSession,
    /// Query line editing state.
    search_box: SearchBox,
    /// Keystroke-coalescing timer.
    debouncer: Debouncer,
    /// Receives debounce firings.
    fire_rx: UnboundedReceiver<DebounceFired>,
    /// Channel to send operations to the search worker.
    op_tx: UnboundedSender<Op>,
    /// Channel to receive settled lookups from the worker.
    event_rx: UnboundedReceiver<Event>,
    /// Where the overlay was last drawn, for pointer hit-testing.
    overlay_area: Option<Rect>,
    /// Most recently committed selection, surfaced in the status line.
    last_committed: Option<Candidate>,
    /// Flag to indicate if the application should exit.
    should_exit: bool,
}

impl App {
    /// Create a new App with communication channels to the search worker.
    pub fn new(
        config: AppConfig,
        op_tx: UnboundedSender<Op>,
        event_rx: UnboundedReceiver<Event>,
    ) -> Self {
        let (fire_tx, fire_rx) = unbounded_channel();
        Self {
            session: SearchSession::new(config.limit),
            search_box: SearchBox::new(),
            debouncer: Debouncer::new(config.debounce, fire_tx),
            fire_rx,
            op_tx,
            event_rx,
            overlay_area: None,
            last_committed: None,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle terminal input, debounce firings, and
    /// worker events concurrently. Redraws after every handled event.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.draw(|frame| self.render(frame))?;

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.session.handle_event(event);
                }
                Some(fired) = self.fire_rx.recv() => {
                    self.handle_debounce_fired(fired);
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui_event);
                }
            }
            tui.draw(|frame| self.render(frame))?;
        }

        let _ = self.op_tx.send(Op::Shutdown);
        Ok(())
    }

    /// A quiet window elapsed.
    ///
    /// Firings queued behind a newer keystroke or a cleared query are
    /// dropped: the generation check catches the former, the session's
    /// empty-query guard the latter.
    fn handle_debounce_fired(&mut self, fired: DebounceFired) {
        if !self.debouncer.is_current(fired.generation) {
            return;
        }
        if let Some(request) = self.session.begin_search() {
            let _ = self.op_tx.send(Op::Search { request });
        }
    }

    /// Handle terminal events (keyboard, mouse, paste, resize).
    fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) => self.handle_key_event(key_event),
            TuiEvent::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            TuiEvent::Paste(pasted) => {
                self.search_box.insert_str(&pasted);
                self.query_edited();
            }
            TuiEvent::Resize => {}
        }
    }

    /// Handle keyboard events.
    ///
    /// The overlay dispatcher gets first refusal; whatever it does not
    /// consume is plain text editing.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_exit = true;
            return;
        }

        if self.handle_overlay_key(key_event) == EventStatus::Consumed {
            return;
        }
        self.handle_text_key(key_event);
    }

    /// Navigation keys, active only while the overlay is shown.
    fn handle_overlay_key(&mut self, key_event: KeyEvent) -> EventStatus {
        if !self.session.overlay_visible() {
            return EventStatus::NotConsumed;
        }

        match key_event.code {
            KeyCode::Down => {
                self.session.select_next();
                EventStatus::Consumed
            }
            KeyCode::Up => {
                self.session.select_prev();
                EventStatus::Consumed
            }
            KeyCode::Enter => {
                // No-op when nothing is highlighted.
                if let Some(candidate) = self.session.commit_selected() {
                    self.finish_commit(candidate);
                }
                EventStatus::Consumed
            }
            _ => EventStatus::NotConsumed,
        }
    }

    /// Plain text editing, always available.
    fn handle_text_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char(c) => {
                self.search_box.insert_char(c);
                self.query_edited();
            }
            KeyCode::Backspace => {
                self.search_box.delete_char();
                self.query_edited();
            }
            KeyCode::Left => self.search_box.move_cursor_left(),
            KeyCode::Right => self.search_box.move_cursor_right(),
            KeyCode::Esc => {
                self.search_box.clear();
                self.query_edited();
            }
            _ => {}
        }
    }

    /// Pointer clicks: a left click on a candidate row commits that row,
    /// regardless of the current highlight.
    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if !matches!(mouse_event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        if !self.session.overlay_visible() {
            return;
        }
        let Some(overlay) = self.overlay_area else {
            return;
        };

        if let Some(index) = results_overlay::candidate_row_at(
            overlay,
            self.session.results().len(),
            mouse_event.column,
            mouse_event.row,
        ) {
            if let Some(candidate) = self.session.commit(index) {
                self.finish_commit(candidate);
            }
        }
    }

    /// Input Controller contract: the session sees every edit immediately;
    /// a non-empty query (re)starts the quiet window, an empty one resets
    /// synchronously with no network call.
    fn query_edited(&mut self) {
        match self.session.set_query(self.search_box.input()) {
            InputOutcome::ScheduleDebounce => self.debouncer.schedule(),
            InputOutcome::Cleared => self.debouncer.cancel(),
        }
    }

    /// Consumer callback boundary: surface the selection, then the control
    /// is back at idle with the query cleared.
    fn finish_commit(&mut self, candidate: Candidate) {
        info!(id = %candidate.id, name = %candidate.name, "selection committed");
        self.search_box.clear();
        self.debouncer.cancel();
        self.last_committed = Some(candidate);
    }

    /// Render the TUI.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Search box on top, overlay directly beneath, status line below.
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(12),
                Constraint::Min(1),
            ])
            .split(area);

        self.search_box
            .render(chunks[0], frame.buffer_mut(), self.session.is_loading());

        if self.session.overlay_visible() {
            self.overlay_area = Some(chunks[1]);
            results_overlay::render_overlay(
                frame,
                chunks[1],
                self.session.results(),
                self.session.selected(),
                self.session.total_results(),
            );
        } else {
            self.overlay_area = None;
        }

        self.render_status(frame, chunks[2]);
    }

    /// Render the status line (committed selection and key hints).
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let text = match &self.last_committed {
            Some(candidate) => format!("Selected: {} (id {})", candidate.name, candidate.id),
            None => "Type to search. Up/Down to navigate, Enter to select, Ctrl-C to quit."
                .to_string(),
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(paragraph, area);
    }
}
