//! Terminal initialization and event streaming.
//!
//! This module provides the `Tui` wrapper around ratatui's Terminal,
//! handling raw mode setup, mouse capture, and the unified event stream the
//! application loop consumes.

use std::io::{stdout, Stdout};
use std::pin::Pin;

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    KeyEvent, MouseEvent,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio_stream::{Stream, StreamExt};

/// Type alias for the terminal backend we're using.
pub type TerminalBackend = CrosstermBackend<Stdout>;

/// Terminal events surfaced to the application loop.
#[derive(Debug)]
pub enum TuiEvent {
    /// Keyboard event.
    Key(KeyEvent),
    /// Mouse event (pointer selection on overlay rows).
    Mouse(MouseEvent),
    /// Paste event (from bracketed paste), routed to the search box.
    Paste(String),
    /// The terminal was resized; a redraw is enough.
    Resize,
}

/// Main TUI wrapper.
pub struct Tui {
    /// The underlying ratatui terminal.
    terminal: Terminal<TerminalBackend>,
}

impl Tui {
    /// Initialize the terminal in raw mode with mouse capture enabled.
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableMouseCapture
        )?;

        // Restore the terminal even if we panic mid-draw.
        set_panic_hook();

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    /// Create the stream of terminal events for the application loop.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut crossterm_events = crossterm::event::EventStream::new();

        let event_stream = async_stream::stream! {
            while let Some(Ok(event)) = crossterm_events.next().await {
                match event {
                    Event::Key(key_event) => yield TuiEvent::Key(key_event),
                    Event::Mouse(mouse_event) => yield TuiEvent::Mouse(mouse_event),
                    Event::Paste(pasted) => yield TuiEvent::Paste(pasted),
                    Event::Resize(_, _) => yield TuiEvent::Resize,
                    _ => {}
                }
            }
        };

        Box::pin(event_stream)
    }

    /// Draw the UI with the provided function.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Set a panic hook that restores the terminal before panicking.
fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));
}
