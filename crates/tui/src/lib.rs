//! # tk-tui
//!
//! Terminal user interface for typeahead-kit.
//!
//! This crate hosts the incremental-search control: a search box with a
//! debounced query, a results overlay fed by the `tk-core` search worker,
//! and keyboard/pointer selection. It communicates with the worker via the
//! `Op` and `Event` protocol defined in `tk-protocol`.

pub mod app;
pub mod event;
pub mod tui;
pub mod widgets;

pub use app::{App, AppConfig};
pub use tui::Tui;

use std::sync::Arc;

use anyhow::Result;
use tk_core::{run_searcher, HttpSearchClient};
use tokio::sync::mpsc::unbounded_channel;

/// Run the full-screen search UI until the user exits.
///
/// Wires the HTTP client into the search worker, initializes the terminal,
/// and drives the application loop. The worker is asked to shut down when
/// the loop ends; lookups still in flight are abandoned with it.
pub async fn run_app(config: AppConfig) -> Result<()> {
    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel();

    let client = Arc::new(HttpSearchClient::new(config.endpoint.clone()));
    let worker = tokio::spawn(run_searcher(client, op_rx, event_tx));

    let mut tui = Tui::init()?;
    let mut app = App::new(config, op_tx, event_rx);
    let result = app.run(&mut tui).await;

    // Dropping the app closes the op channel, so the worker loop ends even
    // when the run ended on an error path before sending Shutdown.
    drop(app);
    tui.restore()?;
    let _ = worker.await;
    result
}
