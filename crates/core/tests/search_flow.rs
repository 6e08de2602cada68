//! End-to-end tests of the debounce -> worker -> session flow over channels.
//!
//! These tests wire the pieces together the way the UI loop does, with a
//! paused clock and scripted clients, and check the interaction contract:
//! debounce coalescing, out-of-order reply discard, failure isolation, and
//! commit semantics.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{candidate, MockSearchClient};
use tk_core::{run_searcher, Debouncer, InputOutcome, Phase, SearchSession, SettleOutcome};
use tk_protocol::{Event, Op};
use tokio::sync::mpsc::unbounded_channel;

const DEBOUNCE: Duration = Duration::from_millis(300);

#[tokio::test(start_paused = true)]
async fn test_rapid_keystrokes_trigger_exactly_one_search() {
    let client = Arc::new(
        MockSearchClient::new().with_response("rust", vec![candidate("1", "Rust")]),
    );
    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, mut event_rx) = unbounded_channel();
    let (fire_tx, mut fire_rx) = unbounded_channel();
    tokio::spawn(run_searcher(Arc::clone(&client), op_rx, event_tx));

    let mut session = SearchSession::new(10);
    let mut debouncer = Debouncer::new(DEBOUNCE, fire_tx);

    // Four keystrokes, each well inside the previous quiet window.
    for text in ["r", "ru", "rus", "rust"] {
        assert_eq!(session.set_query(text), InputOutcome::ScheduleDebounce);
        debouncer.schedule();
        tokio::time::advance(Duration::from_millis(100)).await;
    }

    let fired = fire_rx.recv().await.unwrap();
    assert!(debouncer.is_current(fired.generation));
    let request = session.begin_search().unwrap();
    assert_eq!(request.query, "rust");
    op_tx.send(Op::Search { request }).unwrap();

    let event = event_rx.recv().await.unwrap();
    session.handle_event(event);

    // Exactly one lookup, for the last keystroke's text.
    assert_eq!(client.calls(), vec!["rust".to_string()]);
    assert_eq!(session.phase(), Phase::Shown);
    assert_eq!(session.results().len(), 1);
    assert!(fire_rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_late_reply_to_superseded_request_is_never_displayed() {
    // "ab" answers slowly, "abc" answers immediately: issuance order is
    // ab -> abc but settlement order is abc -> ab.
    let client = Arc::new(
        MockSearchClient::new()
            .with_response("ab", vec![candidate("1", "ab-match")])
            .with_delay("ab", Duration::from_millis(500))
            .with_response("abc", vec![candidate("2", "abc-match")]),
    );
    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, mut event_rx) = unbounded_channel();
    tokio::spawn(run_searcher(Arc::clone(&client), op_rx, event_tx));

    let mut session = SearchSession::new(10);

    session.set_query("ab");
    let first = session.begin_search().unwrap();
    op_tx.send(Op::Search { request: first.clone() }).unwrap();

    session.set_query("abc");
    let second = session.begin_search().unwrap();
    op_tx.send(Op::Search { request: second.clone() }).unwrap();

    // The fast reply lands first and drives the overlay.
    let event = event_rx.recv().await.unwrap();
    assert!(matches!(
        event,
        Event::SearchCompleted { request_id, .. } if request_id == second.request_id
    ));
    session.handle_event(event);
    assert_eq!(session.results()[0].name, "abc-match");

    // The slow reply lands later and must be discarded.
    let event = event_rx.recv().await.unwrap();
    match event {
        Event::SearchCompleted {
            request_id,
            response,
        } => {
            assert_eq!(request_id, first.request_id);
            assert_eq!(session.on_response(request_id, response), SettleOutcome::Stale);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].name, "abc-match");
    assert_eq!(session.phase(), Phase::Shown);
}

#[tokio::test(start_paused = true)]
async fn test_empty_query_resets_without_network_call() {
    let client = Arc::new(MockSearchClient::new());
    let (_op_tx, op_rx) = unbounded_channel::<Op>();
    let (event_tx, _event_rx) = unbounded_channel();
    tokio::spawn(run_searcher(Arc::clone(&client), op_rx, event_tx));

    let mut session = SearchSession::new(10);
    let (fire_tx, mut fire_rx) = unbounded_channel();
    let mut debouncer = Debouncer::new(DEBOUNCE, fire_tx);

    session.set_query("q");
    debouncer.schedule();

    // The user deletes the text before the window elapses.
    assert_eq!(session.set_query(""), InputOutcome::Cleared);
    debouncer.cancel();

    tokio::time::advance(Duration::from_millis(1000)).await;
    tokio::task::yield_now().await;

    assert!(fire_rx.try_recv().is_err());
    assert!(client.calls().is_empty());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.overlay_visible());
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_leaves_prior_state() {
    let client = Arc::new(
        MockSearchClient::new()
            .with_response("go", vec![candidate("1", "Go")])
            .with_failure("gol", "internal error"),
    );
    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, mut event_rx) = unbounded_channel();
    tokio::spawn(run_searcher(Arc::clone(&client), op_rx, event_tx));

    let mut session = SearchSession::new(10);

    session.set_query("go");
    let request = session.begin_search().unwrap();
    op_tx.send(Op::Search { request }).unwrap();
    let event = event_rx.recv().await.unwrap();
    session.handle_event(event);
    assert_eq!(session.phase(), Phase::Shown);

    // The retype hides the overlay; the failing lookup changes nothing else.
    session.set_query("gol");
    let request = session.begin_search().unwrap();
    op_tx.send(Op::Search { request }).unwrap();
    let event = event_rx.recv().await.unwrap();
    assert!(matches!(event, Event::SearchFailed { .. }));
    session.handle_event(event);

    assert!(!session.is_loading());
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].name, "Go");
    assert_eq!(session.phase(), Phase::Pending);
    assert!(!session.overlay_visible());
}

#[tokio::test(start_paused = true)]
async fn test_commit_flow_clears_everything() {
    let client = Arc::new(MockSearchClient::new().with_response(
        "lang",
        vec![candidate("1", "Go"), candidate("2", "Rust")],
    ));
    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, mut event_rx) = unbounded_channel();
    tokio::spawn(run_searcher(Arc::clone(&client), op_rx, event_tx));

    let mut session = SearchSession::new(10);
    session.set_query("lang");
    let request = session.begin_search().unwrap();
    op_tx.send(Op::Search { request }).unwrap();
    let event = event_rx.recv().await.unwrap();
    session.handle_event(event);

    session.select_next();
    session.select_next();
    assert_eq!(session.selected(), Some(1));

    let committed = session.commit_selected().unwrap();
    assert_eq!(committed.id, "2");
    assert_eq!(committed.name, "Rust");

    assert_eq!(session.query(), "");
    assert!(!session.overlay_visible());
    assert!(session.selected().is_none());
    assert_eq!(session.phase(), Phase::Idle);
}
