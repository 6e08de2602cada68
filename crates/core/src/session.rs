//! Interaction state machine for the incremental-search control.
//!
//! `SearchSession` owns everything the overlay needs: the current query, the
//! result page, the highlighted row, and the request epoch that guards
//! against out-of-order replies. It is deliberately free of I/O; the caller
//! wires it to a [`crate::Debouncer`] and the worker channels.

use tk_protocol::{Candidate, Event, SearchRequest, SearchResponse};
use tracing::debug;

/// Lifecycle phase of the control.
///
/// The phase progresses Idle -> Pending -> Shown during a normal search
/// cycle and falls back to Idle on query-clear or commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Empty query, overlay hidden.
    Idle,

    /// Debounce running or a request in flight; overlay hidden.
    Pending,

    /// Overlay visible with a settled result page (possibly empty).
    Shown,
}

/// What the caller should do after reporting a query edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Non-empty query: (re)start the debounce timer.
    ScheduleDebounce,

    /// Query became empty: results cleared and overlay hidden synchronously,
    /// with no network call. Cancel any pending timer.
    Cleared,
}

/// Result of feeding a settled reply into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The reply belonged to the most recently issued request and now drives
    /// the overlay.
    Applied,

    /// The reply was superseded by a newer request and was discarded without
    /// touching the result state.
    Stale,
}

/// State machine for one search control instance.
///
/// Invariants maintained across every mutation:
/// - the highlighted row, when set, indexes into the current result page
/// - the overlay is visible only in [`Phase::Shown`]
/// - only the reply to the most recently issued request is ever applied
#[derive(Debug)]
pub struct SearchSession {
    /// The user's raw input, mutated on every keystroke.
    query: String,

    /// Current result page, service order preserved.
    results: Vec<Candidate>,

    /// Total matches reported by the service; may exceed the page length.
    total_results: u64,

    /// Highlighted row, `None` while nothing is selected.
    selected: Option<usize>,

    /// Lifecycle phase; `Shown` is the only phase with a visible overlay.
    phase: Phase,

    /// True from request issue until that request settles.
    loading: bool,

    /// Page size captured into every issued request.
    limit: u32,

    /// Monotonic counter backing the request epoch.
    next_request_id: u64,

    /// Epoch of the most recently issued request; `None` when no reply is
    /// welcome (idle, cleared, or committed).
    latest_issued: Option<u64>,
}

impl SearchSession {
    /// Create an idle session issuing requests with the given page size.
    pub fn new(limit: u32) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            total_results: 0,
            selected: None,
            phase: Phase::Idle,
            loading: false,
            limit,
            next_request_id: 0,
            latest_issued: None,
        }
    }

    /// The current raw query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current result page.
    pub fn results(&self) -> &[Candidate] {
        &self.results
    }

    /// Total matches reported by the service for the current page.
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Highlighted row, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when the overlay should be on screen.
    pub fn overlay_visible(&self) -> bool {
        self.phase == Phase::Shown
    }

    /// Record a query edit.
    ///
    /// The query always reflects the edit immediately; what happens next
    /// depends on the new text. A non-empty query hides any open overlay
    /// (hide-on-retype) and asks the caller to restart the quiet window. An
    /// empty query resets the whole session synchronously: results cleared,
    /// overlay hidden, epoch invalidated so a late reply cannot re-open the
    /// overlay. No network call is made in either case.
    pub fn set_query(&mut self, text: &str) -> InputOutcome {
        if text.is_empty() {
            self.reset_to_idle();
            InputOutcome::Cleared
        } else {
            self.query = text.to_string();
            self.phase = Phase::Pending;
            InputOutcome::ScheduleDebounce
        }
    }

    /// Issue a new request epoch for the current query.
    ///
    /// Returns the tagged request parameters the worker should execute, or
    /// `None` when the query is empty (a debounce firing can race a clear;
    /// the stale firing is dropped here rather than at every call site).
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if self.query.is_empty() {
            return None;
        }

        self.phase = Phase::Pending;
        self.loading = true;
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.latest_issued = Some(request_id);

        Some(SearchRequest {
            request_id,
            query: self.query.clone(),
            limit: self.limit,
            offset: 0,
        })
    }

    /// Feed a worker event into the session.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::SearchCompleted {
                request_id,
                response,
            } => {
                self.on_response(request_id, response);
            }
            Event::SearchFailed { request_id, error } => self.on_failure(request_id, &error),
        }
    }

    /// Apply a successful reply.
    ///
    /// A reply whose tag no longer matches the most recently issued request
    /// is discarded entirely: no result mutation, no visibility change. The
    /// loading flag still clears on every settle, matching the reference
    /// behavior of a finally-block around the request.
    pub fn on_response(&mut self, request_id: u64, response: SearchResponse) -> SettleOutcome {
        self.loading = false;

        if self.latest_issued != Some(request_id) {
            debug!(request_id, "discarding stale search reply");
            return SettleOutcome::Stale;
        }

        self.results = response.results;
        self.total_results = response.total_results;
        self.selected = None;
        self.phase = Phase::Shown;
        SettleOutcome::Applied
    }

    /// Record a failed reply.
    ///
    /// The result page and visibility keep their prior state; only the
    /// loading flag clears. The worker has already logged the failure.
    pub fn on_failure(&mut self, request_id: u64, error: &str) {
        self.loading = false;
        debug!(request_id, error, "search reply reported failure");
    }

    /// Move the highlight one row down, clamped to the last row.
    ///
    /// Only meaningful while the overlay is shown; with an empty result page
    /// the highlight stays unset. A first press with nothing selected lands
    /// on the top row.
    pub fn select_next(&mut self) {
        if self.phase != Phase::Shown || self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        self.selected = Some(match self.selected {
            Some(index) => (index + 1).min(last),
            None => 0,
        });
    }

    /// Move the highlight one row up, clamped to the top row.
    ///
    /// A first press with nothing selected also lands on the top row; this
    /// keeps the reference clamp-to-zero behavior rather than leaving the
    /// highlight unset.
    pub fn select_prev(&mut self) {
        if self.phase != Phase::Shown || self.results.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => index.saturating_sub(1),
            None => 0,
        });
    }

    /// Commit the candidate at `index`, yielding it to the caller.
    ///
    /// Terminal per search cycle: the query is cleared, the overlay hidden,
    /// the highlight unset, and any in-flight request invalidated. Commits
    /// outside the overlay or past the result page are rejected and leave
    /// the session untouched.
    pub fn commit(&mut self, index: usize) -> Option<Candidate> {
        if self.phase != Phase::Shown {
            return None;
        }
        let candidate = self.results.get(index)?.clone();
        self.reset_to_idle();
        Some(candidate)
    }

    /// Commit the currently highlighted candidate, if any.
    pub fn commit_selected(&mut self) -> Option<Candidate> {
        let index = self.selected?;
        self.commit(index)
    }

    fn reset_to_idle(&mut self) {
        self.query.clear();
        self.results.clear();
        self.total_results = 0;
        self.selected = None;
        self.phase = Phase::Idle;
        self.loading = false;
        self.latest_issued = None;
    }
}
