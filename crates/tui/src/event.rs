//! Event routing types for the TUI.
//!
//! Key events pass through two handlers in order: the overlay dispatcher
//! (navigation and commit, active only while the overlay is shown) and plain
//! text editing. `EventStatus` is how the first handler tells the router
//! whether to stop.

/// Status of an event after being offered to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was handled and should not be propagated further.
    Consumed,
    /// The event was not handled and should be passed to the next handler.
    NotConsumed,
}
