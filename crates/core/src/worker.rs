//! Background worker that executes lookup requests.
//!
//! The worker is the asynchronous half of the query executor: the session
//! issues tagged requests, the worker runs them against the lookup service,
//! and every request settles with exactly one event back on the UI channel.
//! Each lookup runs in its own task so a slow reply never delays a newer
//! request; superseded lookups are left to finish and their replies are
//! discarded by the session's epoch check rather than aborted.

use std::sync::Arc;

use tk_protocol::{Event, Op};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::client::SearchClient;

/// Run the searcher loop until the op channel closes or `Op::Shutdown`
/// arrives.
pub async fn run_searcher<C>(
    client: Arc<C>,
    mut op_rx: UnboundedReceiver<Op>,
    event_tx: UnboundedSender<Event>,
) where
    C: SearchClient + ?Sized + 'static,
{
    while let Some(op) = op_rx.recv().await {
        match op {
            Op::Search { request } => {
                let client = Arc::clone(&client);
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    let event = match client
                        .search(&request.query, request.limit, request.offset)
                        .await
                    {
                        Ok(response) => Event::SearchCompleted {
                            request_id: request.request_id,
                            response,
                        },
                        Err(error) => {
                            warn!(
                                request_id = request.request_id,
                                query = %request.query,
                                error = %error,
                                "search request failed"
                            );
                            Event::SearchFailed {
                                request_id: request.request_id,
                                error: error.to_string(),
                            }
                        }
                    };
                    let _ = event_tx.send(event);
                });
            }
            Op::Shutdown => break,
        }
    }
}
