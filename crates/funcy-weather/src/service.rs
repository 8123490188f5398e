//! Async lookup dispatch.
//! Each lookup runs on its own task; results come back via mpsc.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::pipeline::WeatherPipeline;
use crate::state::{LookupResult, LookupTicket};

/// Messages sent from lookup tasks back to the front-end loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    LookupDone(LookupResult),
}

/// Run `ticket` in the background. Sends `LookupDone` when it settles.
///
/// Earlier lookups are not cancelled; the controller decides what to do with
/// results that arrive out of order.
pub fn request_lookup(
    tx: &UnboundedSender<WeatherServiceMessage>,
    pipeline: Arc<WeatherPipeline>,
    ticket: LookupTicket,
) -> JoinHandle<()> {
    let tx = tx.clone();

    tokio::spawn(async move {
        let outcome = pipeline.lookup(&ticket.query).await;
        let result = LookupResult {
            seq: ticket.seq,
            query: ticket.query,
            outcome,
        };

        if tx.send(WeatherServiceMessage::LookupDone(result)).is_err() {
            tracing::debug!("Lookup #{} finished after receiver closed", ticket.seq);
        }
    })
}
