// ABOUTME: Bridges synchronous UI dispatch to async consumers through tokio channels
// ABOUTME: Provides the async EventHandler trait and the loop that drives it

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::mpsc;
use courier_logging::{debug, warn};

use crate::event::Event;
use crate::target::{ListenerId, Node};

/// Async consumer of forwarded events, e.g. the transport engine.
#[async_trait]
pub trait EventHandler: Send {
    type Error: Debug + Send + Sync;

    async fn handle(&mut self, event: Event) -> Result<(), Self::Error>;

    /// Optional: handle multiple events in one go
    async fn handle_batch(&mut self, events: Vec<Event>) -> Result<(), Self::Error> {
        for event in events {
            self.handle(event).await?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler failed to process {event_type}: {message}")]
    ProcessingFailed { event_type: String, message: String },
}

/// A listener that sends a fresh copy of every event it sees into `sender`.
///
/// Payload objects are shared with the dispatched event. Events are dropped
/// with a warning once the receiving side is gone.
pub fn forward_to(sender: mpsc::UnboundedSender<Event>) -> impl Fn(&Event) + Send + Sync + 'static {
    move |event: &Event| {
        if sender.send(event.snapshot()).is_err() {
            warn!(event_type = %event.event_type(), "Event receiver dropped, event not forwarded");
        }
    }
}

/// Registers a forwarding listener for each of `event_types` on `node`.
pub fn forward_events(
    node: &Node,
    event_types: &[&str],
) -> (Vec<ListenerId>, mpsc::UnboundedReceiver<Event>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let ids = event_types
        .iter()
        .map(|event_type| node.add_event_listener(*event_type, forward_to(sender.clone())))
        .collect();
    (ids, receiver)
}

/// Feeds events from `receiver` to `handler` until every sender is dropped.
///
/// Stops at the first handler error. Returns the number of handled events.
pub async fn run_handler<H: EventHandler>(
    mut receiver: mpsc::UnboundedReceiver<Event>,
    handler: &mut H,
) -> Result<usize, H::Error> {
    let mut handled = 0;
    while let Some(event) = receiver.recv().await {
        debug!(event_type = %event.event_type(), "Handling forwarded event");
        handler.handle(event).await?;
        handled += 1;
    }
    Ok(handled)
}
