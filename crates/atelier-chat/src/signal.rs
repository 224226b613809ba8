//! Page-wide "open assistant" signal.
//!
//! Any trigger holding an [`AssistantSignal`] can ask every subscribed widget
//! to open. Widgets subscribe explicitly and stop listening when their
//! [`AssistantSubscription`] is dropped.

use tokio::sync::broadcast;
use tracing::debug;

const SIGNAL_CAPACITY: usize = 16;

/// Events carried by the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantEvent {
    /// Open the chat widget.
    Open,
}

/// Publisher side of the signal. Cheap to clone; every clone feeds the same
/// subscribers.
#[derive(Debug, Clone)]
pub struct AssistantSignal {
    tx: broadcast::Sender<AssistantEvent>,
}

impl Default for AssistantSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    /// Ask subscribed widgets to open. Returns how many subscribers saw it.
    pub fn raise_open(&self) -> usize {
        // No subscribers is not an error: the trigger may fire before any widget mounts
        let delivered = self.tx.send(AssistantEvent::Open).unwrap_or(0);
        debug!(delivered, "Open-assistant signal raised");
        delivered
    }

    /// Start listening. Only events raised after this call are seen.
    pub fn subscribe(&self) -> AssistantSubscription {
        AssistantSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Receiving side of the signal. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AssistantSubscription {
    rx: broadcast::Receiver<AssistantEvent>,
}

impl AssistantSubscription {
    /// Wait for the next event. Returns `None` once every publisher is gone.
    pub async fn next(&mut self) -> Option<AssistantEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged behind open-assistant signal");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<AssistantEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}
