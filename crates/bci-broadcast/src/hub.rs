//! Channel-based subscriber fan-out: bridges the loop's per-tick output to
//! external sinks over transport push rather than file persistence. Each
//! subscriber gets its own bounded `mpsc::sync_channel`, and a slow or dead
//! subscriber never blocks the tick loop — a full queue just drops the
//! message, and a disconnected receiver is pruned on the next publish.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Mutex;

use crate::message::Message;

/// Fan-out point for outbound [`Message`]s.
///
/// `new(capacity)`'s `capacity` bounds each subscriber's own queue, not the
/// hub as a whole — there is no limit on subscriber count.
pub struct BroadcastHub {
    subscribers: Mutex<Vec<SyncSender<Message>>>,
    capacity: usize,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        Self { subscribers: Mutex::new(Vec::new()), capacity: capacity.max(1) }
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> Receiver<Message> {
        let (tx, rx) = sync_channel(self.capacity);
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Push one message to every live subscriber. A subscriber whose queue
    /// is full simply misses this message; a subscriber whose receiver was
    /// dropped is pruned.
    pub fn publish(&self, message: Message) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| match tx.try_send(message.clone()) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    pub fn publish_all(&self, messages: impl IntoIterator<Item = Message>) {
        for message in messages {
            self.publish(message);
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(64)
    }
}
