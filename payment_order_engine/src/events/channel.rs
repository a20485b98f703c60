//! Simple stateless pub-sub event channel
//!
//! An [`EventHandler`] owns the receiving end of a bounded channel and a single async handler function. Any number of
//! [`EventProducer`]s can feed it. Events are handled one at a time, in the order they were received, so a slow
//! handler applies back-pressure to the producers once the buffer is full.
//!
//! The handler has no access to the internal state of the system. All that is received is the event itself.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::sync::mpsc;

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        Self { listener: receiver, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Run the handler until every producer has been dropped.
    ///
    /// Producers must be created with [`Self::subscribe`] before this is called.
    pub async fn start_handler(mut self) {
        debug!("📬️ Starting event handler");
        // drop the internal sender so that when the last producer is dropped, we can automatically shut down the
        // handler
        drop(self.sender);
        let mut handled = 0u64;
        while let Some(ev) = self.listener.recv().await {
            trace!("📬️ Handling event");
            (self.handler)(ev).await;
            handled += 1;
            trace!("📬️ Event handled");
        }
        debug!("📬️ Event handler has shut down after handling {handled} events");
    }
}

pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

// Derived Clone would demand `E: Clone`, which a sender does not need.
impl<E: Send + Sync> Clone for EventProducer<E> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to send event: {e}");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
