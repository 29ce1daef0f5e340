//! Change notification for layout and tree updates
//!
//! A small broadcast built on `std::sync::mpsc`: every subscriber owns a
//! receiver, the notifier keeps the senders. Events carry a version and are
//! delivered strictly in increasing version order.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// Events that carry a monotonically increasing version
pub trait Versioned {
    fn version(&self) -> u64;
}

impl<T: Versioned + ?Sized> Versioned for Arc<T> {
    fn version(&self) -> u64 {
        (**self).version()
    }
}

/// Multi-subscriber broadcast of versioned change events.
///
/// The notifier can be shut down and restarted. A restart keeps the version
/// floor, so subscribers of the restarted stream still never see a version
/// at or below one that was already delivered.
#[derive(Debug)]
pub struct ChangeNotifier<E> {
    subscribers: Vec<Sender<E>>,
    last_version: Option<u64>,
    running: bool,
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            last_version: None,
            running: true,
        }
    }
}

impl<E: Versioned + Clone> ChangeNotifier<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&mut self) -> Subscription<E> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    /// Deliver `event` to every live subscriber.
    ///
    /// Returns how many subscribers received it. Events whose version does not
    /// advance past the last delivered one are dropped.
    pub fn emit(&mut self, event: E) -> usize {
        if !self.running {
            return 0;
        }

        let version = event.version();
        if let Some(last) = self.last_version {
            if version <= last {
                tracing::warn!(version, last, "dropping out-of-order change event");
                return 0;
            }
        }
        self.last_version = Some(version);

        // Senders whose receiver was dropped are pruned here
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        self.subscribers.len()
    }

    /// Number of subscribers that were alive at the last emit
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Version of the last delivered event
    pub fn last_version(&self) -> Option<u64> {
        self.last_version
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Disconnect every subscriber and stop delivering events
    pub fn shutdown(&mut self) {
        if !self.subscribers.is_empty() {
            tracing::debug!(
                subscribers = self.subscribers.len(),
                "shutting down change notifier"
            );
        }
        self.subscribers.clear();
        self.running = false;
    }

    /// Resume delivery after a shutdown (or drop all current subscribers when
    /// still running). The version floor is kept.
    pub fn restart(&mut self) {
        self.subscribers.clear();
        self.running = true;
    }
}

/// Receiving end of a [`ChangeNotifier`]
#[derive(Debug)]
pub struct Subscription<E> {
    rx: Receiver<E>,
}

impl<E> Subscription<E> {
    /// Next pending event, if any (non-blocking)
    pub fn try_recv(&self) -> Option<E> {
        self.rx.try_recv().ok()
    }

    /// All pending events in delivery order
    pub fn drain(&self) -> Vec<E> {
        self.rx.try_iter().collect()
    }

    /// Discard everything but the newest pending event
    pub fn latest(&self) -> Option<E> {
        self.rx.try_iter().last()
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<E> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// True once the notifier has dropped this subscriber and nothing is pending
    pub fn is_disconnected(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }
}
