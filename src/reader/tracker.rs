//! Active-section tracker
//!
//! One cell holding the id of the section the reader is currently on. Two
//! producers write it (TOC activation, pointer entering a section) and the TOC
//! highlight reads it. Writes are last-write-wins; the watch channel
//! serialises them across the server's worker threads.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    sender: Arc<watch::Sender<Option<String>>>,
}

impl Default for ActiveSectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveSectionTracker {
    /// Tracker with no active section
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Make `id` the active section
    ///
    /// Returns `false` when `id` was already active; subscribers are only
    /// notified on an actual change.
    pub fn set(&self, id: &str) -> bool {
        self.sender.send_if_modified(|current| {
            if current.as_deref() == Some(id) {
                return false;
            }
            *current = Some(id.to_string());
            true
        })
    }

    /// Currently active section id
    pub fn current(&self) -> Option<String> {
        self.sender.borrow().clone()
    }

    /// Receiver that wakes on every change
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.sender.subscribe()
    }
}
