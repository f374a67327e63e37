/**
 * Shutdown Signal
 *
 * Long-lived responses (the `/realtime` SSE feed and `/ws` sockets) never
 * finish on their own, so graceful shutdown would wait on them forever.
 * They select on this signal and end once it fires.
 */

use tokio::sync::watch;

/// Cloneable one-way switch from running to stopping
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Ask every long-lived response to finish
    pub fn trigger(&self) {
        // send_replace stores the value even while nobody is subscribed
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once `trigger` has been called, immediately if it already was
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting
        let _ = rx.wait_for(|stopping| *stopping).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
