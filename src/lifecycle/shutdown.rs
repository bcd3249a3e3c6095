//! Process-wide stop signal.
//!
//! `main` owns one [`Shutdown`]; the server holds a receiver and stops
//! accepting once it fires. In-flight relays finish, then the listening
//! socket is dropped.

use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Returns how many servers were told to stop.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once the signal fires or its owner is gone.
pub async fn wait(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
