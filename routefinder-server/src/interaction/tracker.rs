//! Interaction ids and cancellation.
//!
//! Every click takes the next id from the tracker. A [`CancelToken`] stays
//! live until a later click is started, at which point its
//! [`cancelled`](CancelToken::cancelled) future resolves.

use tokio::sync::watch;

/// Issues monotonically increasing interaction ids.
#[derive(Debug)]
pub struct InteractionTracker {
    current: watch::Sender<u64>,
}

impl Default for InteractionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionTracker {
    pub fn new() -> Self {
        let (current, _) = watch::channel(0);
        Self { current }
    }

    /// Start a new interaction, cancelling the previous one.
    pub fn begin(&self) -> CancelToken {
        let mut id = 0;
        self.current.send_modify(|current| {
            *current += 1;
            id = *current;
        });
        CancelToken {
            id,
            current: self.current.subscribe(),
        }
    }

    /// Id of the latest interaction, 0 before the first click.
    pub fn current(&self) -> u64 {
        *self.current.borrow()
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.current() == id
    }
}

/// Handle held by one in-flight interaction.
#[derive(Debug, Clone)]
pub struct CancelToken {
    id: u64,
    current: watch::Receiver<u64>,
}

impl CancelToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        *self.current.borrow() != self.id
    }

    /// Resolves once a newer interaction has started.
    ///
    /// Never resolves if the tracker is dropped first.
    pub async fn cancelled(&self) {
        let mut current = self.current.clone();
        let id = self.id;
        if current.wait_for(|&c| c != id).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
