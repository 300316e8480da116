//! Optimistic update helper
//!
//! Apply local effects first, record how to undo each one, then settle with
//! the network outcome:
//!
//! ```ignore
//! let mut tx = Transaction::begin("remove_item");
//! if let Some((index, item)) = cache.remove_item(&key, id).await {
//!     tx.record(RestoreCached { cache, key, index, item });
//! }
//! tx.settle(registry.remove_membership(..).await).await?;
//! ```

use async_trait::async_trait;
use shelf_core::Result;
use tracing::{debug, warn};

/// Undo action for one applied optimistic effect
#[async_trait]
pub trait Compensation: Send {
    /// Revert the effect
    async fn compensate(self: Box<Self>);
}

/// Set of optimistic effects awaiting the network outcome
///
/// Dropping a transaction that was neither committed nor rolled back (the
/// owning future was cancelled) rolls it back on a spawned task.
#[must_use = "a transaction must be committed, rolled back or settled"]
pub struct Transaction {
    label: &'static str,
    undo: Vec<Box<dyn Compensation>>,
}

impl Transaction {
    /// Start a transaction; `label` appears in logs
    pub fn begin(label: &'static str) -> Self {
        Self {
            label,
            undo: Vec::new(),
        }
    }

    /// Record the undo action of an effect that has just been applied
    pub fn record(&mut self, compensation: impl Compensation + 'static) {
        self.undo.push(Box::new(compensation));
    }

    /// Number of recorded effects
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    /// Check if no effect was recorded
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    /// Keep all effects
    pub fn commit(mut self) {
        debug!(transaction = self.label, effects = self.undo.len(), "Committed");
        self.undo.clear();
    }

    /// Revert all effects, most recent first
    pub async fn rollback(mut self) {
        warn!(transaction = self.label, effects = self.undo.len(), "Rolling back");
        // Popping one at a time leaves the rest to `Drop` if this future is cancelled
        while let Some(compensation) = self.undo.pop() {
            compensation.compensate().await;
        }
    }

    /// Commit on `Ok`, roll back on `Err`; the result passes through.
    ///
    /// On `Err` the rollback has completed before the error is returned.
    pub async fn settle<T>(self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.commit();
                Ok(value)
            }
            Err(e) => {
                self.rollback().await;
                Err(e)
            }
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.undo.is_empty() {
            return;
        }

        let label = self.label;
        let undo = std::mem::take(&mut self.undo);
        warn!(transaction = label, effects = undo.len(), "Dropped before settling, rolling back");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    for compensation in undo.into_iter().rev() {
                        compensation.compensate().await;
                    }
                    debug!(transaction = label, "Rolled back dropped transaction");
                });
            }
            Err(_) => {
                warn!(transaction = label, "No runtime to roll back on, effects are kept");
            }
        }
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("label", &self.label)
            .field("effects", &self.undo.len())
            .finish()
    }
}
