//! Per-block handler registry and the chain-following loop.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::node::{BlockHeight, NodeResult};
use crate::scheduler::watcher::BlockWatcher;

/// Error type returned by block handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Work performed once per block height.
#[async_trait]
pub trait BlockHandler: Send + Sync {
    /// Handle a new chain height.
    async fn on_block(&self, height: BlockHeight) -> Result<(), HandlerError>;

    /// Name of this handler for logging.
    fn name(&self) -> String;
}

/// Ordered registry of block handlers, driven by block height.
///
/// Clones share the same registry, so handlers can be registered from any
/// task while the loop is running. The loop takes a fresh snapshot of the
/// registry at the start of every iteration.
#[derive(Clone, Default)]
pub struct BlockEventLoop {
    handlers: Arc<Mutex<Vec<Arc<dyn BlockHandler>>>>,
}

impl BlockEventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Returns false if this exact handler is already registered.
    pub fn register(&self, handler: Arc<dyn BlockHandler>) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        if handlers.iter().any(|h| same_handler(h, &handler)) {
            return false;
        }
        tracing::debug!(handler = %handler.name(), "block handler registered");
        handlers.push(handler);
        true
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<Arc<dyn BlockHandler>> {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run every handler once for `height`, in registration order.
    ///
    /// Handler errors are logged and do not stop the remaining handlers.
    /// Returns the number of handlers that failed.
    pub async fn dispatch(&self, height: BlockHeight) -> usize {
        let mut failed = 0;
        for handler in self.snapshot() {
            if let Err(e) = handler.on_block(height).await {
                failed += 1;
                tracing::error!(
                    handler = %handler.name(),
                    height = height.value(),
                    error = %e,
                    "block handler failed"
                );
            }
        }
        failed
    }

    /// Follow the chain, dispatching every handler once per new height.
    ///
    /// Runs while at least one handler is registered. Only a failure to read
    /// the chain height ends the loop early.
    pub async fn run(&self, watcher: &BlockWatcher) -> NodeResult<()> {
        let mut height = watcher.node().block_height().await?;

        while !self.is_empty() {
            tracing::debug!(height = height.value(), "on each block event");
            self.dispatch(height).await;
            height = watcher.wait_for_block(Some(height.next())).await?;
        }

        tracing::info!("no block handlers registered, event loop stopped");
        Ok(())
    }
}

fn same_handler(a: &Arc<dyn BlockHandler>, b: &Arc<dyn BlockHandler>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl std::fmt::Debug for BlockEventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockEventLoop")
            .field("handlers", &self.len())
            .finish()
    }
}
