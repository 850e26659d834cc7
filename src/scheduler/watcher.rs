//! Block height polling.

use std::time::Duration;
use tokio::time::sleep;

use crate::node::{BlockHeight, NodeClient, NodeResult};

/// Default delay between height polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Polls the node until the chain reaches a target height.
#[derive(Debug, Clone)]
pub struct BlockWatcher {
    node: NodeClient,
    poll_interval: Duration,
}

impl BlockWatcher {
    pub fn new(node: NodeClient, poll_interval: Duration) -> Self {
        Self {
            node,
            poll_interval,
        }
    }

    pub fn node(&self) -> &NodeClient {
        &self.node
    }

    /// Wait until the height is at least `min_height`, or the next block when `None`.
    ///
    /// Returns the observed height. There is no upper bound on the wait.
    pub async fn wait_for_block(&self, min_height: Option<BlockHeight>) -> NodeResult<BlockHeight> {
        let mut current = self.node.block_height().await?;
        let target = min_height.unwrap_or_else(|| current.next());

        while current < target {
            sleep(self.poll_interval).await;
            current = self.node.block_height().await?;
            tracing::debug!(
                target = target.value(),
                current = current.value(),
                "waiting for block"
            );
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CommandRunner, NodeError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Answers `getblockcount` from a queue of heights.
    struct Heights {
        queue: Mutex<VecDeque<u64>>,
        polls: Mutex<usize>,
    }

    #[async_trait]
    impl CommandRunner for Heights {
        async fn output(&self, _args: &[String]) -> NodeResult<String> {
            *self.polls.lock().unwrap() += 1;
            match self.queue.lock().unwrap().pop_front() {
                Some(h) => Ok(format!("{h}\n")),
                None => Err(NodeError::InvalidNumeric("exhausted".into())),
            }
        }
    }

    fn watcher(heights: &[u64]) -> (BlockWatcher, Arc<Heights>) {
        let runner = Arc::new(Heights {
            queue: Mutex::new(heights.iter().copied().collect()),
            polls: Mutex::new(0),
        });
        let node = NodeClient::new(runner.clone(), Vec::new());
        (BlockWatcher::new(node, Duration::from_millis(1)), runner)
    }

    #[tokio::test]
    async fn test_waits_for_next_block() {
        let (watcher, runner) = watcher(&[100, 101, 150]);
        let height = watcher.wait_for_block(None).await.unwrap();
        assert_eq!(height, BlockHeight(101));
        assert_eq!(*runner.polls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_keeps_polling_until_target() {
        let (watcher, runner) = watcher(&[100, 100, 100, 101]);
        let height = watcher.wait_for_block(None).await.unwrap();
        assert_eq!(height, BlockHeight(101));
        assert_eq!(*runner.polls.lock().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_returns_immediately_when_target_reached() {
        let (watcher, runner) = watcher(&[205]);
        let height = watcher.wait_for_block(Some(BlockHeight(200))).await.unwrap();
        assert_eq!(height, BlockHeight(205));
        assert_eq!(*runner.polls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_height_may_jump_past_target() {
        let (watcher, _) = watcher(&[10, 13]);
        let height = watcher.wait_for_block(Some(BlockHeight(11))).await.unwrap();
        assert_eq!(height, BlockHeight(13));
    }

    #[tokio::test]
    async fn test_poll_error_propagates() {
        let (watcher, _) = watcher(&[10]);
        assert!(watcher.wait_for_block(None).await.is_err());
    }
}
