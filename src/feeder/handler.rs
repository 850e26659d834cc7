use async_trait::async_trait;
use std::sync::Arc;

use crate::feeder::push::push_prices;
use crate::node::{BlockHeight, NodeClient, OracleId};
use crate::providers::PriceProvider;
use crate::scheduler::{BlockHandler, HandlerError};

/// Pushes are skipped at heights that are multiples of `skip_interval`.
pub fn should_push(height: BlockHeight, skip_interval: u64) -> bool {
    !height.is_multiple_of(skip_interval)
}

/// Re-submits one oracle's prices on every eligible block.
pub struct OracleFeedHandler {
    node: NodeClient,
    oracle: OracleId,
    provider: Arc<dyn PriceProvider>,
    currency: String,
    skip_interval: u64,
}

impl OracleFeedHandler {
    pub fn new(
        node: NodeClient,
        oracle: OracleId,
        provider: Arc<dyn PriceProvider>,
        currency: String,
        skip_interval: u64,
    ) -> Self {
        Self {
            node,
            oracle,
            provider,
            currency,
            skip_interval,
        }
    }

    pub fn oracle(&self) -> &OracleId {
        &self.oracle
    }
}

#[async_trait]
impl BlockHandler for OracleFeedHandler {
    async fn on_block(&self, height: BlockHeight) -> Result<(), HandlerError> {
        tracing::info!(height = height.value(), oracle = %self.oracle, "on block event");

        if !should_push(height, self.skip_interval) {
            return Ok(());
        }

        let tx = push_prices(&self.node, &self.oracle, self.provider.as_ref(), &self.currency)
            .await?;
        tracing::info!(provider = self.provider.name(), oracle = %self.oracle, tx = %tx, "prices submitted");
        Ok(())
    }

    fn name(&self) -> String {
        format!("{}:{}", self.provider.name(), self.oracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_push() {
        assert!(should_push(BlockHeight(101), 20));
        assert!(should_push(BlockHeight(19), 20));
        assert!(!should_push(BlockHeight(120), 20));
        assert!(!should_push(BlockHeight(0), 20));
    }
}
