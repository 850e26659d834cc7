//! Oracle setup orchestration.
//!
//! # Responsibilities
//! - Create owner addresses and appoint one oracle per (provider, address)
//! - Wait for the appointments to be mined
//! - Push initial prices and register a per-block handler for every oracle
//! - Hand control to the block event loop

use futures_util::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{FeederConfig, OracleConfig};
use crate::feeder::handler::OracleFeedHandler;
use crate::feeder::push::push_prices;
use crate::feeder::FeedError;
use crate::node::{Address, NodeClient, OracleId, OraclePriceFeed};
use crate::providers::{FixedPriceProvider, PriceProvider, QuoteProvider};
use crate::scheduler::{BlockEventLoop, BlockWatcher};

/// An appointed oracle and the provider that feeds it.
#[derive(Clone)]
pub struct OracleBinding {
    pub oracle: OracleId,
    pub owner: Address,
    pub provider: Arc<dyn PriceProvider>,
}

impl std::fmt::Debug for OracleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleBinding")
            .field("oracle", &self.oracle)
            .field("owner", &self.owner)
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Bootstraps oracles and runs the feed loop.
pub struct OracleSetup {
    node: NodeClient,
    watcher: BlockWatcher,
    events: BlockEventLoop,
    providers: Vec<Arc<dyn PriceProvider>>,
    settings: OracleConfig,
}

impl OracleSetup {
    pub fn new(
        node: NodeClient,
        watcher: BlockWatcher,
        providers: Vec<Arc<dyn PriceProvider>>,
        settings: OracleConfig,
    ) -> Self {
        Self {
            node,
            watcher,
            events: BlockEventLoop::new(),
            providers,
            settings,
        }
    }

    /// Build the node client, watcher and enabled providers from a validated config.
    pub fn from_config(config: &FeederConfig) -> Result<Self, FeedError> {
        let node = NodeClient::from_config(&config.node);
        let watcher = BlockWatcher::new(
            node.clone(),
            Duration::from_secs(config.node.poll_interval_secs),
        );

        let mut providers: Vec<Arc<dyn PriceProvider>> = Vec::new();
        if config.fixed.enabled {
            providers.push(Arc::new(FixedPriceProvider::from_config(&config.fixed.prices)));
        }
        if config.quote.enabled {
            let base_url = config.quote.base_url.parse()?;
            providers.push(Arc::new(QuoteProvider::new(
                base_url,
                config.quote.api_token.clone().unwrap_or_default(),
                config.quote.symbols.clone(),
            )));
        }

        Ok(Self::new(node, watcher, providers, config.oracle.clone()))
    }

    pub fn node(&self) -> &NodeClient {
        &self.node
    }

    pub fn watcher(&self) -> &BlockWatcher {
        &self.watcher
    }

    /// The event loop that feed handlers are registered with.
    pub fn events(&self) -> &BlockEventLoop {
        &self.events
    }

    /// Appoint oracles, push initial prices and register the per-block handlers.
    ///
    /// Any failure here is fatal to the setup.
    pub async fn bootstrap(&self) -> Result<Vec<OracleBinding>, FeedError> {
        let height = self.node.block_height().await?;
        tracing::info!(height = height.value(), "current height");

        let mut addresses = Vec::with_capacity(self.settings.address_count);
        for _ in 0..self.settings.address_count {
            addresses.push(self.node.new_address().await?);
        }

        let mut bindings = Vec::new();
        for provider in &self.providers {
            let feeds: Vec<OraclePriceFeed> = provider
                .symbols()
                .into_iter()
                .map(|symbol| OraclePriceFeed::new(self.settings.currency.as_str(), symbol))
                .collect();

            for owner in &addresses {
                let oracle = self
                    .node
                    .appoint_oracle(owner, &feeds, self.settings.weightage)
                    .await?;
                tracing::info!(oracle = %oracle, owner = %owner, provider = provider.name(), "oracle appointed");

                bindings.push(OracleBinding {
                    oracle,
                    owner: owner.clone(),
                    provider: provider.clone(),
                });
            }
        }

        let confirmed = self.watcher.wait_for_block(None).await?;
        tracing::info!(height = confirmed.value(), "appointments confirmed");

        try_join_all(bindings.iter().map(|binding| self.start_feed(binding))).await?;

        Ok(bindings)
    }

    async fn start_feed(&self, binding: &OracleBinding) -> Result<(), FeedError> {
        let provider = binding.provider.name();
        tracing::info!(provider, oracle = %binding.oracle, "setup oracle loop: start");

        let tx = push_prices(
            &self.node,
            &binding.oracle,
            binding.provider.as_ref(),
            &self.settings.currency,
        )
        .await?;
        tracing::info!(provider, oracle = %binding.oracle, tx = %tx, "initial prices submitted");

        self.events.register(Arc::new(OracleFeedHandler::new(
            self.node.clone(),
            binding.oracle.clone(),
            binding.provider.clone(),
            self.settings.currency.clone(),
            self.settings.skip_interval,
        )));

        tracing::info!(provider, oracle = %binding.oracle, "setup oracle loop: done");
        Ok(())
    }

    /// Bootstrap, then follow the chain indefinitely.
    pub async fn run(self) -> Result<(), FeedError> {
        let bindings = self.bootstrap().await?;
        tracing::info!(oracles = bindings.len(), "feeding oracles on every block");

        self.events.run(&self.watcher).await?;
        Ok(())
    }
}
