//! Price sources for oracle submissions.
//!
//! A provider knows a fixed, ordered list of symbols and produces the raw
//! amount text for each. The feeder combines that text with the symbol into a
//! `TokenAmount`, so malformed upstream values fail there, before submission.

mod fixed;
mod quote;

pub use fixed::FixedPriceProvider;
pub use quote::QuoteProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching a price.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The quote request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider has no price for this symbol.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
}

/// A source of current prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Symbols this provider reports, in submission order.
    fn symbols(&self) -> Vec<String>;

    /// Current amount for `symbol`, as text.
    async fn price(&self, symbol: &str) -> Result<String, ProviderError>;
}
