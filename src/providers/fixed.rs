use async_trait::async_trait;

use crate::config::schema::FixedPrice;
use crate::providers::{PriceProvider, ProviderError};

/// Static in-memory price table.
#[derive(Debug, Clone)]
pub struct FixedPriceProvider {
    prices: Vec<(String, f64)>,
}

impl FixedPriceProvider {
    pub fn new(prices: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            prices: prices.into_iter().collect(),
        }
    }

    pub fn from_config(prices: &[FixedPrice]) -> Self {
        Self::new(prices.iter().map(|p| (p.symbol.clone(), p.price)))
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, price)| *price)
    }
}

impl Default for FixedPriceProvider {
    fn default() -> Self {
        Self::from_config(&FixedPrice::defaults())
    }
}

#[async_trait]
impl PriceProvider for FixedPriceProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn symbols(&self) -> Vec<String> {
        self.prices.iter().map(|(s, _)| s.clone()).collect()
    }

    async fn price(&self, symbol: &str) -> Result<String, ProviderError> {
        self.get(symbol)
            .map(|price| price.to_string())
            .ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))
    }
}
