use crate::feeder::FeedError;
use crate::node::{NodeClient, OracleDataPrice, OracleId, TokenAmount, TxHash};
use crate::providers::PriceProvider;

/// Submit one price for every symbol the provider knows, in a single transaction.
///
/// Any lookup or format failure aborts the push before anything is submitted.
pub async fn push_prices(
    node: &NodeClient,
    oracle: &OracleId,
    provider: &dyn PriceProvider,
    currency: &str,
) -> Result<TxHash, FeedError> {
    let mut prices = Vec::new();

    for symbol in provider.symbols() {
        let amount = provider.price(&symbol).await?;
        let token_amount: TokenAmount = format!("{amount}@{symbol}").parse()?;
        prices.push(OracleDataPrice {
            currency: currency.to_string(),
            token_amount,
        });
    }

    for price in &prices {
        tracing::info!(
            oracle = %oracle,
            provider = provider.name(),
            price = %price.token_amount,
            "price set"
        );
    }

    Ok(node.set_oracle_data(oracle, &prices).await?)
}
