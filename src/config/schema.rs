//! Configuration schema definitions.
//!
//! All sections have defaults, so an empty file (or no file) is a valid
//! starting point; environment overrides are applied by the loader.

use serde::{Deserialize, Serialize};

/// Root configuration for the feeder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FeederConfig {
    /// Node CLI location and invocation settings.
    pub node: NodeConfig,

    /// Oracle appointment and feeding policy.
    pub oracle: OracleConfig,

    /// Static price table.
    pub fixed: FixedProviderConfig,

    /// Live quote API.
    pub quote: QuoteProviderConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Node CLI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Path to the node CLI binary (resolved through PATH when bare).
    pub cli_path: String,

    /// Arguments passed before every subcommand (e.g. "-testnet").
    pub args: Vec<String>,

    /// Seconds between block height polls.
    pub poll_interval_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            cli_path: "defi-cli".to_string(),
            args: Vec::new(),
            poll_interval_secs: 30,
        }
    }
}

/// Oracle appointment and feeding policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Currency every feed is quoted in.
    pub currency: String,

    /// Weightage assigned at appointment.
    pub weightage: u32,

    /// Number of owner addresses to create; each gets one oracle per provider.
    pub address_count: usize,

    /// Pushes are skipped at heights that are multiples of this value.
    pub skip_interval: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            weightage: 150,
            address_count: 2,
            skip_interval: 20,
        }
    }
}

/// One entry of the static price table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FixedPrice {
    pub symbol: String,
    pub price: f64,
}

impl FixedPrice {
    pub fn new(symbol: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
        }
    }

    /// The built-in table: DFI, ETH, BTC.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("DFI", 3.0),
            Self::new("ETH", 4000.0),
            Self::new("BTC", 60000.0),
        ]
    }
}

/// Static price table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixedProviderConfig {
    pub enabled: bool,

    /// Prices in submission order.
    pub prices: Vec<FixedPrice>,
}

impl Default for FixedProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prices: FixedPrice::defaults(),
        }
    }
}

/// Live quote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuoteProviderConfig {
    pub enabled: bool,

    /// Quote endpoint.
    pub base_url: String,

    /// API token. Usually supplied through the environment.
    pub api_token: Option<String>,

    /// Symbols in submission order.
    pub symbols: Vec<String>,
}

impl Default for QuoteProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://finnhub.io/api/v1/quote".to_string(),
            api_token: None,
            symbols: ["GOOGL", "TSLA", "MSFT", "TWTR", "META"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set.
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeederConfig::default();
        assert_eq!(config.node.cli_path, "defi-cli");
        assert_eq!(config.node.poll_interval_secs, 30);
        assert_eq!(config.oracle.weightage, 150);
        assert_eq!(config.oracle.skip_interval, 20);
        assert_eq!(config.oracle.address_count, 2);
        assert_eq!(config.fixed.prices.len(), 3);
        assert_eq!(config.quote.symbols.len(), 5);
        assert!(config.quote.api_token.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FeederConfig = toml::from_str(
            r#"
            [node]
            args = ["-testnet"]

            [[fixed.prices]]
            symbol = "DUSD"
            price = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.node.cli_path, "defi-cli");
        assert_eq!(config.node.args, vec!["-testnet"]);
        assert_eq!(config.fixed.prices, vec![FixedPrice::new("DUSD", 1.0)]);
        assert!(config.fixed.enabled);
        assert_eq!(config.oracle.currency, "USD");
    }
}
