//! Node command arguments and error definitions.

use serde::Serialize;
use thiserror::Error;

use crate::node::values::{Address, TokenAmount, ValueError};

/// Errors that can occur while driving the node CLI.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The node binary could not be started.
    #[error("failed to spawn node cli: {0}")]
    Spawn(#[from] std::io::Error),

    /// The node binary exited with a non-zero status.
    #[error("process failed (exit code {code:?}): {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },

    /// A numeric result could not be parsed or was not finite.
    #[error("invalid numeric value returned: {0:?}")]
    InvalidNumeric(String),

    /// A JSON result could not be parsed, or arguments could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output did not satisfy a value wrapper's invariants.
    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueError),
}

/// Result type for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

/// A (currency, token) pair an oracle is authorized to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OraclePriceFeed {
    pub currency: String,
    pub token: String,
}

impl OraclePriceFeed {
    pub fn new(currency: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            token: token.into(),
        }
    }
}

/// One submitted price observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleDataPrice {
    pub currency: String,
    pub token_amount: TokenAmount,
}

/// Arguments for `poolswap` and `testpoolswap`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSwapArgs {
    pub from: Address,
    pub token_from: String,
    pub amount_from: f64,
    pub to: Address,
    pub token_to: String,
}

impl PoolSwapArgs {
    /// Swap `amount` of `token_from` into `token_to`, receiving at `to` or back at `from`.
    pub fn new(
        from: Address,
        token_from: impl Into<String>,
        token_to: impl Into<String>,
        amount: f64,
        to: Option<Address>,
    ) -> Self {
        let to = to.unwrap_or_else(|| from.clone());
        Self {
            from,
            token_from: token_from.into(),
            amount_from: amount,
            to,
            token_to: token_to.into(),
        }
    }
}

/// Arguments for `setloantoken`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLoanTokenArgs {
    pub symbol: String,
    pub name: String,
    pub fixed_interval_price_id: String,
    pub interest: f64,
}

impl SetLoanTokenArgs {
    /// `name` defaults to the symbol and the price id to `<symbol>/USD`.
    pub fn new(
        symbol: impl Into<String>,
        interest: f64,
        name: Option<String>,
        fixed_interval_price_id: Option<String>,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            name: name.unwrap_or_else(|| symbol.clone()),
            fixed_interval_price_id: fixed_interval_price_id
                .unwrap_or_else(|| format!("{symbol}/USD")),
            symbol,
            interest,
        }
    }
}

/// Arguments for `createpoolpair`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoolPairArgs {
    pub token_a: String,
    pub token_b: String,
    pub commission: f64,
    pub status: bool,
    pub owner_address: Address,
}

impl CreatePoolPairArgs {
    /// A new, active pool pair.
    pub fn new(
        token_a: impl Into<String>,
        token_b: impl Into<String>,
        commission: f64,
        owner_address: Address,
    ) -> Self {
        Self {
            token_a: token_a.into(),
            token_b: token_b.into(),
            commission,
            status: true,
            owner_address,
        }
    }
}

/// Optional trailing arguments for `sendtoaddress`.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub comment: String,
    pub comment_to: String,
    pub subtract_fee_from_amount: bool,
}
