//! Node CLI client.
//!
//! # Responsibilities
//! - Build command lines for node operations (base args + subcommand + args)
//! - Log every invocation before dispatch
//! - Parse console output into typed values

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::schema::NodeConfig;
use crate::node::runner::{CommandRunner, ProcessRunner};
use crate::node::types::{
    CreatePoolPairArgs, NodeError, NodeResult, OracleDataPrice, OraclePriceFeed, PoolSwapArgs,
    SendOptions, SetLoanTokenArgs,
};
use crate::node::values::{Address, BlockHeight, OracleId, TokenAmount, TxHash};

/// Strip surrounding newlines from console output; whitespace-only output becomes empty.
pub fn trim_console_text(text: &str) -> &str {
    let trimmed = text.trim_matches(|c| c == '\n' || c == '\r');
    if trimmed.trim().is_empty() {
        ""
    } else {
        trimmed
    }
}

/// Client for the node's command-line interface.
#[derive(Clone)]
pub struct NodeClient {
    runner: Arc<dyn CommandRunner>,
    base_args: Vec<String>,
}

impl NodeClient {
    /// Create a client over an arbitrary runner.
    pub fn new(runner: Arc<dyn CommandRunner>, base_args: Vec<String>) -> Self {
        Self { runner, base_args }
    }

    /// Create a client that spawns the configured node binary.
    pub fn from_config(config: &NodeConfig) -> Self {
        Self::new(
            Arc::new(ProcessRunner::new(&config.cli_path)),
            config.args.clone(),
        )
    }

    /// Run a raw command and return its stdout.
    pub async fn output(&self, args: &[&str]) -> NodeResult<String> {
        let final_args: Vec<String> = self
            .base_args
            .iter()
            .cloned()
            .chain(args.iter().map(|s| s.to_string()))
            .collect();

        tracing::debug!(args = ?final_args, "node command");

        self.runner.output(&final_args).await.inspect_err(|e| {
            tracing::warn!(args = ?final_args, error = %e, "node command failed");
        })
    }

    async fn output_trimmed(&self, args: &[&str]) -> NodeResult<String> {
        let out = self.output(args).await?;
        Ok(trim_console_text(&out).to_string())
    }

    async fn output_json<T: DeserializeOwned>(&self, args: &[&str]) -> NodeResult<T> {
        let out = self.output(args).await?;
        Ok(serde_json::from_str(&out)?)
    }

    async fn tx_command<A: Serialize>(&self, command: &str, args: &A) -> NodeResult<TxHash> {
        let json = serde_json::to_string(args)?;
        let out = self.output_trimmed(&[command, &json]).await?;
        Ok(TxHash::new(out)?)
    }

    pub async fn new_address(&self) -> NodeResult<Address> {
        let out = self.output_trimmed(&["getnewaddress"]).await?;
        Ok(Address::new(out)?)
    }

    pub async fn block_height(&self) -> NodeResult<BlockHeight> {
        let out = self.output_trimmed(&["getblockcount"]).await?;
        out.parse::<u64>()
            .map(BlockHeight)
            .map_err(|_| NodeError::InvalidNumeric(out))
    }

    pub async fn appoint_oracle(
        &self,
        address: &Address,
        feeds: &[OraclePriceFeed],
        weightage: u32,
    ) -> NodeResult<OracleId> {
        let feeds = serde_json::to_string(feeds)?;
        let weightage = weightage.to_string();
        let out = self
            .output_trimmed(&["appointoracle", address.as_str(), &feeds, &weightage])
            .await?;
        Ok(OracleId::new(out)?)
    }

    pub async fn list_oracles(&self) -> NodeResult<Vec<OracleId>> {
        let ids: Vec<String> = self.output_json(&["listoracles"]).await?;
        ids.iter()
            .map(|id| OracleId::new(trim_console_text(id)).map_err(NodeError::from))
            .collect()
    }

    /// Raw oracle state, for diagnostics.
    pub async fn get_oracle_data(&self, oracle: &OracleId) -> NodeResult<serde_json::Value> {
        self.output_json(&["getoracledata", oracle.as_str()]).await
    }

    /// Submit prices stamped with the current Unix time.
    pub async fn set_oracle_data(
        &self,
        oracle: &OracleId,
        prices: &[OracleDataPrice],
    ) -> NodeResult<TxHash> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.set_oracle_data_at(oracle, prices, now).await
    }

    pub async fn set_oracle_data_at(
        &self,
        oracle: &OracleId,
        prices: &[OracleDataPrice],
        timestamp: u64,
    ) -> NodeResult<TxHash> {
        let prices = serde_json::to_string(prices)?;
        let timestamp = timestamp.to_string();
        let out = self
            .output_trimmed(&["setoracledata", oracle.as_str(), &timestamp, &prices])
            .await?;
        Ok(TxHash::new(out)?)
    }

    pub async fn balance(&self) -> NodeResult<f64> {
        let out = self.output_trimmed(&["getbalance"]).await?;
        match out.parse::<f64>() {
            Ok(balance) if balance.is_finite() => Ok(balance),
            _ => Err(NodeError::InvalidNumeric(out)),
        }
    }

    pub async fn token_balances(&self) -> NodeResult<Vec<TokenAmount>> {
        let balances: Vec<String> = self
            .output_json(&["gettokenbalances", "{}", "false", "true"])
            .await?;
        balances
            .iter()
            .map(|b| b.parse::<TokenAmount>().map_err(NodeError::from))
            .collect()
    }

    pub async fn set_loan_token(&self, args: &SetLoanTokenArgs) -> NodeResult<TxHash> {
        self.tx_command("setloantoken", args).await
    }

    pub async fn pool_swap(&self, args: &PoolSwapArgs) -> NodeResult<TxHash> {
        self.tx_command("poolswap", args).await
    }

    /// Dry-run a swap and return the amount that would be received.
    pub async fn test_pool_swap(&self, args: &PoolSwapArgs) -> NodeResult<TokenAmount> {
        let json = serde_json::to_string(args)?;
        let out = self.output_trimmed(&["testpoolswap", &json]).await?;
        Ok(out.parse()?)
    }

    pub async fn create_pool_pair(&self, args: &CreatePoolPairArgs) -> NodeResult<TxHash> {
        self.tx_command("createpoolpair", args).await
    }

    pub async fn send_to_address(
        &self,
        address: &Address,
        amount: f64,
        options: &SendOptions,
    ) -> NodeResult<TxHash> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(NodeError::InvalidNumeric(amount.to_string()));
        }
        let amount = amount.to_string();
        let subtract_fee = options.subtract_fee_from_amount.to_string();
        let out = self
            .output_trimmed(&[
                "sendtoaddress",
                address.as_str(),
                &amount,
                &options.comment,
                &options.comment_to,
                &subtract_fee,
            ])
            .await?;
        Ok(TxHash::new(out)?)
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("base_args", &self.base_args)
            .finish()
    }
}
