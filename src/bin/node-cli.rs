use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

use oracle_feeder::config::loader::{apply_env_overrides, read_config_file};
use oracle_feeder::config::FeederConfig;
use oracle_feeder::node::{BlockHeight, NodeClient, OracleId};
use oracle_feeder::scheduler::BlockWatcher;

#[derive(Parser)]
#[command(name = "node-cli")]
#[command(about = "Diagnostics for the node used by oracle-feeder", long_about = None)]
struct Cli {
    /// Feeder config file (only the [node] section is used).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current block height
    Height,
    /// Generate a new address
    NewAddress,
    /// List appointed oracle ids
    Oracles,
    /// Show the data held by one oracle
    OracleData { id: String },
    /// Wallet balance
    Balance,
    /// Token balances of the wallet
    TokenBalances,
    /// Block until the chain reaches a height (default: the next block)
    WaitBlock {
        #[arg(long)]
        height: Option<u64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Node commands do not need the quote token, so full validation is skipped.
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => FeederConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    let node = NodeClient::from_config(&config.node);

    let output: Value = match cli.command {
        Commands::Height => json!(node.block_height().await?),
        Commands::NewAddress => json!(node.new_address().await?),
        Commands::Oracles => json!(node.list_oracles().await?),
        Commands::OracleData { id } => node.get_oracle_data(&OracleId::new(id)?).await?,
        Commands::Balance => json!(node.balance().await?),
        Commands::TokenBalances => json!(node.token_balances().await?),
        Commands::WaitBlock { height } => {
            let watcher = BlockWatcher::new(
                node.clone(),
                Duration::from_secs(config.node.poll_interval_secs.max(1)),
            );
            json!(watcher.wait_for_block(height.map(BlockHeight)).await?)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
