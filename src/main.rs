//! Oracle feeder
//!
//! Appoints price oracles on a testnet node and keeps their prices fresh.
//!
//! # Architecture Overview
//!
//! ```text
//!   config (TOML + env)
//!        │
//!        ▼
//!   ┌──────────────┐  appoint / push   ┌─────────────┐   argv    ┌──────────┐
//!   │ OracleSetup  │──────────────────▶│ NodeClient  │──────────▶│ node cli │
//!   └──────┬───────┘                   └─────────────┘           └──────────┘
//!          │ register handlers               ▲
//!          ▼                                 │ setoracledata
//!   ┌──────────────┐  each block  ┌────────────────────┐  prices  ┌───────────┐
//!   │BlockEventLoop│─────────────▶│ OracleFeedHandler  │◀─────────│ providers │
//!   └──────┬───────┘              └────────────────────┘          └───────────┘
//!          │ wait for height + 1
//!          ▼
//!   ┌──────────────┐
//!   │ BlockWatcher │ (getblockcount every poll interval)
//!   └──────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use oracle_feeder::config::load_config;
use oracle_feeder::observability::init_logging;
use oracle_feeder::OracleSetup;

#[derive(Parser)]
#[command(name = "oracle-feeder")]
#[command(about = "Feeds oracle prices into a testnet node on every block", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config.logging);

    tracing::info!(
        cli_path = %config.node.cli_path,
        poll_interval_secs = config.node.poll_interval_secs,
        fixed = config.fixed.enabled,
        quote = config.quote.enabled,
        "oracle-feeder starting"
    );

    let setup = OracleSetup::from_config(&config)?;
    setup.run().await?;

    tracing::info!("done");
    Ok(())
}
