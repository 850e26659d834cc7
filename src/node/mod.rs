//! Node CLI integration subsystem.
//!
//! # Data Flow
//! ```text
//! NodeConfig (cli path, base args)
//!     → runner.rs (spawn process, capture stdout, check exit code)
//!     → client.rs (domain operations, argument encoding, output parsing)
//!     → values.rs (validated addresses, ids, heights, token amounts)
//! ```
//!
//! # Constraints
//! - Every invocation is logged before dispatch
//! - A non-zero exit is an error; nothing is retried
//! - Parsing failures are distinct from process failures

pub mod client;
pub mod runner;
pub mod types;
pub mod values;

pub use client::NodeClient;
pub use runner::{CommandRunner, ProcessRunner};
pub use types::{NodeError, NodeResult, OracleDataPrice, OraclePriceFeed};
pub use values::{Address, BlockHeight, OracleId, TokenAmount, TxHash, ValueError};
