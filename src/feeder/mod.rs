//! Oracle setup and per-block price feeding.
//!
//! # Data Flow
//! ```text
//! setup.rs: addresses → appoint oracles per provider → wait one block
//!     → initial push + handler registration per (oracle, provider), concurrently
//!     → BlockEventLoop::run
//! handler.rs: each block (except skip heights) → push.rs
//! push.rs: provider prices → TokenAmounts → one setoracledata call
//! ```

pub mod handler;
pub mod push;
pub mod setup;

pub use handler::{should_push, OracleFeedHandler};
pub use push::push_prices;
pub use setup::{OracleBinding, OracleSetup};

use thiserror::Error;

use crate::node::{NodeError, ValueError};
use crate::providers::ProviderError;

/// Errors that abort a price push or the setup sequence.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("price provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("invalid quote endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}
