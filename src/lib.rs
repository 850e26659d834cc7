//! Block-synchronized price oracle feeder.
//!
//! Drives a node's command-line interface to appoint price oracles and
//! re-submit their prices on every new block.

pub mod config;
pub mod feeder;
pub mod node;
pub mod observability;
pub mod providers;
pub mod scheduler;

pub use config::FeederConfig;
pub use feeder::OracleSetup;
pub use node::NodeClient;
pub use scheduler::BlockEventLoop;
