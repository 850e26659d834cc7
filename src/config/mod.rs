//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply DEFI_CLI / FINNHUB_TOKEN)
//!     → validation.rs (semantic checks)
//!     → FeederConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Credentials are injected at startup; there is no built-in token
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    FeederConfig, FixedPrice, FixedProviderConfig, LoggingConfig, NodeConfig, OracleConfig,
    QuoteProviderConfig,
};
