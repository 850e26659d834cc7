//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (oracle, height, symbol)
//!     → logging.rs (filter + formatter)
//!     → stdout (plain or JSON lines, timestamped)
//! ```

pub mod logging;

pub use logging::init_logging;
