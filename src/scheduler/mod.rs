//! Block-driven scheduling.
//!
//! # Data Flow
//! ```text
//! watcher.rs (poll getblockcount every interval)
//!     → event_loop.rs (new height)
//!     → every registered BlockHandler, sequentially
//!     → wait for height + 1
//! ```
//!
//! # Design Decisions
//! - Handlers for one height finish before the next height is awaited
//! - A failing handler is logged and skipped until the next block
//! - The registry only grows; the loop re-reads it every iteration

pub mod event_loop;
pub mod watcher;

pub use event_loop::{BlockEventLoop, BlockHandler, HandlerError};
pub use watcher::{BlockWatcher, DEFAULT_POLL_INTERVAL};
