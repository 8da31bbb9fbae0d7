//! # Respin
//!
//! A flicker-free `watch`: rerun a command on an interval and repaint the
//! terminal whenever fresh output arrives.
//!
//! ## Core Concepts
//!
//! - **Generation buffer**: one shared accumulator for command output,
//!   guarded by a monotonically increasing generation counter
//! - **Cancellable wait**: a condition-variable block that a shared
//!   cancellation token can interrupt without losing wakeups
//! - **Actor model**: isolated threads for producing output, painting
//!   frames, and watching terminal events
//! - **Single-syscall frames**: each repaint is accumulated and flushed
//!   in one write to avoid flickering
//!
//! ## Example
//!
//! ```rust,ignore
//! use respin::{pipeline, WatchConfig};
//! use std::time::Duration;
//!
//! let config = WatchConfig::new(
//!     vec!["date".to_string()],
//!     Duration::from_secs(1),
//!     true,
//! )?;
//! pipeline::run(&config)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod cancel;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{FrameBuffer, Snapshot};
pub use cancel::CancelToken;
pub use config::WatchConfig;
pub use error::Error;
