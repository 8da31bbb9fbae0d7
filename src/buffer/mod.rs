//! Buffer module: the shared state at the heart of the pipeline.
//!
//! This module contains:
//! - [`FrameBuffer`]: a generation-counted accumulator for command output
//! - [`Snapshot`]: the owned copy a reader receives on wakeup
//! - [`wait`]: the cancellable condition-variable block under everything

mod frame;
pub(crate) mod wait;

pub use frame::{FrameBuffer, Snapshot};
