//! Actor model: one thread per pipeline role.
//!
//! The three roles share exactly one [`crate::FrameBuffer`] and one
//! [`crate::CancelToken`] and otherwise do not communicate:
//!
//! ```text
//! ┌──────────────┐  clear/append   ┌──────────────┐
//! │   Producer   │ ──────────────▶ │              │
//! └──────────────┘                 │ FrameBuffer  │
//! ┌──────────────┐      bump       │ (generation) │
//! │Event Watcher │ ──────────────▶ │              │
//! └──────────────┘                 └──────┬───────┘
//!                                         │ wait_for_change
//!                                         ▼
//!                                  ┌──────────────┐
//!                                  │   Renderer   │ ──▶ Screen
//!                                  └──────────────┘
//! ```
//!
//! Every role terminates on the shared cancellation token, each at its
//! own next suspension point.

mod events;
mod producer;
mod renderer;

pub use events::EventActor;
pub use producer::ProducerActor;
pub use renderer::RendererActor;
