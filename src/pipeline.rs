//! Pipeline: wires the three roles to one buffer and one token.

use crate::actor::{EventActor, ProducerActor, RendererActor};
use crate::buffer::FrameBuffer;
use crate::cancel::CancelToken;
use crate::config::WatchConfig;
use crate::error::Error;
use crate::terminal::Screen;
use tracing::info;

/// Run the watch pipeline until the shared cancellation token fires.
///
/// The screen is initialized first: a terminal that cannot be set up is
/// fatal, and no role starts. After that the only way out is
/// cancellation — a quit key, or a render failure bringing the run down.
pub fn run(config: &WatchConfig) -> Result<(), Error> {
    let screen = Screen::init()?;

    let buffer = FrameBuffer::new();
    let token = CancelToken::new();

    info!(
        command = %config.command_line(),
        interval = ?config.interval,
        "watch started"
    );

    let producer = ProducerActor::spawn(config.clone(), buffer.clone(), token.clone());
    let renderer = RendererActor::spawn(screen, buffer.clone(), token.clone());
    let events = EventActor::spawn(buffer, token.clone());

    producer.join();
    renderer.join();
    events.join();

    info!("watch stopped");
    Ok(())
}
