//! Producer actor: runs the watched command once per cycle.
//!
//! Each cycle clears the buffer (so the new output fully replaces the
//! old), streams the command's combined output in as it is produced,
//! and then sleeps until the next cycle. Command failures become buffer
//! text; only cancellation ends the loop.

use crate::buffer::FrameBuffer;
use crate::cancel::CancelToken;
use crate::command;
use crate::config::WatchConfig;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Producer actor that generates a frame of output per cycle.
pub struct ProducerActor {
    /// Handle to the producer thread.
    handle: Option<JoinHandle<()>>,
}

impl ProducerActor {
    /// Spawn the producer thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(config: WatchConfig, buffer: FrameBuffer, token: CancelToken) -> Self {
        let handle = thread::Builder::new()
            .name("respin-producer".to_string())
            .spawn(move || {
                Self::run_loop(&config, &buffer, &token);
                debug!("producer stopped");
            })
            .expect("failed to spawn producer thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the producer thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main producer loop.
    fn run_loop(config: &WatchConfig, buffer: &FrameBuffer, token: &CancelToken) {
        loop {
            buffer.clear();

            if config.title {
                buffer.append(header(config).as_bytes());
            }

            if let Err(err) = command::run_streaming(&config.command, buffer, token) {
                // Not fatal: surface the failure in the frame and keep
                // cycling.
                buffer.append(format!("\n{err}\n").as_bytes());
            }

            if !token.sleep(config.interval) {
                return;
            }
        }
    }
}

/// The one-line banner prepended to each cycle's output.
fn header(config: &WatchConfig) -> String {
    format!(
        "{} | every {}s | {}\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.interval.as_secs(),
        config.command_line(),
    )
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn config(script: &str, title: bool) -> WatchConfig {
        WatchConfig::new(
            vec!["sh".to_string(), "-c".to_string(), script.to_string()],
            Duration::from_secs(60),
            title,
        )
        .unwrap()
    }

    #[test]
    fn test_producer_fills_buffer_then_exits_on_cancel() {
        let buffer = FrameBuffer::new();
        let token = CancelToken::new();

        let producer = ProducerActor::spawn(config("echo hi", false), buffer.clone(), token.clone());

        // Cycle output lands without waiting for the interval.
        let mut seen = 0;
        loop {
            let snapshot = buffer.wait_for_change(seen, &token).unwrap();
            if snapshot.text.contains("hi") {
                break;
            }
            seen = snapshot.generation;
        }

        token.cancel();
        let start = Instant::now();
        producer.join();
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_header_precedes_output_when_title_enabled() {
        let buffer = FrameBuffer::new();
        let token = CancelToken::new();
        // Quoted so "body" appears in the output but not in the banner's
        // command line.
        let config = config("echo 'bo'dy", true);
        let expected = format!("every {}s | {}", 60, config.command_line());

        let producer = ProducerActor::spawn(config, buffer.clone(), token.clone());

        // Wait until the body shows up, then check the banner sits above it.
        let mut seen = 0;
        let text = loop {
            let snapshot = buffer.wait_for_change(seen, &token).unwrap();
            if snapshot.text.contains("body") {
                break snapshot.text;
            }
            seen = snapshot.generation;
        };
        assert!(text.contains(&expected));
        assert!(text.find(&expected).unwrap() < text.find("body").unwrap());

        token.cancel();
        producer.join();
    }

    #[test]
    fn test_command_failure_is_appended_not_fatal() {
        let buffer = FrameBuffer::new();
        let token = CancelToken::new();

        let producer = ProducerActor::spawn(config("exit 7", false), buffer.clone(), token.clone());

        let mut seen = 0;
        let text = loop {
            let snapshot = buffer.wait_for_change(seen, &token).unwrap();
            if snapshot.text.contains("command failed") {
                break snapshot.text;
            }
            seen = snapshot.generation;
        };
        assert!(text.contains("command failed"));

        token.cancel();
        producer.join();
    }
}
