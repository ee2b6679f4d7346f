//! Key Watcher: Dedicated thread that turns quit keys into a stop request.
//!
//! While the terminal preview holds the terminal in raw mode, Ctrl-C arrives
//! as an ordinary key event instead of a signal. This actor polls crossterm
//! for `q`, `Esc` and `Ctrl-C` and stops the player when it sees one.

use super::player::StopHandle;
use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Key watcher actor that stops playback on a quit key.
pub struct KeyWatcher {
    /// Handle to the watcher thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl KeyWatcher {
    /// Spawn the watcher thread.
    ///
    /// # Arguments
    ///
    /// * `stop` - Handle used to stop the player.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(stop: StopHandle, poll_timeout: Duration) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("pixelwheel-keys".to_string())
            .spawn(move || {
                Self::run_loop(&stop, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the watcher thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the watcher thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main polling loop.
    fn run_loop(stop: &StopHandle, shutdown: &AtomicBool, poll_timeout: Duration) {
        while !shutdown.load(Ordering::Relaxed) && !stop.is_stopped() {
            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_quit_key(&key) => {
                        debug!(code = ?key.code, "quit key pressed");
                        stop.stop();
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "reading terminal event failed");
                        break;
                    }
                },
                Ok(false) => {
                    // No event, loop again to check shutdown
                }
                Err(e) => {
                    warn!(error = %e, "polling terminal events failed");
                    break;
                }
            }
        }
    }
}

/// Whether `key` asks to quit playback.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl Drop for KeyWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
