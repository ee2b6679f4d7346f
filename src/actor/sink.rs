//! Display sinks: Where finished frames go.
//!
//! A sink is write-only from the player's point of view. It receives one
//! frame at a time and is closed exactly once when the session ends.

use super::messages::SinkCommand;
use crate::buffer::Frame;
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Consumer of frames, usually backed by physical hardware.
pub trait DisplaySink {
    /// Show `frame`. Returns once the sink has accepted it.
    fn submit(&mut self, frame: &Frame) -> Result<()>;

    /// Blank and release the display. Called once per session on every
    /// exit path.
    fn close(&mut self) -> Result<()>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn submit(&mut self, frame: &Frame) -> Result<()> {
        (**self).submit(frame)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn submit(&mut self, frame: &Frame) -> Result<()> {
        (**self).submit(frame)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Sink that discards frames, for headless soak runs.
#[derive(Debug, Default)]
pub struct NullSink {
    frames: u64,
    closed: bool,
}

impl NullSink {
    /// Create a new null sink.
    pub const fn new() -> Self {
        Self {
            frames: 0,
            closed: false,
        }
    }

    /// Frames accepted so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether [`close`](DisplaySink::close) has been called.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl DisplaySink for NullSink {
    fn submit(&mut self, _frame: &Frame) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Sink actor that drives another sink on a dedicated thread.
///
/// Frames are handed over through a rendezvous channel and every frame is
/// acknowledged with the inner sink's result: [`submit`] returns once the
/// sink thread has shown (or rejected) that frame. At most one frame is in
/// flight and frames reach the inner sink in submission order. After a
/// rejection the thread closes the inner sink and exits.
///
/// [`submit`]: DisplaySink::submit
pub struct SinkActor {
    /// Handle to the sink thread.
    handle: Option<JoinHandle<Result<()>>>,
    /// Command sender (rendezvous).
    command_tx: Option<Sender<SinkCommand>>,
    /// Per-frame results from the sink thread.
    ack_rx: Receiver<Result<()>>,
}

impl SinkActor {
    /// Spawn the sink thread, moving `sink` onto it.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn<S>(sink: S) -> Result<Self>
    where
        S: DisplaySink + Send + 'static,
    {
        let (command_tx, command_rx) = bounded::<SinkCommand>(0);
        let (ack_tx, ack_rx) = bounded::<Result<()>>(1);

        let handle = thread::Builder::new()
            .name("pixelwheel-sink".to_string())
            .spawn(move || Self::run_loop(sink, &command_rx, &ack_tx))?;

        Ok(Self {
            handle: Some(handle),
            command_tx: Some(command_tx),
            ack_rx,
        })
    }

    /// Main sink loop.
    fn run_loop<S: DisplaySink>(
        mut sink: S,
        receiver: &Receiver<SinkCommand>,
        acks: &Sender<Result<()>>,
    ) -> Result<()> {
        let mut frames = 0u64;

        while let Ok(command) = receiver.recv() {
            match command {
                SinkCommand::Frame(frame) => match sink.submit(&frame) {
                    Ok(()) => {
                        frames += 1;
                        if acks.send(Ok(())).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(frames, error = %e, "sink rejected frame");
                        let _ = acks.send(Err(e));
                        return sink.close();
                    }
                },
                SinkCommand::Close => break,
            }
        }

        debug!(frames, "sink thread closing");
        sink.close()
    }

    /// Wait for the sink thread and return its close result.
    fn join(&mut self) -> Result<()> {
        self.command_tx.take();
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::sink("sink thread panicked"))?,
            None => Ok(()),
        }
    }
}

impl DisplaySink for SinkActor {
    fn submit(&mut self, frame: &Frame) -> Result<()> {
        let Some(tx) = &self.command_tx else {
            return Err(Error::sink("sink already closed"));
        };

        if tx.send(SinkCommand::Frame(Box::new(frame.clone()))).is_err() {
            return Err(Error::sink("sink thread exited"));
        }

        match self.ack_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                // The thread has exited; nothing more can be shown.
                self.command_tx = None;
                Err(e)
            }
            Err(_) => Err(Error::sink("sink thread exited")),
        }
    }

    fn close(&mut self) -> Result<()> {
        if let Some(tx) = &self.command_tx {
            let _ = tx.send(SinkCommand::Close);
        }
        self.join()
    }
}

impl Drop for SinkActor {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            warn!(error = %e, "sink thread ended with error");
        }
    }
}
