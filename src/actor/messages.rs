//! Message types for actor communication.

use crate::buffer::Frame;

/// Commands sent to the sink thread.
#[derive(Debug)]
pub enum SinkCommand {
    /// Display this frame.
    Frame(Box<Frame>),

    /// Blank the display, release it and exit the thread.
    Close,
}

/// Why a playback session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A [`StopHandle`](super::StopHandle) requested shutdown.
    Cancelled,
    /// The configured frame limit was reached.
    FrameLimit,
}
