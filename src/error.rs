//! Error types shared by animations, sinks and the player.

use crate::buffer::Size;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a playback session.
///
/// None of these are retried: a failed frame or a rejected submission
/// stops the session and is handed back to the caller of
/// [`Player::play`](crate::actor::Player::play).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An animation could not compute its next frame.
    #[error("animation error: {0}")]
    Animation(String),

    /// An animation was asked for a frame before a required resource existed.
    #[error("animation not initialized: {0} is missing")]
    NotInitialized(&'static str),

    /// A frame source changed its frame dimensions mid-session.
    #[error("frame size changed from {expected} to {actual}")]
    FrameSize {
        /// Size of the first frame in the session.
        expected: Size,
        /// Size of the offending frame.
        actual: Size,
    },

    /// The display sink rejected a frame.
    #[error("display sink error: {0}")]
    Sink(String),

    /// Invalid panel geometry or brightness.
    #[error("config error: {0}")]
    Config(String),

    /// Terminal or thread I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build an [`Error::Sink`].
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build an [`Error::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
