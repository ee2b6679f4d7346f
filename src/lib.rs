//! # Pixelwheel
//!
//! A frame-driven animation player for RGB LED pixel matrices.
//!
//! An animation produces one full frame per tick together with the delay
//! before the next one is due; the player paces those frames into a display
//! sink and shuts down cleanly when asked.
//!
//! ## Core Concepts
//!
//! - **Frame sources**: Animations own their state and redraw from scratch
//!   every tick ([`animation::FrameSource`])
//! - **Cancellable pacing**: The only blocking wait races against a stop
//!   signal ([`actor::StopHandle`])
//! - **Scoped sinks**: The display is closed on every exit path
//!   ([`actor::DisplaySink`])
//! - **Terminal preview**: True-color half-block rendering with minimal diffs
//!
//! ## Example
//!
//! ```rust,ignore
//! use pixelwheel::{Animation, AnimationKind, NullSink, Player, PlayerConfig, Size};
//!
//! let player = Player::new(PlayerConfig { max_frames: Some(100) });
//! let source = Animation::new(AnimationKind::Orbit, Size::new(64, 32), 0);
//! let report = player.play(source, NullSink::new())?;
//! assert_eq!(report.frames, 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod animation;
pub mod buffer;
pub mod config;
pub mod error;
pub mod terminal;

// Re-exports for convenience
pub use actor::{
    DisplaySink, KeyWatcher, NullSink, PlaybackReport, Player, SinkActor, StopHandle, StopReason,
};
pub use animation::{Animation, AnimationKind, FrameSource, Particle};
pub use buffer::{Frame, Rgb, Size};
pub use config::{MatrixConfig, PlayerConfig};
pub use error::{Error, Result};
pub use terminal::{PreviewConfig, TerminalSink};
