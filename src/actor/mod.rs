//! Actor Model: Threads and channels around the playback loop.
//!
//! - **Player**: Runs on the caller's thread, pulls frames from an animation
//!   and paces them into a sink
//! - **Sink Actor**: Optional dedicated thread that owns the display sink
//! - **Key Watcher**: Polls the terminal and stops the player on a quit key
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   next_frame()   ┌──────────────┐   SinkCommand   ┌──────────────┐
//! │  Animation   │ ◀─────────────── │    Player    │ ──────────────▶ │  Sink Thread │
//! └──────────────┘  (Frame, delay)  │              │   (rendezvous)  └──────────────┘
//!                                   └──────────────┘
//!                                          ▲
//!                                          │ StopHandle::stop()
//!                                   ┌──────────────┐
//!                                   │ Key Watcher  │
//!                                   └──────────────┘
//! ```

mod input;
mod messages;
mod player;
mod sink;

pub use input::{is_quit_key, KeyWatcher};
pub use messages::{SinkCommand, StopReason};
pub use player::{PlaybackReport, Player, StopHandle};
pub use sink::{DisplaySink, NullSink, SinkActor};
