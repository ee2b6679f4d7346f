//! Terminal module: Preview the matrix in a true-color terminal.
//!
//! - [`OutputBuffer`]: Single-syscall ANSI output
//! - [`TerminalSink`]: Display sink drawing half-block pixels

mod output;
mod preview;

pub use output::OutputBuffer;
pub use preview::{PreviewConfig, TerminalSink};
