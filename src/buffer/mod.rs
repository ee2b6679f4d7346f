//! Buffer module: Pixel storage handed from animations to display sinks.
//!
//! This module contains:
//! - [`Rgb`]: True-color pixel representation with HSV construction
//! - [`Frame`]: A grid of pixels representing the matrix for one tick
//! - [`Size`]: Frame dimensions, fixed for a playback session
//! - [`diff`]: Diffing engine for the half-block terminal preview

mod color;
mod frame;
pub mod diff;

pub use color::Rgb;
pub use frame::{Frame, Size};
