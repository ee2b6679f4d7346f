//! Static red/green/blue triad, handy for checking panel wiring.

use super::{FrameSource, DEFAULT_FRAME_DELAY};
use crate::buffer::{Frame, Rgb, Size};
use crate::error::Result;
use std::time::Duration;

/// Three primary discs around the panel centre. The picture never changes,
/// only the tick count does.
#[derive(Debug, Clone)]
pub struct Triad {
    frame: Frame,
    discs: [(f64, f64, Rgb); 3],
    radius: f64,
    tick: u64,
    delay: Duration,
}

impl Triad {
    /// Lay the triad out for a panel of `size`.
    pub fn new(size: Size) -> Self {
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        let short = w.min(h);
        let spread = short / 6.0;
        Self {
            frame: Frame::with_size(size),
            discs: [
                (w / 2.0 - spread, h / 2.0 - spread / 2.0, Rgb::RED),
                (w / 2.0 + spread, h / 2.0 - spread / 2.0, Rgb::GREEN),
                (w / 2.0, h / 2.0 + spread, Rgb::BLUE),
            ],
            radius: short / 4.0,
            tick: 0,
            delay: DEFAULT_FRAME_DELAY,
        }
    }

    /// Replace the pacing interval.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Ticks advanced so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}

impl FrameSource for Triad {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        self.tick += 1;
        self.frame.clear();
        for &(cx, cy, color) in &self.discs {
            self.frame.fill_circle(cx, cy, self.radius, color);
        }
        Ok((&self.frame, self.delay))
    }
}
