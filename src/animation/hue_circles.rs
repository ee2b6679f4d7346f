//! Hue-cycling circles over a rainbow ribbon.

use super::{FrameSource, DEFAULT_FRAME_DELAY};
use crate::buffer::{Frame, Rgb, Size};
use crate::error::Result;
use std::time::Duration;

/// Panel the circle layout was designed for.
const REFERENCE: Size = Size::new(64, 32);
/// Circle count.
const CIRCLES: usize = 5;
/// Hue step between neighbouring circles, in degrees.
const HUE_OFFSET: u32 = 45;
const SATURATION: f64 = 0.56;
const CIRCLE_VALUE: f64 = 0.3;
const RIBBON_VALUE: f64 = 0.5;

/// Hue in degrees of circle `index` at `tick`.
///
/// `(tick + index * offset) mod 360`.
pub const fn hue_for(tick: u64, index: usize, offset: u32) -> u32 {
    ((tick + index as u64 * offset as u64) % 360) as u32
}

/// Five circles on a diagonal, each a fixed hue step apart, all advancing
/// one degree per tick, drawn over a one-pixel rainbow ribbon.
#[derive(Debug, Clone)]
pub struct HueCircles {
    frame: Frame,
    tick: u64,
    centers: [(f64, f64); CIRCLES],
    radius: f64,
    ribbon_y: f64,
    delay: Duration,
}

impl HueCircles {
    /// Lay the circles out for a panel of `size`.
    ///
    /// On a 64x32 panel the centres sit at (25,5) through (45,25) with
    /// radius 6; other sizes scale that layout.
    pub fn new(size: Size) -> Self {
        let sx = f64::from(size.width) / f64::from(REFERENCE.width);
        let sy = f64::from(size.height) / f64::from(REFERENCE.height);

        let mut centers = [(0.0, 0.0); CIRCLES];
        for (i, center) in centers.iter_mut().enumerate() {
            let step = 5.0 * i as f64;
            *center = ((25.0 + step) * sx, (5.0 + step) * sy);
        }

        Self {
            frame: Frame::with_size(size),
            tick: 0,
            centers,
            radius: 6.0 * sx.min(sy),
            ribbon_y: f64::from(size.height) * 0.55,
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

    /// Hue of circle `index` in the most recent frame.
    pub const fn hue(&self, index: usize) -> u32 {
        hue_for(self.tick, index, HUE_OFFSET)
    }

    /// Circle centres in pixel coordinates.
    pub fn centers(&self) -> &[(f64, f64)] {
        &self.centers
    }

    fn draw(&mut self) {
        self.frame.clear();

        for (i, &(cx, cy)) in self.centers.iter().enumerate() {
            let color = Rgb::from_hsv(f64::from(self.hue(i)), SATURATION, CIRCLE_VALUE);
            self.frame.fill_circle(cx, cy, self.radius, color);
        }

        let base = self.tick % 360;
        for x in 0..self.frame.width() {
            let fx = f64::from(x);
            self.frame.fill_circle(fx, self.ribbon_y, 2.0, Rgb::BLACK);
            let hue = (base + u64::from(x)) % 360;
            let color = Rgb::from_hsv(hue as f64, SATURATION, RIBBON_VALUE);
            self.frame.fill_circle(fx, self.ribbon_y, 1.0, color);
        }
    }
}

impl FrameSource for HueCircles {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        self.tick += 1;
        self.draw();
        Ok((&self.frame, self.delay))
    }
}
