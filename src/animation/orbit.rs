//! Orbiting brightness mask.
//!
//! Three discs orbit the panel centre 120 degrees apart. Each disc owns one
//! color channel: a pixel's red, green and blue are each switched between two
//! brightness levels depending on whether the pixel centre lies inside the
//! corresponding disc. Every pixel is evaluated on every tick.

use super::{FrameSource, DEFAULT_FRAME_DELAY};
use crate::buffer::{Frame, Rgb, Size};
use crate::error::Result;
use std::f64::consts::TAU;
use std::time::Duration;

/// Ticks per full revolution.
const DEFAULT_STEPS: u32 = 120;

/// Centres of the three discs at `step`.
///
/// The orbit angle is `TAU / steps * step`; disc `k` sits a further
/// `k * TAU / 3` around the circle of radius `orbit_radius` centred on the
/// middle of the panel.
pub fn orbit_centers(size: Size, step: u64, steps: u32, orbit_radius: f64) -> [(f64, f64); 3] {
    let steps = steps.max(1);
    let cx = f64::from(size.width) / 2.0;
    let cy = f64::from(size.height) / 2.0;
    let angle = TAU / f64::from(steps) * (step % u64::from(steps)) as f64;

    let mut centers = [(0.0, 0.0); 3];
    for (k, center) in centers.iter_mut().enumerate() {
        let theta = angle + k as f64 * TAU / 3.0;
        *center = (cx + orbit_radius * theta.cos(), cy + orbit_radius * theta.sin());
    }
    centers
}

/// Three channel masks orbiting the panel centre.
#[derive(Debug, Clone)]
pub struct OrbitMask {
    frame: Frame,
    step: u64,
    steps: u32,
    orbit_radius: f64,
    radius: f64,
    bright: u8,
    dim: u8,
    delay: Duration,
}

impl OrbitMask {
    /// Size the orbit for a panel of `size`.
    ///
    /// The orbit radius is a quarter of the shorter side and each disc
    /// spans three eighths of it, so all three overlap at the centre.
    pub fn new(size: Size) -> Self {
        let short = f64::from(size.width.min(size.height));
        Self {
            frame: Frame::with_size(size),
            step: 0,
            steps: DEFAULT_STEPS,
            orbit_radius: short / 4.0,
            radius: short * 0.375,
            bright: u8::MAX,
            dim: 0,
            delay: DEFAULT_FRAME_DELAY,
        }
    }

    /// Replace the pacing interval.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the channel levels used inside and outside a disc.
    #[must_use]
    pub const fn with_levels(mut self, bright: u8, dim: u8) -> Self {
        self.bright = bright;
        self.dim = dim;
        self
    }

    /// Set how many ticks one revolution takes.
    #[must_use]
    pub const fn with_steps(mut self, steps: u32) -> Self {
        self.steps = if steps == 0 { 1 } else { steps };
        self
    }

    /// Ticks advanced so far.
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Disc centres for the most recent frame.
    pub fn centers(&self) -> [(f64, f64); 3] {
        orbit_centers(self.frame.size(), self.step, self.steps, self.orbit_radius)
    }

    fn draw(&mut self) {
        let centers = self.centers();
        let r2 = self.radius * self.radius;
        let width = self.frame.width();

        for (idx, pixel) in self.frame.pixels_mut().iter_mut().enumerate() {
            let px = (idx % usize::from(width)) as f64 + 0.5;
            let py = (idx / usize::from(width)) as f64 + 0.5;

            let mut levels = [self.dim; 3];
            for (level, &(cx, cy)) in levels.iter_mut().zip(&centers) {
                let dx = px - cx;
                let dy = py - cy;
                if dx * dx + dy * dy <= r2 {
                    *level = self.bright;
                }
            }
            *pixel = Rgb::new(levels[0], levels[1], levels[2]);
        }
    }
}

impl FrameSource for OrbitMask {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        self.step += 1;
        self.draw();
        Ok((&self.frame, self.delay))
    }
}
