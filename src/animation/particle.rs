//! Particle: A moving disc integrated linearly each tick.

use crate::buffer::{Frame, Rgb};

/// A disc with a position, a constant velocity and a color.
///
/// `age` counts ticks since creation and `intensity` scales the color when
/// drawn, so effects can fade particles without touching their hue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
    /// Horizontal velocity in pixels per tick.
    pub vx: f64,
    /// Vertical velocity in pixels per tick.
    pub vy: f64,
    /// Disc radius in pixels.
    pub radius: f64,
    /// Base color.
    pub color: Rgb,
    /// Ticks integrated so far.
    pub age: u32,
    /// Brightness multiplier, 0.0-1.0.
    pub intensity: f64,
}

impl Particle {
    /// Create a particle at (`x`, `y`) moving by (`vx`, `vy`) per tick.
    pub const fn new(x: f64, y: f64, vx: f64, vy: f64, color: Rgb) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
            color,
            age: 0,
            intensity: 1.0,
        }
    }

    /// Set the radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Integrate one tick of motion.
    ///
    /// No clamping or wrapping: a particle that leaves the frame keeps going.
    #[inline]
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.age = self.age.saturating_add(1);
    }

    /// Current position.
    #[inline]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Whether position and velocity are still finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }

    /// Draw this particle into `frame`, clipped to its bounds.
    pub fn draw(&self, frame: &mut Frame) {
        let percent = (self.intensity.clamp(0.0, 1.0) * 100.0).round() as u8;
        frame.fill_circle(self.x, self.y, self.radius, self.color.scaled(percent));
    }
}
