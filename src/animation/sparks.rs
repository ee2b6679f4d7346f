//! Spark field: A fixed pool of particles thrown out of one origin.

use super::{FrameSource, Particle, DEFAULT_FRAME_DELAY};
use crate::buffer::{Frame, Rgb, Size};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::time::Duration;

/// Slowest and fastest launch speed, in pixels per tick.
const SPEED_RANGE: (f64, f64) = (0.2, 1.0);

/// Particles launched from a common origin with random hue and heading.
///
/// The pool is built once and owned by the field; particles are never
/// removed or respawned and drift off the panel for good.
#[derive(Debug, Clone)]
pub struct SparkField {
    frame: Frame,
    particles: Vec<Particle>,
    tick: u64,
    delay: Duration,
}

impl SparkField {
    /// Launch `count` particles from the panel centre.
    ///
    /// The same `seed` always yields the same pool.
    pub fn new(size: Size, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let origin = (f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);

        let particles = (0..count)
            .map(|_| {
                let hue = rng.gen_range(0.0..360.0);
                let heading = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(SPEED_RANGE.0..SPEED_RANGE.1);
                Particle::new(
                    origin.0,
                    origin.1,
                    speed * heading.cos(),
                    speed * heading.sin(),
                    Rgb::from_hsv(hue, 1.0, 1.0),
                )
            })
            .collect();

        Self::from_particles(size, particles)
    }

    /// Use an explicit particle pool.
    pub fn from_particles(size: Size, particles: Vec<Particle>) -> Self {
        Self {
            frame: Frame::with_size(size),
            particles,
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

    /// The particle pool.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Ticks advanced so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }
}

impl FrameSource for SparkField {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        if self.particles.is_empty() {
            return Err(Error::NotInitialized("particle pool"));
        }

        self.tick += 1;
        self.frame.clear();
        for (i, particle) in self.particles.iter_mut().enumerate() {
            particle.step();
            if !particle.is_finite() {
                return Err(Error::animation(format!(
                    "particle {i} left the representable plane at tick {}",
                    self.tick
                )));
            }
            particle.draw(&mut self.frame);
        }

        Ok((&self.frame, self.delay))
    }
}
