//! Animations: Stateful producers of successive frames.
//!
//! Every animation implements [`FrameSource`]: each call advances its own
//! private state by exactly one tick, redraws a full frame from scratch and
//! says how long the player should wait before asking again. Pacing lives in
//! that returned delay; an animation never sleeps.
//!
//! The bundled variants form a closed set behind [`Animation`]:
//!
//! - [`HueCircles`]: hue-cycling circles with a rainbow ribbon
//! - [`OrbitMask`]: three orbiting discs thresholding the R, G and B channels
//! - [`SparkField`]: a pool of [`Particle`]s drifting out from one origin
//! - [`Triad`]: a static red/green/blue triad
//!
//! # Example
//!
//! ```rust,ignore
//! use pixelwheel::animation::{Animation, AnimationKind, FrameSource};
//! use pixelwheel::buffer::Size;
//!
//! let mut source = Animation::new(AnimationKind::HueCircles, Size::new(64, 32), 0);
//! let (frame, delay) = source.next_frame()?;
//! ```

mod hue_circles;
mod orbit;
mod particle;
mod sparks;
mod triad;

pub use hue_circles::{hue_for, HueCircles};
pub use orbit::{orbit_centers, OrbitMask};
pub use particle::Particle;
pub use sparks::SparkField;
pub use triad::Triad;

use crate::buffer::{Frame, Size};
use crate::error::Result;
use std::fmt;
use std::time::Duration;

/// Pacing interval used by every bundled animation.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(50);

/// A stateful generator of frames.
///
/// Implementations own their animation state exclusively. The player calls
/// [`next_frame`](Self::next_frame) from one thread, one call at a time.
pub trait FrameSource {
    /// Dimensions of every frame this source produces.
    ///
    /// Must not change between calls.
    fn size(&self) -> Size;

    /// Advance one tick and return the new frame plus the delay before the
    /// frame after it is due.
    ///
    /// Must return within bounded time. An error is final: the source's
    /// state can no longer be trusted and the session ends.
    fn next_frame(&mut self) -> Result<(&Frame, Duration)>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        (**self).next_frame()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        (**self).next_frame()
    }
}

/// Selector for the bundled animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum AnimationKind {
    /// Hue-cycling circles with a rainbow ribbon.
    #[default]
    HueCircles,
    /// Three orbiting discs masking the R, G and B channels.
    Orbit,
    /// Particle sparks drifting out of one origin.
    Sparks,
    /// Static red/green/blue triad.
    Triad,
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HueCircles => "hue-circles",
            Self::Orbit => "orbit",
            Self::Sparks => "sparks",
            Self::Triad => "triad",
        })
    }
}

/// One of the bundled animations.
#[derive(Debug)]
pub enum Animation {
    /// See [`HueCircles`].
    HueCircles(HueCircles),
    /// See [`OrbitMask`].
    Orbit(OrbitMask),
    /// See [`SparkField`].
    Sparks(SparkField),
    /// See [`Triad`].
    Triad(Triad),
}

/// Particles in a spark field built through [`Animation::new`].
pub const DEFAULT_SPARK_COUNT: usize = 48;

impl Animation {
    /// Build an animation of the given kind for a panel of `size`.
    ///
    /// `seed` only affects randomized animations.
    pub fn new(kind: AnimationKind, size: Size, seed: u64) -> Self {
        match kind {
            AnimationKind::HueCircles => Self::HueCircles(HueCircles::new(size)),
            AnimationKind::Orbit => Self::Orbit(OrbitMask::new(size)),
            AnimationKind::Sparks => {
                Self::Sparks(SparkField::new(size, DEFAULT_SPARK_COUNT, seed))
            }
            AnimationKind::Triad => Self::Triad(Triad::new(size)),
        }
    }

    /// Replace the pacing interval.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        match self {
            Self::HueCircles(a) => Self::HueCircles(a.with_delay(delay)),
            Self::Orbit(a) => Self::Orbit(a.with_delay(delay)),
            Self::Sparks(a) => Self::Sparks(a.with_delay(delay)),
            Self::Triad(a) => Self::Triad(a.with_delay(delay)),
        }
    }

    /// Which variant this is.
    pub const fn kind(&self) -> AnimationKind {
        match self {
            Self::HueCircles(_) => AnimationKind::HueCircles,
            Self::Orbit(_) => AnimationKind::Orbit,
            Self::Sparks(_) => AnimationKind::Sparks,
            Self::Triad(_) => AnimationKind::Triad,
        }
    }
}

impl FrameSource for Animation {
    fn size(&self) -> Size {
        match self {
            Self::HueCircles(a) => a.size(),
            Self::Orbit(a) => a.size(),
            Self::Sparks(a) => a.size(),
            Self::Triad(a) => a.size(),
        }
    }

    fn next_frame(&mut self) -> Result<(&Frame, Duration)> {
        match self {
            Self::HueCircles(a) => a.next_frame(),
            Self::Orbit(a) => a.next_frame(),
            Self::Sparks(a) => a.next_frame(),
            Self::Triad(a) => a.next_frame(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [AnimationKind; 4] = [
        AnimationKind::HueCircles,
        AnimationKind::Orbit,
        AnimationKind::Sparks,
        AnimationKind::Triad,
    ];

    #[test]
    fn test_every_kind_keeps_its_size() {
        let size = Size::new(64, 32);
        for kind in KINDS {
            let mut animation = Animation::new(kind, size, 7);
            assert_eq!(animation.kind(), kind);
            for _ in 0..5 {
                let (frame, delay) = animation.next_frame().unwrap();
                assert_eq!(frame.size(), size, "{kind}");
                assert_eq!(delay, DEFAULT_FRAME_DELAY);
            }
        }
    }

    #[test]
    fn test_with_delay() {
        let mut animation = Animation::new(AnimationKind::Orbit, Size::new(16, 16), 0)
            .with_delay(Duration::from_millis(5));
        let (_, delay) = animation.next_frame().unwrap();
        assert_eq!(delay, Duration::from_millis(5));
    }

    #[test]
    fn test_boxed_source() {
        let mut source: Box<dyn FrameSource> =
            Box::new(Animation::new(AnimationKind::Triad, Size::new(32, 16), 0));
        assert_eq!(source.size(), Size::new(32, 16));
        assert!(source.next_frame().is_ok());
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<String> = KINDS.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["hue-circles", "orbit", "sparks", "triad"]);
    }
}
