//! Configuration for the panel and the player.

use crate::buffer::Size;
use crate::error::{Error, Result};

/// Geometry and brightness of a chain of LED panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Rows per panel.
    pub rows: u16,
    /// Columns per panel.
    pub cols: u16,
    /// Panels daisy-chained horizontally.
    pub chain_length: u16,
    /// Parallel chains stacked vertically.
    pub parallel: u16,
    /// Brightness, 0-100.
    pub brightness: u8,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 32,
            chain_length: 2,
            parallel: 1,
            brightness: 100,
        }
    }
}

impl MatrixConfig {
    /// Check geometry and brightness.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::config("panel rows and columns must be non-zero"));
        }
        if self.chain_length == 0 || self.parallel == 0 {
            return Err(Error::config("chain length and parallel count must be non-zero"));
        }
        if self.brightness > 100 {
            return Err(Error::config(format!(
                "brightness {} is outside 0-100",
                self.brightness
            )));
        }
        Ok(())
    }

    /// Pixel dimensions of the whole display.
    ///
    /// Width is `cols * chain_length`, height is `rows * parallel`.
    pub fn size(&self) -> Result<Size> {
        self.validate()?;
        let width = self
            .cols
            .checked_mul(self.chain_length)
            .ok_or_else(|| Error::config("display width overflows"))?;
        let height = self
            .rows
            .checked_mul(self.parallel)
            .ok_or_else(|| Error::config("display height overflows"))?;
        Ok(Size::new(width, height))
    }
}

/// Configuration for the [`Player`](crate::actor::Player).
#[derive(Debug, Clone, Default)]
pub struct PlayerConfig {
    /// Stop after this many frames. `None` plays until cancelled.
    pub max_frames: Option<u64>,
}
