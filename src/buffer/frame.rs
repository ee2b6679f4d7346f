//! Frame: A grid of pixels representing one tick of the matrix.
//!
//! The frame uses contiguous memory allocation for cache efficiency.
//! Pixels are stored in row-major order.

use super::color::Rgb;
use std::fmt;

/// Width and height of a frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by this size.
    #[inline]
    pub const fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A grid of pixels representing the matrix for one tick.
///
/// Access is in row-major order: `index = y * width + x`. Once handed to a
/// sink a frame is only ever read; animations clear and redraw their own
/// frame in place on the next tick.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Contiguous pixel storage (row-major order).
    pixels: Vec<Rgb>,
    /// Frame dimensions.
    size: Size,
}

impl Frame {
    /// Create a new frame with the given dimensions.
    ///
    /// All pixels start black.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Frame dimensions must be non-zero");
        let size = Size::new(width, height);
        Self {
            pixels: vec![Rgb::BLACK; size.area()],
            size,
        }
    }

    /// Create a new frame of the given size.
    #[inline]
    pub fn with_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    /// Get the frame width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.size.width
    }

    /// Get the frame height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.size.height
    }

    /// Get the frame dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Get the total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the frame is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get a reference to the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Get a mutable reference to the underlying pixel slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub const fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.size.width && y < self.size.height {
            Some((y as usize) * (self.size.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<Rgb> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, color: Rgb) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.pixels[idx] = color;
            true
        } else {
            false
        }
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Clear the frame to black.
    pub fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }

    /// Fill a disc centred on (`cx`, `cy`).
    ///
    /// Pixel (x, y) is covered when its centre (x + 0.5, y + 0.5) lies within
    /// `radius` of the centre. Parts outside the frame are clipped, so the
    /// centre may lie anywhere, including far off-frame.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }

        let max_x = f64::from(self.size.width) - 1.0;
        let max_y = f64::from(self.size.height) - 1.0;
        let x0 = (cx - radius).floor().max(0.0);
        let x1 = (cx + radius).ceil().min(max_x);
        let y0 = (cy - radius).floor().max(0.0);
        let y1 = (cy + radius).ceil().min(max_y);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let r2 = radius * radius;
        let width = self.size.width as usize;
        for y in (y0 as usize)..=(y1 as usize) {
            let dy = y as f64 + 0.5 - cy;
            for x in (x0 as usize)..=(x1 as usize) {
                let dx = x as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[y * width + x] = color;
                }
            }
        }
    }

    /// Copy content from another frame.
    ///
    /// The frames must have the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.size, other.size);
        self.pixels.copy_from_slice(&other.pixels);
    }

    /// Copy content from another frame, scaling every pixel by `brightness`
    /// percent.
    pub fn copy_scaled_from(&mut self, other: &Self, brightness: u8) {
        debug_assert_eq!(self.size, other.size);
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            *dst = src.scaled(brightness);
        }
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.size.width as usize)
    }

    /// Count the pixels that are not black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| **p != Rgb::BLACK).count()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("size", &self.size)
            .field("lit_pixels", &self.lit_pixels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new() {
        let frame = Frame::new(64, 32);
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 32);
        assert_eq!(frame.len(), 64 * 32);
        assert_eq!(frame.lit_pixels(), 0);
        assert_eq!(frame.size().to_string(), "64x32");
    }

    #[test]
    #[should_panic]
    fn test_frame_zero_height() {
        Frame::new(64, 0);
    }

    #[test]
    fn test_frame_get_set() {
        let mut frame = Frame::new(64, 32);
        assert!(frame.set(5, 10, Rgb::RED));
        assert_eq!(frame.get(5, 10), Some(Rgb::RED));
        assert_eq!(frame.index_of(5, 10), Some(10 * 64 + 5));
    }

    #[test]
    fn test_frame_bounds() {
        let mut frame = Frame::new(64, 32);
        assert!(frame.get(63, 31).is_some());
        assert!(frame.get(64, 31).is_none());
        assert!(frame.get(63, 32).is_none());
        assert!(!frame.set(64, 0, Rgb::WHITE));
    }

    #[test]
    fn test_frame_clear() {
        let mut frame = Frame::new(8, 8);
        frame.fill(Rgb::BLUE);
        assert_eq!(frame.lit_pixels(), 64);
        frame.clear();
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_fill_circle_covers_centre_pixels() {
        let mut frame = Frame::new(16, 16);
        frame.fill_circle(8.0, 8.0, 1.0, Rgb::GREEN);
        // The four pixels around (8, 8) have centres at distance ~0.707.
        assert_eq!(frame.get(7, 7), Some(Rgb::GREEN));
        assert_eq!(frame.get(8, 7), Some(Rgb::GREEN));
        assert_eq!(frame.get(7, 8), Some(Rgb::GREEN));
        assert_eq!(frame.get(8, 8), Some(Rgb::GREEN));
        assert_eq!(frame.lit_pixels(), 4);
    }

    #[test]
    fn test_fill_circle_clips() {
        let mut frame = Frame::new(16, 16);
        frame.fill_circle(0.0, 0.0, 3.0, Rgb::WHITE);
        assert_eq!(frame.get(0, 0), Some(Rgb::WHITE));
        assert!(frame.lit_pixels() < 9);

        let mut frame = Frame::new(16, 16);
        frame.fill_circle(-100.0, 500.0, 4.0, Rgb::WHITE);
        frame.fill_circle(f64::NAN, 4.0, 4.0, Rgb::WHITE);
        frame.fill_circle(4.0, 4.0, 0.0, Rgb::WHITE);
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_copy_scaled_from() {
        let mut src = Frame::new(4, 4);
        src.fill(Rgb::new(200, 100, 0));
        let mut dst = Frame::new(4, 4);
        dst.copy_scaled_from(&src, 50);
        assert_eq!(dst.get(3, 3), Some(Rgb::new(100, 50, 0)));
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_frame_rows() {
        let mut frame = Frame::new(3, 2);
        frame.set(2, 1, Rgb::RED);
        let rows: Vec<_> = frame.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], Rgb::RED);
    }
}
