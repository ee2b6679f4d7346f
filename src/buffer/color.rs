//! Rgb: The color of a single matrix pixel.

/// True-color RGB representation.
///
/// Uses 3 bytes for 24-bit color depth, which is what the panel driver
/// consumes per pixel.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0), an unlit pixel.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Create from hue (degrees), saturation and value (both 0.0-1.0).
    ///
    /// Hues outside `0..360` are wrapped. Channels are quantized through
    /// 16-bit precision and truncated to 8 bits, which is how the panel
    /// toolkit stores colors.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(quantize(m + r), quantize(m + g), quantize(m + b))
    }

    /// Scale every channel by a brightness percentage (0-100).
    #[inline]
    pub const fn scaled(self, percent: u8) -> Self {
        if percent >= 100 {
            return self;
        }
        let p = percent as u16;
        Self::new(
            ((self.r as u16 * p) / 100) as u8,
            ((self.g as u16 * p) / 100) as u8,
            ((self.b as u16 * p) / 100) as u8,
        )
    }
}

/// Map a unit channel value to 8 bits via 16-bit rounding.
#[inline]
fn quantize(channel: f64) -> u8 {
    let wide = (channel.clamp(0.0, 1.0) * 65535.0 + 0.5) as u32;
    (wide >> 8) as u8
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}
