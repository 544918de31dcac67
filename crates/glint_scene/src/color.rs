//! Packed 24-bit RGB colors.
//!
//! All color arithmetic works on 8-bit channels. Fractional results are
//! truncated, not rounded.

use glint_math::Interval;

/// A color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x008000);
    pub const BLUE: Color = Color(0x0000FF);
    pub const YELLOW: Color = Color(0xFFFF00);
    pub const CYAN: Color = Color(0x00FFFF);
    pub const MAGENTA: Color = Color(0xFF00FF);
    pub const GRAY: Color = Color(0x808080);
    pub const ORANGE: Color = Color(0xFFA500);
    pub const PURPLE: Color = Color(0x800080);
    pub const BROWN: Color = Color(0xA52A2A);
    pub const PINK: Color = Color(0xFFC0CB);
    pub const LIME: Color = Color(0x00FF00);

    /// Create a color from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    #[inline]
    pub const fn new(packed: u32) -> Self {
        Color(packed & 0xFFFFFF)
    }

    #[inline]
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Create a color from unit-range components, clamped to [0, 1].
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| (Interval::UNIT.clamp(v) * 255.0) as u8;
        Self::from_channels(channel(r), channel(g), channel(b))
    }

    /// The packed `0xRRGGBB` value.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }

    /// Components as unit-range floats.
    pub fn to_rgb(self) -> [f64; 3] {
        [
            self.r() as f64 / 255.0,
            self.g() as f64 / 255.0,
            self.b() as f64 / 255.0,
        ]
    }

    /// Multiply every channel by `factor`, clamped to [0, 1].
    pub fn scale(self, factor: f64) -> Self {
        let factor = Interval::UNIT.clamp(factor);
        let channel = |c: u8| (c as f64 * factor) as u8;
        Self::from_channels(channel(self.r()), channel(self.g()), channel(self.b()))
    }

    /// Linear interpolation `(1 - t) self + t other`, with `t` clamped to [0, 1].
    pub fn blend(self, other: Color, t: f64) -> Self {
        let t = Interval::UNIT.clamp(t);
        let channel = |a: u8, b: u8| ((1.0 - t) * a as f64 + t * b as f64) as u8;
        Self::from_channels(
            channel(self.r(), other.r()),
            channel(self.g(), other.g()),
            channel(self.b(), other.b()),
        )
    }

    /// Per-channel sum saturating at 255.
    pub fn add(self, other: Color) -> Self {
        Self::from_channels(
            self.r().saturating_add(other.r()),
            self.g().saturating_add(other.g()),
            self.b().saturating_add(other.b()),
        )
    }

    /// Per-channel modulation `a * b / 255`.
    pub fn multiply(self, other: Color) -> Self {
        let channel = |a: u8, b: u8| ((a as u32 * b as u32) / 255) as u8;
        Self::from_channels(
            channel(self.r(), other.r()),
            channel(self.g(), other.g()),
            channel(self.b(), other.b()),
        )
    }

    /// Integer channel average. An empty slice averages to black.
    pub fn average(colors: &[Color]) -> Self {
        if colors.is_empty() {
            return Color::BLACK;
        }

        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for c in colors {
            r += c.r() as u64;
            g += c.g() as u64;
            b += c.b() as u64;
        }

        let n = colors.len() as u64;
        Self::from_channels((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Color::new(packed)
    }
}

impl From<Color> for u32 {
    fn from(c: Color) -> Self {
        c.packed()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}
