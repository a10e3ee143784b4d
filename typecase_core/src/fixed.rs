//! 26.6 fixed-point values.
//!
//! Glyph providers report metrics and kerning with six fractional bits, the
//! convention `FreeType` and most rasterizers share. Pixel values are taken
//! with an arithmetic right shift, so negative values floor toward minus
//! infinity.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Signed 26.6 fixed-point number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct F26Dot6(pub i32);

impl F26Dot6 {
    pub const ZERO: Self = Self(0);

    /// Convert a floating-point pixel value, rounding to the nearest 1/64.
    pub fn from_f32(px: f32) -> Self {
        Self((px * 64.0).round() as i32)
    }

    /// Convert a whole pixel count.
    pub fn from_pixels(px: i32) -> Self {
        Self(px * 64)
    }

    /// Whole pixels, discarding the fraction (`>> 6`).
    pub fn to_pixels(self) -> i32 {
        self.0 >> 6
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }
}

impl Add for F26Dot6 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for F26Dot6 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for F26Dot6 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for F26Dot6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}
