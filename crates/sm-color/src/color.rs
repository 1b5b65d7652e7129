// SPDX-License-Identifier: MIT
//
// sm-color color system — sRGB storage with CIE L*a*b* lightness moves.
//
// Single-char math variables (r, g, b, l, a, x, y, z) are standard in
// color science.
#![allow(clippy::many_single_char_names)]
//
// Design tokens are CSS strings, so a Color here is what a browser would
// hold after parsing one: three sRGB channels in 0–255 plus alpha. Ramp
// generation needs perceptual lightness steps, which happen in CIE Lab
// (D65 white) so that `brighten(1)` means the same visual step on every
// hue.
//
// Conversion pipeline:
//
//   CSS string → sRGB (0–255) ↔ linear sRGB ↔ XYZ (D65) ↔ L*a*b*
//
// Lab → sRGB results outside the displayable range are clipped per
// channel, so `brighten` on a near-white color saturates at #ffffff.

use std::fmt;
use std::str::FromStr;

use crate::ParseColorError;
use crate::parse;

// ─── Lab constants ──────────────────────────────────────────────────────────

/// Lab lightness moved by one unit of `brighten` / `darken`.
pub const LAB_STEP: f64 = 18.0;

// D65 reference white.
const XN: f64 = 0.950_470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088_830;

// Piecewise constants of the Lab transfer function (4/29, 6/29, …).
const T0: f64 = 0.137_931_034;
const T1: f64 = 0.206_896_552;
const T2: f64 = 0.128_418_55;
const T3: f64 = 0.008_856_452;

// ─── Color ──────────────────────────────────────────────────────────────────

/// An sRGB color with alpha, as parsed from a CSS value.
///
/// Channels are stored as `f64` in 0.0–255.0 so that chains of Lab
/// operations do not accumulate rounding; [`hex`](Self::hex) rounds once
/// at the end.
///
/// # Examples
///
/// ```
/// use sm_color::Color;
///
/// let blue = Color::parse("#3b82f6").unwrap();
/// assert_eq!(blue.hex(), "#3b82f6");
///
/// let lighter = blue.brighten(1.2);
/// assert!(lighter.luminance() > blue.luminance());
///
/// let ratio = sm_color::contrast(&Color::BLACK, &Color::WHITE);
/// assert!((ratio - 21.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel, 0.0–255.0.
    pub r: f64,
    /// Green channel, 0.0–255.0.
    pub g: f64,
    /// Blue channel, 0.0–255.0.
    pub b: f64,
    /// Alpha (opacity): 0.0 (transparent) to 1.0 (opaque).
    pub alpha: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from 8-bit channels.
    #[inline]
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels and a 0.0–1.0 alpha.
    #[inline]
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Create a color from floating-point channels, clipping each to 0–255.
    #[must_use]
    pub fn clipped(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Parse any CSS color string this crate understands.
    ///
    /// Supported: hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `#` optional),
    /// CSS named colors, `transparent`, `rgb()`/`rgba()` and `hsl()`/`hsla()`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError::Invalid`] if the string is not a color.
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        parse::parse_color(s).ok_or_else(|| ParseColorError::Invalid(s.to_string()))
    }

    /// Create a color from CIE L*a*b* coordinates (D65).
    ///
    /// Out-of-gamut results are clipped channel by channel.
    #[must_use]
    pub fn from_lab(l: f64, a: f64, b: f64, alpha: f64) -> Self {
        let (r, g, bl) = lab_to_rgb(l, a, b);
        Self::clipped(r, g, bl, alpha)
    }

    /// Pure black.
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, alpha: 1.0 };

    /// Pure white.
    pub const WHITE: Self = Self { r: 255.0, g: 255.0, b: 255.0, alpha: 1.0 };

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, alpha: 0.0 };

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    // ─── Lightness Operations ────────────────────────────────────────────

    /// Convert to CIE L*a*b* (D65). Lightness is floored at 0.
    #[must_use]
    pub fn lab(self) -> (f64, f64, f64) {
        rgb_to_lab(self.r, self.g, self.b)
    }

    /// Raise Lab lightness by `amount × 18`.
    ///
    /// Negative amounts darken; `brighten(x)` equals `darken(-x)`.
    #[must_use]
    pub fn brighten(self, amount: f64) -> Self {
        self.darken(-amount)
    }

    /// Lower Lab lightness by `amount × 18`.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        let (l, a, b) = self.lab();
        Self::from_lab(LAB_STEP.mul_add(-amount, l), a, b, self.alpha)
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Round to 8-bit channels.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Hex string: `#rrggbb`, or `#rrggbbaa` when alpha < 1.0.
    #[must_use]
    pub fn hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = to_u8(self.alpha * 255.0);
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// WCAG 2.1 relative luminance, 0.0 (black) to 1.0 (white).
    ///
    ///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
    #[must_use]
    pub fn luminance(self) -> f64 {
        let r = srgb_to_linear(self.r / 255.0);
        let g = srgb_to_linear(self.g / 255.0);
        let b = srgb_to_linear(self.b / 255.0);
        0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
    }
}

/// WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0], independent of argument order:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
#[must_use]
pub fn contrast(a: &Color, b: &Color) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color::rgba({:.2}, {:.2}, {:.2}, {:.2})",
            self.r, self.g, self.b, self.alpha
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── sRGB ↔ Linear (Gamma) ──────────────────────────────────────────────────

/// Convert a single sRGB component (0.0–1.0) to linear light.
///
/// Uses the WCAG 2.x threshold of 0.03928.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── sRGB ↔ Lab ─────────────────────────────────────────────────────────────

/// Channel (0–255) to linear light, sRGB threshold 0.04045.
#[inline]
fn rgb_xyz(c: f64) -> f64 {
    let c = c / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light to channel (0–255), unclipped.
#[inline]
fn xyz_rgb(c: f64) -> f64 {
    let v = if c <= 0.003_04 {
        12.92 * c
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    };
    255.0 * v
}

#[inline]
fn xyz_lab(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

#[inline]
fn lab_xyz(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

fn rgb_to_lab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let r = rgb_xyz(r);
    let g = rgb_xyz(g);
    let b = rgb_xyz(b);

    let x = xyz_lab(0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g)) / XN);
    let y = xyz_lab(0.072_175_0f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g)) / YN);
    let z = xyz_lab(0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192_0 * g)) / ZN);

    let l = 116.0f64.mul_add(y, -16.0);
    (l.max(0.0), 500.0 * (x - y), 200.0 * (y - z))
}

fn lab_to_rgb(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let y = YN * lab_xyz(fy);
    let x = XN * lab_xyz(fx);
    let z = ZN * lab_xyz(fz);

    let r = xyz_rgb(0.498_531_4f64.mul_add(-z, 3.240_454_2f64.mul_add(x, -(1.537_138_5 * y))));
    let g = xyz_rgb(0.041_556_0f64.mul_add(z, (-0.969_266_0f64).mul_add(x, 1.876_010_8 * y)));
    let bl = xyz_rgb(1.057_225_2f64.mul_add(z, 0.055_643_4f64.mul_add(x, -(0.204_025_9 * y))));

    (r, g, bl)
}

/// Round a 0–255 float to a byte.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
