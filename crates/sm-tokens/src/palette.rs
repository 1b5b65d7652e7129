// SPDX-License-Identifier: MIT

//! Ten-step color ramps derived from one base color.
//!
//! Step 500 is the base exactly as written. Lighter steps brighten it and
//! darker steps darken it, by fixed amounts of Lab lightness (one unit is
//! 18 L*):
//!
//! | step | 50  | 100 | 200 | 300 | 400 | 500  | 600 | 700 | 800 | 900 |
//! |------|-----|-----|-----|-----|-----|------|-----|-----|-----|-----|
//! | move | +2.4| +1.8| +1.2| +0.6| +0.3| base | -0.3| -0.6| -0.9| -1.2|
//!
//! Each step also gets a readable foreground for previews: dark text on
//! light steps, light text on dark ones.

use std::fmt;

use sm_color::{Color, ParseColorError};
use tracing::debug;

use crate::token::TokenSet;

/// Relative luminance above which a step takes a dark foreground.
pub const FOREGROUND_THRESHOLD: f64 = 0.5;

/// Failure to derive a palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("invalid color format: {input:?}")]
    InvalidColor {
        input: String,
        #[source]
        source: ParseColorError,
    },
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One lightness step of a ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
}

impl Step {
    /// All steps, lightest first.
    pub const ALL: [Self; 10] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
        Self::S600,
        Self::S700,
        Self::S800,
        Self::S900,
    ];

    /// The numeric key (`50`, `100`, … `900`).
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::S50 => 50,
            Self::S100 => 100,
            Self::S200 => 200,
            Self::S300 => 300,
            Self::S400 => 400,
            Self::S500 => 500,
            Self::S600 => 600,
            Self::S700 => 700,
            Self::S800 => 800,
            Self::S900 => 900,
        }
    }

    /// Step with the given numeric key.
    #[must_use]
    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.value() == value)
    }

    /// Brighten amount relative to the base; negative darkens, zero is the
    /// base itself.
    #[must_use]
    pub const fn shift(self) -> f64 {
        match self {
            Self::S50 => 2.4,
            Self::S100 => 1.8,
            Self::S200 => 1.2,
            Self::S300 => 0.6,
            Self::S400 => 0.3,
            Self::S500 => 0.0,
            Self::S600 => -0.3,
            Self::S700 => -0.6,
            Self::S800 => -0.9,
            Self::S900 => -1.2,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// Foreground
// ---------------------------------------------------------------------------

/// Text color to preview a step with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foreground {
    Dark,
    Light,
}

impl Foreground {
    /// Pick the readable foreground for a background color.
    #[must_use]
    pub fn for_background(bg: Color) -> Self {
        if bg.luminance() > FOREGROUND_THRESHOLD {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// CSS value referencing the design system's text colors.
    #[must_use]
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Dark => "var(--color-gray-800)",
            Self::Light => "var(--color-white)",
        }
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// One step of a derived palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub step: Step,
    /// CSS value: the base verbatim for step 500, hex otherwise.
    pub value: String,
    pub foreground: Foreground,
}

/// A derived ten-step ramp. Ephemeral: nothing persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Derive a ramp from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidColor`] if `base` is not a color.
    pub fn derive(base: &str) -> Result<Self, PaletteError> {
        let color = Color::parse(base).map_err(|source| PaletteError::InvalidColor {
            input: base.to_string(),
            source,
        })?;

        let entries = Step::ALL
            .into_iter()
            .map(|step| {
                let shifted = if step == Step::S500 {
                    color
                } else {
                    color.brighten(step.shift())
                };
                // Preview what will actually be displayed: the rounded hex.
                let (r, g, b) = shifted.to_rgb8();
                let shown = Color::rgba8(r, g, b, shifted.alpha);
                let value = if step == Step::S500 {
                    base.to_string()
                } else {
                    shifted.hex()
                };
                PaletteEntry {
                    step,
                    value,
                    foreground: Foreground::for_background(shown),
                }
            })
            .collect();

        debug!(base, "derived palette");
        Ok(Self { entries })
    }

    /// The ten entries, lightest first.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// The entry for `step`.
    #[must_use]
    pub fn get(&self, step: Step) -> &PaletteEntry {
        // Entries are built from Step::ALL, so the index always matches.
        &self.entries[step as usize]
    }

    /// The base color as given.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.get(Step::S500).value
    }

    /// The color variable name of `step` within `family`.
    #[must_use]
    pub fn token_name(family: &str, step: Step) -> String {
        format!("--color-{family}-{step}")
    }

    /// The ramp as a colors-only token set (`--color-<family>-<step>`).
    #[must_use]
    pub fn to_token_set(&self, family: &str) -> TokenSet {
        TokenSet::from_variables(
            self.entries
                .iter()
                .map(|e| (Self::token_name(family, e.step), e.value.clone())),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
