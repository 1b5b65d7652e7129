// SPDX-License-Identifier: MIT

//! WCAG contrast checks for foreground/background pairs.
//!
//! Ratings follow WCAG 2.1 for normal-size text: AAA needs 7:1, AA needs
//! 4.5:1.

use std::fmt;

use sm_color::{Color, ParseColorError};

/// Minimum ratio for AAA.
pub const AAA_RATIO: f64 = 7.0;
/// Minimum ratio for AA.
pub const AA_RATIO: f64 = 4.5;

/// WCAG conformance level of a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    Fail,
    Aa,
    Aaa,
}

impl Rating {
    /// Rate a contrast ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_RATIO {
            Self::Aaa
        } else if ratio >= AA_RATIO {
            Self::Aa
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Fail => "Fail",
        }
    }

    /// Status class used when displaying the rating.
    #[must_use]
    pub const fn severity(self) -> &'static str {
        match self {
            Self::Aaa => "success",
            Self::Aa => "warning",
            Self::Fail => "error",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of checking one color pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastReport {
    pub ratio: f64,
    pub rating: Rating,
}

impl ContrastReport {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        Self { ratio, rating: Rating::from_ratio(ratio) }
    }
}

impl fmt::Display for ContrastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}:1 {}", self.ratio, self.rating)
    }
}

/// Check a foreground against a background.
///
/// # Errors
///
/// Returns an error if either value is not a color.
pub fn check(fg: &str, bg: &str) -> Result<ContrastReport, ParseColorError> {
    let fg = Color::parse(fg)?;
    let bg = Color::parse(bg)?;
    Ok(ContrastReport::from_ratio(sm_color::contrast(&fg, &bg)))
}
