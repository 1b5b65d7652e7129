// SPDX-License-Identifier: MIT
//
// sm-color — CSS color handling for the stylemark token pipeline.
//
// The token pipeline needs exactly five things from a color library:
// parse a CSS value, move its lightness up or down in perceptual steps,
// print it back as hex, measure its relative luminance, and compare two
// colors for contrast. This crate provides those and nothing else.
//
//   parse.rs  — CSS strings (hex, named, rgb(), hsl()) → Color
//   named.rs  — the CSS named-color table
//   color.rs  — Color, Lab lightness math, hex output, WCAG luminance

pub mod color;
pub mod named;
mod parse;

pub use color::{Color, contrast};

/// Error returned when a string is not a recognizable CSS color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    /// The input did not match any supported color syntax.
    #[error("invalid color format: {0:?}")]
    Invalid(String),
}
