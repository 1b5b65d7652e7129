// SPDX-License-Identifier: MIT

//! # sm-tokens — design-token pipeline
//!
//! Reads design tokens out of a style environment, derives color ramps
//! from a single base color, and serializes tokens for other toolchains.
//!
//! # Architecture
//!
//! ```text
//! StyleSheet / MemoryEnvironment   (environment.rs, stylesheet.rs)
//!     │  load_from: snapshot of custom properties
//!     ▼
//! TokenSet                         (token.rs)
//!     │  partitioned by name prefix into five categories
//!     ▼
//! TokenStore                       (store.rs)
//!     │  load / apply / import / set_token / replace_palette
//!     ├──────────────► Palette     (palette.rs: 50…900 ramp from one color)
//!     ▼
//! Exporter                         (export.rs: css, scss, json, tailwind)
//! ```
//!
//! Around the pipeline: `theme.rs` resolves light/dark and persists the
//! user's choice, `contrast.rs` rates color pairs against WCAG, and
//! `builtin.rs` carries the default design system.
//!
//! Nothing here is global. Callers construct a store and an environment
//! and pass them where they are needed.

pub mod builtin;
pub mod contrast;
pub mod environment;
pub mod export;
pub mod palette;
pub mod store;
pub mod stylesheet;
pub mod theme;
pub mod token;

pub use environment::{MemoryEnvironment, StyleEnvironment, load_from};
pub use export::{ExportFormat, Exporter, UnknownFormat, export, export_filtered};
pub use palette::{Foreground, Palette, PaletteEntry, PaletteError, Step};
pub use store::{ImportError, TokenError, TokenStore};
pub use stylesheet::{StyleSheet, StyleSheetError};
pub use theme::{ThemeChanged, ThemeManager, ThemeMode};
pub use token::{Categories, Category, TokenMap, TokenSet};
