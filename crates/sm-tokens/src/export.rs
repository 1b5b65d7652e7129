// SPDX-License-Identifier: MIT

//! Token set serializers, one strategy per output format.
//!
//! Every exporter is a pure function of the token set. Writing the result
//! anywhere is the caller's business.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::token::{Categories, Category, TokenMap, TokenSet};

/// The supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Custom properties in a `:root` block.
    #[default]
    Css,
    /// Flat SCSS variables.
    Scss,
    /// The token set as a JSON document.
    Json,
    /// A Tailwind `theme.extend` configuration module.
    Tailwind,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Css, Self::Scss, Self::Json, Self::Tailwind];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Json => "json",
            Self::Tailwind => "tailwind",
        }
    }

    /// The exporter implementing this format.
    #[must_use]
    pub fn exporter(self) -> &'static dyn Exporter {
        match self {
            Self::Css => &CssExporter,
            Self::Scss => &ScssExporter,
            Self::Json => &JsonExporter,
            Self::Tailwind => &TailwindExporter,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format {0:?} (expected css, scss, json or tailwind)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// A token set serializer.
pub trait Exporter {
    fn export(&self, tokens: &TokenSet) -> String;
}

/// Export `tokens` in `format`.
#[must_use]
pub fn export(tokens: &TokenSet, format: ExportFormat) -> String {
    format.exporter().export(tokens)
}

/// Export only the selected categories of `tokens`.
#[must_use]
pub fn export_filtered(tokens: &TokenSet, format: ExportFormat, categories: Categories) -> String {
    if categories == Categories::all() {
        export(tokens, format)
    } else {
        export(&tokens.filtered(categories), format)
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// `:root { name: value; … }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssExporter;

impl Exporter for CssExporter {
    fn export(&self, tokens: &TokenSet) -> String {
        let mut out = String::from(":root {\n");
        for (_, name, value) in tokens.iter() {
            out.push_str(&format!("  {name}: {value};\n"));
        }
        out.push('}');
        out
    }
}

/// `$name: value;` lines, the `--` of each name replaced by `$`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssExporter;

impl Exporter for ScssExporter {
    fn export(&self, tokens: &TokenSet) -> String {
        let mut out = String::new();
        for (_, name, value) in tokens.iter() {
            let bare = name.strip_prefix("--").unwrap_or(name);
            out.push_str(&format!("${bare}: {value};\n"));
        }
        out
    }
}

/// Pretty JSON with one key per category, all five always present.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(&self, tokens: &TokenSet) -> String {
        let doc: Map<String, Value> = Category::ALL
            .into_iter()
            .map(|c| (c.key().to_string(), Value::Object(to_json_map(tokens.category(c), Keys::Verbatim))))
            .collect();
        format!("{:#}", Value::Object(doc))
    }
}

/// `module.exports = { theme: { extend: { … } } }`.
///
/// Keys lose their category prefix; names without one are kept as they
/// are. Only `--font-size-*` typography tokens have a Tailwind home
/// (`fontSize`). Empty sections are omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailwindExporter;

impl TailwindExporter {
    /// Section name and key rule for each category.
    const SECTIONS: [(Category, &'static str, Keys); 5] = [
        (Category::Colors, "colors", Keys::Strip("--color-")),
        (Category::Typography, "fontSize", Keys::Only("--font-size-")),
        (Category::Spacing, "spacing", Keys::Strip("--space-")),
        (Category::Shadows, "boxShadow", Keys::Strip("--shadow-")),
        (Category::Radii, "borderRadius", Keys::Strip("--radius-")),
    ];
}

impl Exporter for TailwindExporter {
    fn export(&self, tokens: &TokenSet) -> String {
        let mut extend = Map::new();
        for (category, section, keys) in Self::SECTIONS {
            let entries = to_json_map(tokens.category(category), keys);
            if !entries.is_empty() {
                extend.insert(section.to_string(), Value::Object(entries));
            }
        }

        let mut theme = Map::new();
        theme.insert("extend".to_string(), Value::Object(extend));
        let mut config = Map::new();
        config.insert("theme".to_string(), Value::Object(theme));

        format!("module.exports = {:#}", Value::Object(config))
    }
}

/// How token names become JSON keys.
#[derive(Debug, Clone, Copy)]
enum Keys {
    /// The full name.
    Verbatim,
    /// The name minus this prefix, or the full name if it lacks it.
    Strip(&'static str),
    /// Only names with this prefix, minus the prefix.
    Only(&'static str),
}

fn to_json_map(tokens: &TokenMap, keys: Keys) -> Map<String, Value> {
    tokens
        .iter()
        .filter_map(|(name, value)| {
            let key = match keys {
                Keys::Verbatim => name.as_str(),
                Keys::Strip(prefix) => name.strip_prefix(prefix).unwrap_or(name),
                Keys::Only(prefix) => name.strip_prefix(prefix)?,
            };
            Some((key.to_string(), Value::String(value.clone())))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
