// SPDX-License-Identifier: MIT

//! A stylesheet-backed [`StyleEnvironment`].
//!
//! Only the parts of a token stylesheet that hold custom properties are
//! kept: the `:root` block and theme blocks selected by a `data-theme`
//! attribute. Everything else (rules for elements, at-rules, ordinary
//! declarations) is skipped.
//!
//! ```css
//! :root { --color-white: #ffffff; }
//! [data-theme="dark"] { --color-white: #0f172a; }
//! ```
//!
//! Effective values resolve in three layers, later winning:
//!
//! 1. `:root` declarations
//! 2. declarations of the active theme block
//! 3. inline values written through [`StyleEnvironment::set_variable`]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::environment::StyleEnvironment;
use crate::theme::ThemeMode;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern is valid"));

static THEME_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?::root|html|body)?\[data-theme\s*=\s*["']?([\w-]+)["']?\]$"#)
        .expect("theme selector pattern is valid")
});

type Declarations = IndexMap<String, String>;

/// Stylesheet load or parse failure.
#[derive(Debug, thiserror::Error)]
pub enum StyleSheetError {
    #[error("stylesheet parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: &'static str },
    #[error("failed to access stylesheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which block a selector addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Root,
    Theme(String),
}

fn classify_selector(selector: &str) -> Option<Target> {
    let selector = selector.trim();
    if selector == ":root" || selector == "html" {
        return Some(Target::Root);
    }
    THEME_SELECTOR
        .captures(selector)
        .map(|caps| Target::Theme(caps[1].to_string()))
}

/// A parsed token stylesheet with an active theme and inline overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    root: Declarations,
    themes: IndexMap<String, Declarations>,
    inline: Declarations,
    theme: ThemeMode,
}

impl StyleSheet {
    /// Parse CSS text. The active theme starts as light.
    ///
    /// # Errors
    ///
    /// Returns [`StyleSheetError::Parse`] on unbalanced braces or a
    /// selector without a block.
    pub fn parse(css: &str) -> Result<Self, StyleSheetError> {
        // Blank comments out byte-for-byte so offsets still point into `css`.
        let blanked = COMMENT.replace_all(css, |caps: &regex::Captures<'_>| " ".repeat(caps[0].len()));
        let text: &str = &blanked;
        let bytes = text.as_bytes();

        let mut sheet = Self::default();
        let mut selector_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' => {
                    let open = i;
                    let close = matching_brace(bytes, open)?;
                    let selector = text[selector_start..open].trim();
                    let body = &text[open + 1..close];
                    if !selector.starts_with('@') {
                        sheet.absorb_rule(selector, body);
                    }
                    i = close + 1;
                    selector_start = i;
                }
                b'}' => {
                    return Err(StyleSheetError::Parse { offset: i, message: "unexpected '}'" });
                }
                b';' if text[selector_start..i].trim_start().starts_with('@') => {
                    // Statement at-rule such as `@import url(x.css);`.
                    i += 1;
                    selector_start = i;
                }
                _ => i += 1,
            }
        }

        if !text[selector_start..].trim().is_empty() {
            return Err(StyleSheetError::Parse {
                offset: selector_start,
                message: "selector without a block",
            });
        }

        debug!(
            root = sheet.root.len(),
            themes = sheet.themes.len(),
            "parsed stylesheet"
        );
        Ok(sheet)
    }

    /// Read and parse a stylesheet file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error.
    pub fn from_path(path: &Path) -> Result<Self, StyleSheetError> {
        let css = fs::read_to_string(path).map_err(|source| StyleSheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&css)
    }

    fn absorb_rule(&mut self, selector_list: &str, body: &str) {
        let targets: Vec<Target> = selector_list.split(',').filter_map(classify_selector).collect();
        if targets.is_empty() {
            return;
        }
        let decls = parse_declarations(body);
        for target in targets {
            let block = match target {
                Target::Root => &mut self.root,
                Target::Theme(name) => self.themes.entry(name).or_default(),
            };
            for (name, value) in &decls {
                block.insert(name.clone(), value.clone());
            }
        }
    }

    /// The active theme.
    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Switch the active theme block.
    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    /// Names of all theme blocks in the sheet.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Declarations of the `:root` block.
    #[must_use]
    pub const fn root(&self) -> &IndexMap<String, String> {
        &self.root
    }

    fn active_theme_block(&self) -> Option<&Declarations> {
        match self.theme {
            ThemeMode::Light => None,
            ThemeMode::Dark => self.themes.get(self.theme.as_str()),
        }
    }

    /// Render the sheet back to CSS, folding inline values into the block
    /// of the active theme (`:root` for light).
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut root = self.root.clone();
        let mut themes = self.themes.clone();

        let target = match self.theme {
            ThemeMode::Light => &mut root,
            ThemeMode::Dark => themes.entry(self.theme.as_str().to_string()).or_default(),
        };
        for (name, value) in &self.inline {
            target.insert(name.clone(), value.clone());
        }

        let mut out = String::new();
        write_block(&mut out, ":root", &root);
        for (name, decls) in &themes {
            out.push('\n');
            write_block(&mut out, &format!("[data-theme=\"{name}\"]"), decls);
        }
        out
    }

    /// Write [`to_css`](Self::to_css) to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleSheetError::Io`] if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), StyleSheetError> {
        fs::write(path, self.to_css()).map_err(|source| StyleSheetError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl StyleEnvironment for StyleSheet {
    fn variables(&self) -> Vec<(String, String)> {
        let mut effective = self.root.clone();
        if let Some(block) = self.active_theme_block() {
            for (name, value) in block {
                effective.insert(name.clone(), value.clone());
            }
        }
        for (name, value) in &self.inline {
            effective.insert(name.clone(), value.clone());
        }
        effective.into_iter().collect()
    }

    fn set_variable(&mut self, name: &str, value: &str) {
        self.inline.insert(name.to_string(), value.trim().to_string());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Offset of the `}` closing the `{` at `open`. Braces inside quoted
/// strings do not count.
fn matching_brace(bytes: &[u8], open: usize) -> Result<usize, StyleSheetError> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(StyleSheetError::Parse { offset: open, message: "unclosed '{'" })
}

/// Split a block body at top-level `;`. Nested blocks are dropped; quoted
/// strings and parentheses are kept whole.
fn split_declarations(body: &str) -> Vec<String> {
    let mut decls = Vec::new();
    let mut current = String::new();
    let mut braces = 0usize;
    let mut parens = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in body.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
        } else {
            match c {
                '"' | '\'' => quote = Some(c),
                '{' => {
                    braces += 1;
                    continue;
                }
                '}' => {
                    braces = braces.saturating_sub(1);
                    continue;
                }
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                ';' if braces == 0 && parens == 0 => {
                    decls.push(std::mem::take(&mut current));
                    continue;
                }
                _ => {}
            }
        }
        if braces == 0 {
            current.push(c);
        }
    }
    decls.push(current);
    decls
}

/// Custom-property declarations of a block body.
fn parse_declarations(body: &str) -> Declarations {
    let mut decls = Declarations::new();
    for decl in split_declarations(body) {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.starts_with("--") && !value.is_empty() {
            decls.insert(name.to_string(), value.to_string());
        }
    }
    decls
}

fn write_block(out: &mut String, selector: &str, decls: &Declarations) {
    out.push_str(selector);
    out.push_str(" {\n");
    for (name, value) in decls {
        out.push_str(&format!("  {name}: {value};\n"));
    }
    out.push_str("}\n");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
