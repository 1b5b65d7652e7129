// SPDX-License-Identifier: MIT

//! The Token Store: owner of the current token set.
//!
//! A store is an ordinary value. Whoever needs tokens gets a reference to
//! it along with the environment to read from or write to; there is no
//! process-wide instance.

use serde_json::Value;
use tracing::{debug, warn};

use crate::environment::{StyleEnvironment, load_from};
use crate::export::{ExportFormat, export_filtered};
use crate::palette::Palette;
use crate::token::{Categories, Category, TokenMap, TokenSet};

/// Rejected import. The store is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("token import must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    #[error("category {category:?} must map token names to strings or numbers")]
    InvalidCategory { category: String },
    #[error("token import is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected single-token update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("{name:?} does not belong to any token category")]
    UnknownCategory { name: String },
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Holds the current [`TokenSet`] and moves it to and from an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    tokens: TokenSet,
}

impl TokenStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store loaded from `env`.
    pub fn from_environment<E: StyleEnvironment + ?Sized>(env: &E) -> Self {
        let mut store = Self::new();
        store.load(env);
        store
    }

    /// The current tokens.
    #[must_use]
    pub const fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Replace the tokens with a snapshot of `env`.
    pub fn load<E: StyleEnvironment + ?Sized>(&mut self, env: &E) {
        self.tokens = load_from(env);
        debug!(tokens = self.tokens.len(), "loaded tokens");
    }

    /// Write every token into `env`, categories in order.
    pub fn apply<E: StyleEnvironment + ?Sized>(&self, env: &mut E) {
        for (_, name, value) in self.tokens.iter() {
            env.set_variable(name, value);
        }
        debug!(tokens = self.tokens.len(), "applied tokens");
    }

    /// Merge an external token document over the current set and apply.
    ///
    /// The document must be an object keyed by category name. Each known
    /// category present replaces the current one wholesale; absent ones
    /// are kept. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Fails without touching the store if `value` is not an object or a
    /// category is not a map of strings or numbers.
    pub fn import<E: StyleEnvironment + ?Sized>(
        &mut self,
        value: &Value,
        env: &mut E,
    ) -> Result<(), ImportError> {
        let replacements = match parse_import(value) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "rejected token import");
                return Err(e);
            }
        };

        for (category, tokens) in replacements {
            debug!(%category, tokens = tokens.len(), "replacing category");
            *self.tokens.category_mut(category) = tokens;
        }
        self.apply(env);
        Ok(())
    }

    /// [`import`](Self::import) from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Json`] on malformed text, otherwise as
    /// [`import`](Self::import).
    pub fn import_json<E: StyleEnvironment + ?Sized>(
        &mut self,
        text: &str,
        env: &mut E,
    ) -> Result<(), ImportError> {
        let value: Value = serde_json::from_str(text).inspect_err(|e| {
            warn!(error = %e, "rejected token import");
        })?;
        self.import(&value, env)
    }

    /// Set one token and write it to `env`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownCategory`] if the name has no token
    /// prefix.
    pub fn set_token<E: StyleEnvironment + ?Sized>(
        &mut self,
        name: &str,
        value: &str,
        env: &mut E,
    ) -> Result<Category, TokenError> {
        let category = self
            .tokens
            .insert(name, value)
            .ok_or_else(|| TokenError::UnknownCategory { name: name.to_string() })?;
        env.set_variable(name, value);
        debug!(name, value, %category, "set token");
        Ok(category)
    }

    /// Replace the color family `family` with a derived palette and apply
    /// those ten tokens.
    pub fn replace_palette<E: StyleEnvironment + ?Sized>(
        &mut self,
        family: &str,
        palette: &Palette,
        env: &mut E,
    ) {
        for entry in palette.entries() {
            let name = Palette::token_name(family, entry.step);
            env.set_variable(&name, &entry.value);
            self.tokens.colors.insert(name, entry.value.clone());
        }
        debug!(family, base = palette.base(), "replaced palette");
    }

    /// Export the selected categories in `format`.
    #[must_use]
    pub fn export(&self, format: ExportFormat, categories: Categories) -> String {
        export_filtered(&self.tokens, format, categories)
    }
}

/// Validate an import document into per-category replacements.
fn parse_import(value: &Value) -> Result<Vec<(Category, TokenMap)>, ImportError> {
    let Value::Object(doc) = value else {
        return Err(ImportError::NotAnObject { found: json_kind(value) });
    };

    let mut replacements = Vec::new();
    for (key, tokens) in doc {
        let Some(category) = Category::from_key(key) else {
            debug!(key = key.as_str(), "ignoring unknown import key");
            continue;
        };
        let invalid = || ImportError::InvalidCategory { category: key.clone() };
        let Value::Object(tokens) = tokens else {
            return Err(invalid());
        };

        let mut map = TokenMap::with_capacity(tokens.len());
        for (name, value) in tokens {
            let value = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => return Err(invalid()),
            };
            map.insert(name.clone(), value);
        }
        replacements.push((category, map));
    }
    Ok(replacements)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
