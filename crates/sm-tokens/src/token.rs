// SPDX-License-Identifier: MIT

//! The token model: categories, token maps and the full token set.
//!
//! A token is a CSS custom property (`--color-primary-500: #3b82f6`). The
//! category of a token is decided purely by its name prefix:
//!
//! | Category     | Prefixes                      |
//! |--------------|-------------------------------|
//! | `colors`     | `--color-`                    |
//! | `typography` | `--font-`, `--line-height-`   |
//! | `spacing`    | `--space-`                    |
//! | `shadows`    | `--shadow-`                   |
//! | `radii`      | `--radius-`                   |
//!
//! Anything else is not a design token and is ignored on load.

use bitflags::bitflags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Token name → CSS value, in declaration order.
pub type TokenMap = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// One of the five disjoint token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Colors,
    Typography,
    Spacing,
    Shadows,
    Radii,
}

impl Category {
    /// All categories in export order.
    pub const ALL: [Self; 5] = [
        Self::Colors,
        Self::Typography,
        Self::Spacing,
        Self::Shadows,
        Self::Radii,
    ];

    /// The serialized key of this category (`"colors"`, `"radii"`, …).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::Typography => "typography",
            Self::Spacing => "spacing",
            Self::Shadows => "shadows",
            Self::Radii => "radii",
        }
    }

    /// Variable-name prefixes that place a token in this category.
    #[must_use]
    pub const fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Colors => &["--color-"],
            Self::Typography => &["--font-", "--line-height-"],
            Self::Spacing => &["--space-"],
            Self::Shadows => &["--shadow-"],
            Self::Radii => &["--radius-"],
        }
    }

    /// Category of a variable name, or `None` if it is not a design token.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.prefixes().iter().any(|p| name.starts_with(p)))
    }

    /// Parse a category from its serialized key (case-insensitive).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key().eq_ignore_ascii_case(key))
    }

    /// This category as a single-member [`Categories`] set.
    #[must_use]
    pub const fn flag(self) -> Categories {
        match self {
            Self::Colors => Categories::COLORS,
            Self::Typography => Categories::TYPOGRAPHY,
            Self::Spacing => Categories::SPACING,
            Self::Shadows => Categories::SHADOWS,
            Self::Radii => Categories::RADII,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

bitflags! {
    /// A selection of categories, used to restrict exports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Categories: u8 {
        const COLORS = 1;
        const TYPOGRAPHY = 1 << 1;
        const SPACING = 1 << 2;
        const SHADOWS = 1 << 3;
        const RADII = 1 << 4;
    }
}

impl Categories {
    /// Whether `category` is selected.
    #[must_use]
    pub const fn includes(self, category: Category) -> bool {
        self.contains(category.flag())
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Category> for Categories {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, c| acc | c.flag())
    }
}

// ---------------------------------------------------------------------------
// TokenSet
// ---------------------------------------------------------------------------

/// The full collection of design tokens, partitioned by category.
///
/// Names are unique within a category. Order within a category is the
/// order tokens were inserted (declaration order when loaded from a
/// stylesheet); category order is always [`Category::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSet {
    pub colors: TokenMap,
    pub typography: TokenMap,
    pub spacing: TokenMap,
    pub shadows: TokenMap,
    pub radii: TokenMap,
}

impl TokenSet {
    /// An empty token set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition `(name, value)` pairs by prefix. Unknown prefixes are
    /// dropped; a repeated name keeps its first position and last value.
    #[must_use]
    pub fn from_variables<I, N, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in vars {
            set.insert(name, value);
        }
        set
    }

    /// The tokens of one category.
    #[must_use]
    pub const fn category(&self, category: Category) -> &TokenMap {
        match category {
            Category::Colors => &self.colors,
            Category::Typography => &self.typography,
            Category::Spacing => &self.spacing,
            Category::Shadows => &self.shadows,
            Category::Radii => &self.radii,
        }
    }

    /// Mutable access to the tokens of one category.
    pub const fn category_mut(&mut self, category: Category) -> &mut TokenMap {
        match category {
            Category::Colors => &mut self.colors,
            Category::Typography => &mut self.typography,
            Category::Spacing => &mut self.spacing,
            Category::Shadows => &mut self.shadows,
            Category::Radii => &mut self.radii,
        }
    }

    /// Look up a token by its full variable name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let category = Category::classify(name)?;
        self.category(category).get(name).map(String::as_str)
    }

    /// Insert a token into the category its name belongs to.
    ///
    /// Returns the category, or `None` (and stores nothing) when the name
    /// has no known prefix. Replacing an existing token keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<Category> {
        let name = name.into();
        let category = Category::classify(&name)?;
        self.category_mut(category).insert(name, value.into().trim().to_string());
        Some(category)
    }

    /// Every token as `(category, name, value)`, categories in export order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str, &str)> {
        Category::ALL.into_iter().flat_map(move |c| {
            self.category(c)
                .iter()
                .map(move |(n, v)| (c, n.as_str(), v.as_str()))
        })
    }

    /// A copy holding only the selected categories.
    #[must_use]
    pub fn filtered(&self, categories: Categories) -> Self {
        let mut out = Self::new();
        for c in Category::ALL {
            if categories.includes(c) {
                out.category_mut(c).clone_from(self.category(c));
            }
        }
        out
    }

    /// Total number of tokens across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|&c| self.category(c).len()).sum()
    }

    /// Whether every category is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&c| self.category(c).is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(Category::classify("--color-primary-500"), Some(Category::Colors));
        assert_eq!(Category::classify("--font-size-base"), Some(Category::Typography));
        assert_eq!(Category::classify("--line-height-tight"), Some(Category::Typography));
        assert_eq!(Category::classify("--space-4"), Some(Category::Spacing));
        assert_eq!(Category::classify("--shadow-md"), Some(Category::Shadows));
        assert_eq!(Category::classify("--radius-md"), Some(Category::Radii));
    }

    #[test]
    fn classify_rejects_unknown() {
        assert_eq!(Category::classify("--header-height"), None);
        assert_eq!(Category::classify("color-primary"), None);
        // `--spacing-` is not `--space-`.
        assert_eq!(Category::classify("--spacing-1"), None);
    }

    #[test]
    fn from_key_roundtrip() {
        for c in Category::ALL {
            assert_eq!(Category::from_key(c.key()), Some(c));
        }
        assert_eq!(Category::from_key("Colors"), Some(Category::Colors));
        assert_eq!(Category::from_key("borders"), None);
    }

    #[test]
    fn from_variables_partitions_and_ignores_unknown() {
        let set = TokenSet::from_variables([
            ("--color-white", "#ffffff"),
            ("--header-height", "60px"),
            ("--space-1", " 0.25rem "),
            ("--radius-md", "0.375rem"),
        ]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("--color-white"), Some("#ffffff"));
        assert_eq!(set.get("--space-1"), Some("0.25rem"));
        assert_eq!(set.get("--header-height"), None);
    }

    #[test]
    fn insert_keeps_position_on_replace() {
        let mut set = TokenSet::new();
        set.insert("--color-a", "#000");
        set.insert("--color-b", "#111");
        set.insert("--color-a", "#222");
        let names: Vec<_> = set.colors.keys().cloned().collect();
        assert_eq!(names, ["--color-a", "--color-b"]);
        assert_eq!(set.get("--color-a"), Some("#222"));
    }

    #[test]
    fn insert_unknown_prefix_is_noop() {
        let mut set = TokenSet::new();
        assert_eq!(set.insert("--z-index-modal", "100"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn iter_follows_category_order() {
        let set = TokenSet::from_variables([
            ("--radius-sm", "2px"),
            ("--color-white", "#fff"),
            ("--space-1", "4px"),
        ]);
        let cats: Vec<_> = set.iter().map(|(c, _, _)| c).collect();
        assert_eq!(cats, [Category::Colors, Category::Spacing, Category::Radii]);
    }

    #[test]
    fn filtered_keeps_only_selected() {
        let set = TokenSet::from_variables([
            ("--color-white", "#fff"),
            ("--space-1", "4px"),
            ("--shadow-sm", "none"),
        ]);
        let only: Categories = [Category::Colors, Category::Shadows].into_iter().collect();
        let out = set.filtered(only);
        assert_eq!(out.len(), 2);
        assert!(out.spacing.is_empty());
        assert_eq!(set.filtered(Categories::all()), set);
    }

    #[test]
    fn serde_shape_has_one_key_per_category() {
        let json = serde_json::to_value(TokenSet::new()).unwrap();
        let obj = json.as_object().unwrap();
        let keys: Vec<_> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, ["colors", "typography", "spacing", "shadows", "radii"]);
    }
}
