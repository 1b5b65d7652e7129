// SPDX-License-Identifier: MIT

//! The ambient style environment: where tokens are read from and written to.
//!
//! The environment is a flat key-value scope of custom properties. Reading
//! takes a snapshot ([`load_from`]); nothing holds a live binding to it.

use indexmap::IndexMap;

use crate::token::TokenSet;

/// A scope of CSS custom properties.
pub trait StyleEnvironment {
    /// Every currently effective custom property, values trimmed, in
    /// declaration order.
    fn variables(&self) -> Vec<(String, String)>;

    /// Set one property's value, taking precedence over declared values.
    fn set_variable(&mut self, name: &str, value: &str);
}

/// Snapshot the environment into a [`TokenSet`].
///
/// Variables whose names carry no token prefix are ignored.
pub fn load_from<E: StyleEnvironment + ?Sized>(env: &E) -> TokenSet {
    TokenSet::from_variables(env.variables())
}

/// An ordered in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnvironment {
    vars: IndexMap<String, String>,
}

impl MemoryEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value of `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for MemoryEnvironment {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (name, value) in iter {
            env.vars.insert(name.into(), value.into().trim().to_string());
        }
        env
    }
}

impl StyleEnvironment for MemoryEnvironment {
    fn variables(&self) -> Vec<(String, String)> {
        self.vars.iter().map(|(n, v)| (n.clone(), v.clone())).collect()
    }

    fn set_variable(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Category;

    #[test]
    fn load_from_partitions_snapshot() {
        let env: MemoryEnvironment = [
            ("--color-primary-500", "#3b82f6"),
            ("--font-size-base", "1rem"),
            ("--header-height", "64px"),
        ]
        .into_iter()
        .collect();

        let set = load_from(&env);
        assert_eq!(set.len(), 2);
        assert_eq!(set.category(Category::Typography).get("--font-size-base").map(String::as_str), Some("1rem"));
    }

    #[test]
    fn set_variable_overwrites_in_place() {
        let mut env: MemoryEnvironment = [("--space-1", "4px"), ("--space-2", "8px")].into_iter().collect();
        env.set_variable("--space-1", " 2px ");
        assert_eq!(env.get("--space-1"), Some("2px"));
        assert_eq!(env.variables()[0].0, "--space-1");
    }

    #[test]
    fn snapshot_is_not_live() {
        let mut env: MemoryEnvironment = [("--radius-md", "6px")].into_iter().collect();
        let set = load_from(&env);
        env.set_variable("--radius-md", "0");
        assert_eq!(set.get("--radius-md"), Some("6px"));
    }

    #[test]
    fn works_through_trait_object() {
        let env: Box<dyn StyleEnvironment> = Box::new(MemoryEnvironment::from_iter([("--shadow-sm", "none")]));
        assert_eq!(load_from(env.as_ref()).len(), 1);
    }
}
