//! Edge data structures.

use serde::{Deserialize, Serialize};

use crate::effects::TraitEffect;

/// Catalog definition of an edge.
///
/// Requirements stay free text here; they are parsed once when the
/// catalog is compiled.
///
/// # Example RON
///
/// ```ron
/// EdgeData(
///     name: "Improved Block",
///     category: "Combat",
///     requirements: "Seasoned, Block",
///     description: "+1 Parry, stacking with Block.",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Unique edge name.
    pub name: String,

    /// Grouping such as "Background" or "Combat".
    #[serde(default)]
    pub category: String,

    /// Comma separated prerequisite text, e.g. "Novice, Smarts d8+".
    #[serde(default)]
    pub requirements: String,

    /// Sheet description.
    #[serde(default)]
    pub description: String,

    /// Edges or hindrances that cannot be held alongside this one.
    #[serde(default)]
    pub exclusive_with: Vec<String>,

    /// Explicit stat effects. `None` falls back to the built-in table.
    #[serde(default)]
    pub effects: Option<Vec<TraitEffect>>,
}

impl EdgeData {
    /// Create an edge with the given category and requirement text.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        requirements: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            requirements: requirements.into(),
            description: String::new(),
            exclusive_with: Vec::new(),
            effects: None,
        }
    }

    /// Declare names this edge cannot coexist with.
    #[must_use]
    pub fn with_exclusive(mut self, names: &[&str]) -> Self {
        self.exclusive_with = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Replace the built-in effects with an explicit list.
    #[must_use]
    pub fn with_effects(mut self, effects: Vec<TraitEffect>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Check if this edge declares an exclusion with `name`.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        self.exclusive_with.iter().any(|n| n == name)
    }
}
