//! Ancestry data structures.

use serde::{Deserialize, Serialize};

/// Catalog definition of an ancestry.
///
/// # Example RON
///
/// ```ron
/// AncestryData(
///     name: "Human",
///     traits: ["Adaptable"],
///     bonus_edges: 1,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestryData {
    /// Unique ancestry name.
    pub name: String,

    /// Sheet description.
    #[serde(default)]
    pub description: String,

    /// Free-form trait tags such as "Slow", "Small" or "Armor +2".
    #[serde(default)]
    pub traits: Vec<String>,

    /// Extra skill points granted at creation.
    #[serde(default)]
    pub bonus_skill_points: u32,

    /// Edge slots granted at creation.
    #[serde(default)]
    pub bonus_edges: u32,
}

impl AncestryData {
    /// Create an ancestry with no traits or grants.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            traits: Vec::new(),
            bonus_skill_points: 0,
            bonus_edges: 0,
        }
    }

    /// Set the trait tags.
    #[must_use]
    pub fn with_traits(mut self, traits: &[&str]) -> Self {
        self.traits = traits.iter().map(|t| (*t).to_string()).collect();
        self
    }

    /// Set the creation grants.
    #[must_use]
    pub fn with_grants(mut self, bonus_skill_points: u32, bonus_edges: u32) -> Self {
        self.bonus_skill_points = bonus_skill_points;
        self.bonus_edges = bonus_edges;
        self
    }

    /// Check if this ancestry carries a trait tag.
    #[must_use]
    pub fn has_trait(&self, tag: &str) -> bool {
        self.traits.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
