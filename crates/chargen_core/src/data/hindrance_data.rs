//! Hindrance data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effects::TraitEffect;

/// How severe a hindrance is, which fixes its point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Worth 1 hindrance point.
    Minor,
    /// Worth 2 hindrance points.
    Major,
}

impl Severity {
    /// Hindrance points this severity is worth.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Minor => 1,
            Self::Major => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => f.write_str("Minor"),
            Self::Major => f.write_str("Major"),
        }
    }
}

/// Catalog definition of a hindrance.
///
/// # Example RON
///
/// ```ron
/// HindranceData(
///     name: "Bad Luck",
///     severity: Major,
///     description: "One fewer Benny per session.",
///     exclusive_with: ["Luck"],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HindranceData {
    /// Unique hindrance name.
    pub name: String,

    /// Minor or major.
    pub severity: Severity,

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

impl HindranceData {
    /// Create a hindrance with no exclusions and default effects.
    #[must_use]
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
            description: String::new(),
            exclusive_with: Vec::new(),
            effects: None,
        }
    }

    /// Declare names this hindrance cannot coexist with.
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

    /// Hindrance points this entry is worth.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.severity.points()
    }

    /// Check if this hindrance declares an exclusion with `name`.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        self.exclusive_with.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_points() {
        assert_eq!(Severity::Minor.points(), 1);
        assert_eq!(Severity::Major.points(), 2);
        assert_eq!(HindranceData::new("Loyal", Severity::Minor).points(), 1);
    }

    #[test]
    fn test_excludes() {
        let hindrance = HindranceData::new("Bad Luck", Severity::Major).with_exclusive(&["Luck"]);
        assert!(hindrance.excludes("Luck"));
        assert!(!hindrance.excludes("Great Luck"));
    }
}
