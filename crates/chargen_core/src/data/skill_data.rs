//! Skill data structures.

use serde::{Deserialize, Serialize};

use crate::attributes::Attribute;

/// Catalog definition of a standard skill.
///
/// # Example RON
///
/// ```ron
/// SkillData(
///     name: "Fighting",
///     linked_attribute: Agility,
///     description: "Skill in armed and unarmed combat.",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillData {
    /// Unique skill name.
    pub name: String,

    /// Attribute whose rank sets the cheap/expensive cost threshold.
    pub linked_attribute: Attribute,

    /// Sheet description.
    #[serde(default)]
    pub description: String,

    /// Whether this is a core skill every character is expected to have.
    #[serde(default)]
    pub core: bool,
}

impl SkillData {
    /// Create a skill with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>, linked_attribute: Attribute) -> Self {
        Self {
            name: name.into(),
            linked_attribute,
            description: String::new(),
            core: false,
        }
    }

    /// Mark this skill as a core skill.
    #[must_use]
    pub fn core(mut self) -> Self {
        self.core = true;
        self
    }
}
