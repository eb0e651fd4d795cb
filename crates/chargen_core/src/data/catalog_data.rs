//! Catalog data structure combining all ruleset reference data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ancestry_data::AncestryData;
use super::edge_data::EdgeData;
use super::hindrance_data::HindranceData;
use super::rules_data::GameRules;
use super::skill_data::SkillData;
use crate::attributes::Attribute;
use crate::requirements::{parse_requirements, Requirement};

/// Complete, uncompiled catalog.
///
/// Loaded by the host (typically from a RON file) and handed to
/// [`Catalog::compile`](crate::catalog::Catalog::compile).
///
/// # Example RON
///
/// ```ron
/// CatalogData(
///     rules: GameRules(),
///     default_ancestry: "Human",
///     skills: [...],
///     hindrances: [...],
///     edges: [...],
///     ancestries: [...],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogData {
    /// Global budgets and baselines.
    #[serde(default)]
    pub rules: GameRules,

    /// Ancestry given to freshly created characters.
    #[serde(default = "default_ancestry")]
    pub default_ancestry: String,

    /// Standard skills.
    #[serde(default)]
    pub skills: Vec<SkillData>,

    /// Selectable hindrances.
    #[serde(default)]
    pub hindrances: Vec<HindranceData>,

    /// Selectable edges.
    #[serde(default)]
    pub edges: Vec<EdgeData>,

    /// Available ancestries. Omitted, a single default ancestry with one
    /// free edge slot is supplied.
    #[serde(default = "default_ancestries")]
    pub ancestries: Vec<AncestryData>,
}

fn default_ancestry() -> String {
    "Human".to_string()
}

fn default_ancestries() -> Vec<AncestryData> {
    vec![AncestryData::new(default_ancestry()).with_grants(0, 1)]
}

impl Default for CatalogData {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            default_ancestry: default_ancestry(),
            skills: Vec::new(),
            hindrances: Vec::new(),
            edges: Vec::new(),
            ancestries: default_ancestries(),
        }
    }
}

impl CatalogData {
    /// Find a skill by name.
    #[must_use]
    pub fn get_skill(&self, name: &str) -> Option<&SkillData> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Find a hindrance by name.
    #[must_use]
    pub fn get_hindrance(&self, name: &str) -> Option<&HindranceData> {
        self.hindrances.iter().find(|h| h.name == name)
    }

    /// Find an edge by name.
    #[must_use]
    pub fn get_edge(&self, name: &str) -> Option<&EdgeData> {
        self.edges.iter().find(|e| e.name == name)
    }

    /// Find an ancestry by name.
    #[must_use]
    pub fn get_ancestry(&self, name: &str) -> Option<&AncestryData> {
        self.ancestries.iter().find(|a| a.name == name)
    }

    /// Whether `name` is a hindrance or an edge.
    #[must_use]
    pub fn has_trait_named(&self, name: &str) -> bool {
        self.get_hindrance(name).is_some() || self.get_edge(name).is_some()
    }

    /// Validate internal consistency of the catalog.
    ///
    /// Checks for:
    /// - Malformed rules (rank sequence, caps)
    /// - Duplicate names within each entity kind
    /// - A default ancestry that exists
    /// - Exclusions naming unknown edges or hindrances
    /// - Edge requirements naming unknown skills, edges or families
    ///
    /// Returns a list of validation errors.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.rules.validate();

        check_duplicates("skill", self.skills.iter().map(|s| &s.name), &mut errors);
        check_duplicates(
            "hindrance",
            self.hindrances.iter().map(|h| &h.name),
            &mut errors,
        );
        check_duplicates("edge", self.edges.iter().map(|e| &e.name), &mut errors);
        check_duplicates(
            "ancestry",
            self.ancestries.iter().map(|a| &a.name),
            &mut errors,
        );

        if self.get_ancestry(&self.default_ancestry).is_none() {
            errors.push(format!(
                "Default ancestry '{}' not found",
                self.default_ancestry
            ));
        }

        for skill in &self.skills {
            if Attribute::from_name(&skill.name).is_some() {
                errors.push(format!(
                    "Skill '{}' shadows an attribute name",
                    skill.name
                ));
            }
        }

        for hindrance in &self.hindrances {
            for other in &hindrance.exclusive_with {
                if !self.has_trait_named(other) {
                    errors.push(format!(
                        "Hindrance '{}' is exclusive with unknown trait '{}'",
                        hindrance.name, other
                    ));
                }
            }
        }

        let edge_names: Vec<&str> = self.edges.iter().map(|e| e.name.as_str()).collect();
        for edge in &self.edges {
            for other in &edge.exclusive_with {
                if !self.has_trait_named(other) {
                    errors.push(format!(
                        "Edge '{}' is exclusive with unknown trait '{}'",
                        edge.name, other
                    ));
                }
            }

            for requirement in parse_requirements(&edge.requirements, &edge_names) {
                self.check_requirement(&edge.name, &requirement, &mut errors);
            }
        }

        errors
    }

    fn check_requirement(&self, edge: &str, requirement: &Requirement, errors: &mut Vec<String>) {
        match requirement {
            Requirement::SkillAtLeast { skill, .. } => {
                if self.get_skill(skill).is_none() {
                    errors.push(format!("Edge '{edge}' requires unknown skill '{skill}'"));
                }
            }
            Requirement::HasEdgeFamily { prefix } => {
                let any = self
                    .edges
                    .iter()
                    .any(|e| crate::requirements::is_family_member(&e.name, prefix));
                if !any {
                    errors.push(format!(
                        "Edge '{edge}' requires unknown edge family '{prefix}'"
                    ));
                }
            }
            Requirement::HasEdge { name } if name == edge => {
                errors.push(format!("Edge '{edge}' requires itself"));
            }
            Requirement::AnyOf(options) => {
                for option in options {
                    self.check_requirement(edge, option, errors);
                }
            }
            Requirement::Unrecognized(text) => {
                errors.push(format!(
                    "Edge '{edge}' has unrecognized requirement '{text}'"
                ));
            }
            Requirement::RankAtLeast(_)
            | Requirement::AttributeAtLeast { .. }
            | Requirement::HasEdge { .. } => {}
        }
    }
}

fn check_duplicates<'a>(
    kind: &str,
    names: impl Iterator<Item = &'a String>,
    errors: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            errors.push(format!("Duplicate {kind} '{name}'"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Severity;

    fn create_test_catalog_data() -> CatalogData {
        CatalogData {
            skills: vec![
                SkillData::new("Fighting", Attribute::Agility),
                SkillData::new("Notice", Attribute::Smarts).core(),
            ],
            hindrances: vec![
                HindranceData::new("Bad Luck", Severity::Major).with_exclusive(&["Luck"])
            ],
            edges: vec![
                EdgeData::new("Luck", "Background", "Novice"),
                EdgeData::new("Alertness", "Background", "Novice, Notice d6+"),
            ],
            ..CatalogData::default()
        }
    }

    #[test]
    fn test_lookups() {
        let data = create_test_catalog_data();
        assert!(data.get_skill("Fighting").is_some());
        assert!(data.get_edge("Luck").is_some());
        assert!(data.get_hindrance("Bad Luck").is_some());
        assert!(data.get_ancestry("Human").is_some());
        assert!(data.get_edge("Unknown").is_none());
    }

    #[test]
    fn test_validate_valid_data() {
        let data = create_test_catalog_data();
        let errors = data.validate();
        assert!(errors.is_empty(), "Errors: {:?}", errors);
    }

    #[test]
    fn test_validate_unknown_exclusion() {
        let mut data = create_test_catalog_data();
        data.edges[0].exclusive_with.push("Nonexistent".to_string());
        let errors = data.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown trait 'Nonexistent'"));
    }

    #[test]
    fn test_validate_unknown_requirement_skill() {
        let mut data = create_test_catalog_data();
        data.edges[1].requirements = "Novice, Hacking d6+".to_string();
        let errors = data.validate();
        assert!(errors.iter().any(|e| e.contains("unknown skill 'Hacking'")));
    }

    #[test]
    fn test_validate_duplicates_and_default_ancestry() {
        let mut data = create_test_catalog_data();
        data.skills.push(SkillData::new("Fighting", Attribute::Strength));
        data.default_ancestry = "Elf".to_string();
        let errors = data.validate();
        assert!(errors.iter().any(|e| e.contains("Duplicate skill 'Fighting'")));
        assert!(errors.iter().any(|e| e.contains("Default ancestry 'Elf'")));
    }
}
