//! Whole-character validation.
//!
//! Mutations keep a character structurally sound but let it go over
//! budget, and edge requirements are only checked at selection time. This
//! report is where both kinds of drift surface.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::character::CharacterState;
use crate::pools::summarize;
use crate::prerequisites::unmet_requirements;

/// Problems found on a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterReport {
    /// Rule violations; the character is not finished while any remain.
    pub errors: Vec<String>,
    /// Legal but noteworthy conditions.
    pub warnings: Vec<String>,
}

impl CharacterReport {
    /// Whether the character has no errors. Warnings do not count.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a character against the catalog.
#[must_use]
pub fn validate_character(character: &CharacterState, catalog: &Catalog) -> CharacterReport {
    let mut report = CharacterReport::default();
    let rules = catalog.rules();

    // Ranks and names
    for (attribute, rank) in character.attributes().iter() {
        if !rules.is_attribute_rank(rank) {
            report
                .errors
                .push(format!("{attribute} has invalid rank {}", rank.value()));
        }
    }
    for (skill, rank) in character.skills() {
        if !rules.is_skill_rank(*rank) {
            report
                .errors
                .push(format!("Skill '{skill}' has invalid rank {}", rank.value()));
        }
        match character.resolve_skill(catalog, skill) {
            None => report.errors.push(format!("Unknown skill '{skill}'")),
            Some(linked) => {
                let attribute_rank = character.attribute(linked);
                if *rank > attribute_rank {
                    report.warnings.push(format!(
                        "{skill} {rank} is above {linked} {attribute_rank}"
                    ));
                }
            }
        }
    }
    if catalog.ancestry(character.ancestry()).is_none() {
        report
            .errors
            .push(format!("Unknown ancestry '{}'", character.ancestry()));
    }
    for name in character.hindrances().keys() {
        if catalog.hindrance(name).is_none() {
            report.errors.push(format!("Unknown hindrance '{name}'"));
        }
    }

    // Budgets
    let pools = summarize(character, catalog);
    if pools.attributes.is_overspent() {
        report.errors.push(format!(
            "Attribute points overspent by {}",
            pools.attributes.overage()
        ));
    } else if pools.attributes.remaining > 0 {
        report.warnings.push(format!(
            "{} attribute points unspent",
            pools.attributes.remaining
        ));
    }
    if pools.skills.is_overspent() {
        report
            .errors
            .push(format!("Skill points overspent by {}", pools.skills.overage()));
    } else if pools.skills.remaining > 0 {
        report
            .warnings
            .push(format!("{} skill points unspent", pools.skills.remaining));
    }
    if pools.edges.is_overspent() {
        report.errors.push(format!(
            "{} edges selected but only {} slots available",
            pools.edges.used, pools.edges.total
        ));
    } else if pools.edges.remaining > 0 {
        report
            .warnings
            .push(format!("{} edge slots unused", pools.edges.remaining));
    }
    let hindrances = pools.hindrances;
    if hindrances.used > hindrances.cap {
        report.errors.push(format!(
            "Hindrance points {} exceed the cap of {}",
            hindrances.used, hindrances.cap
        ));
    }
    if hindrances.minor_used > hindrances.minor_cap {
        report.errors.push(format!(
            "Minor hindrance points {} exceed the cap of {}",
            hindrances.minor_used, hindrances.minor_cap
        ));
    }

    // Edges: existence and requirement drift
    for name in character.edges() {
        match catalog.edge(name) {
            None => report.errors.push(format!("Unknown edge '{name}'")),
            Some(edge) => {
                for rejection in unmet_requirements(character, edge) {
                    report
                        .warnings
                        .push(format!("{name} no longer qualifies: {rejection}"));
                }
            }
        }
    }

    // Conflicts, each pair once
    let selected = character
        .hindrances()
        .keys()
        .chain(character.edges().iter());
    for name in selected {
        for partner in catalog.exclusions().partners_of(name) {
            if name.as_str() < partner && character.has_trait(partner) {
                report
                    .errors
                    .push(format!("{name} conflicts with {partner}"));
            }
        }
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Character validated"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, DieRank};
    use crate::data::{CatalogData, EdgeData, HindranceData, Severity, SkillData};

    fn create_test_catalog() -> Catalog {
        Catalog::compile(CatalogData {
            skills: vec![SkillData::new("Research", Attribute::Smarts)],
            hindrances: vec![HindranceData::new("Bad Luck", Severity::Major)],
            edges: vec![
                EdgeData::new("Luck", "Background", "Novice").with_exclusive(&["Bad Luck"]),
                EdgeData::new("Scholar", "Background", "Novice, Smarts d8+"),
            ],
            ..CatalogData::default()
        })
        .unwrap()
    }

    #[test]
    fn test_fresh_character_only_warns() {
        let catalog = create_test_catalog();
        let report = validate_character(&catalog.new_character(), &catalog);
        assert!(report.is_valid(), "Errors: {:?}", report.errors);
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_overspent_attributes() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        for attribute in Attribute::ALL {
            character
                .set_attribute(catalog.rules(), attribute, DieRank::D8)
                .unwrap();
        }
        let report = validate_character(&character, &catalog);
        assert!(report
            .errors
            .iter()
            .any(|e| e == "Attribute points overspent by 5"));
    }

    #[test]
    fn test_requirement_drift_is_a_warning() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character
            .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D8)
            .unwrap();
        character.select_edge(&catalog, "Scholar").unwrap();
        character
            .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D4)
            .unwrap();

        let report = validate_character(&character, &catalog);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("Scholar no longer qualifies")));
    }

    #[test]
    fn test_skill_above_attribute_warns() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character.set_skill(&catalog, "Research", DieRank::D6).unwrap();
        let report = validate_character(&character, &catalog);
        assert!(report
            .warnings
            .iter()
            .any(|w| w == "Research d6 is above Smarts d4"));
    }

    #[test]
    fn test_unknown_ancestry_is_error() {
        let catalog = create_test_catalog();
        let character = CharacterState::with_rules(catalog.rules(), "Atlantean");
        let report = validate_character(&character, &catalog);
        assert!(report
            .errors
            .contains(&"Unknown ancestry 'Atlantean'".to_string()));
    }
}
