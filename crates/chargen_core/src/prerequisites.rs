//! Selection gates for hindrances and edges.
//!
//! Checks return [`Validation`]: a legal-but-refused selection is a normal
//! answer, not an error. Only names the catalog does not define are
//! reported as [`ChargenError`].

use std::fmt;

use crate::attributes::{Attribute, DieRank};
use crate::catalog::{Catalog, CompiledEdge};
use crate::character::CharacterState;
use crate::data::{HindranceData, Severity};
use crate::error::{ChargenError, Result};
use crate::pools::{available_edges, hindrance_points_used, minor_hindrance_points_used};
use crate::requirements::{is_family_member, Rank, Requirement};

/// Why a selection was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The hindrance is already held.
    AlreadySelected {
        /// Hindrance name.
        name: String,
    },
    /// Taking it would pass the global hindrance cap.
    HindranceCapExceeded {
        /// Points already taken.
        used: u32,
        /// Points this hindrance adds.
        adding: u32,
        /// Cap.
        cap: u32,
    },
    /// Taking it would pass the minor hindrance sub-cap.
    MinorCapExceeded {
        /// Minor points already taken.
        used: u32,
        /// Points this hindrance adds.
        adding: u32,
        /// Sub-cap.
        cap: u32,
    },
    /// Every edge slot is filled.
    NoEdgeSlots {
        /// Edges selected.
        used: u32,
        /// Slots available.
        total: u32,
    },
    /// The edge needs a higher advancement rank.
    RankTooLow {
        /// Rank required.
        required: Rank,
    },
    /// An attribute is too low.
    AttributeTooLow {
        /// Attribute checked.
        attribute: Attribute,
        /// Die required.
        required: DieRank,
        /// Die held.
        actual: DieRank,
    },
    /// A skill is too low.
    SkillTooLow {
        /// Skill checked.
        skill: String,
        /// Die required.
        required: DieRank,
        /// Die held.
        actual: DieRank,
    },
    /// A prerequisite edge is missing.
    MissingEdge {
        /// Edge required.
        name: String,
    },
    /// No member of a prerequisite edge family is held.
    MissingEdgeFamily {
        /// Family prefix.
        prefix: String,
    },
    /// None of the listed alternatives holds.
    NoAlternativeMet {
        /// The alternatives as written.
        options: String,
    },
    /// A selected edge or hindrance excludes this one.
    ConflictsWith {
        /// The conflicting selection.
        name: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySelected { name } => write!(f, "{name} is already selected"),
            Self::HindranceCapExceeded { used, adding, cap } => write!(
                f,
                "Hindrance points would exceed the cap ({used} + {adding} > {cap})"
            ),
            Self::MinorCapExceeded { used, adding, cap } => write!(
                f,
                "Minor hindrance points would exceed the cap ({used} + {adding} > {cap})"
            ),
            Self::NoEdgeSlots { used, total } => {
                write!(f, "No edge slots remaining ({used} of {total} used)")
            }
            Self::RankTooLow { required } => {
                write!(f, "Requires {required} rank (character is {})", Rank::CREATION)
            }
            Self::AttributeTooLow {
                attribute,
                required,
                actual,
            } => write!(f, "Requires {attribute} {required}+ (has {actual})"),
            Self::SkillTooLow {
                skill,
                required,
                actual,
            } => write!(f, "Requires {skill} {required}+ (has {actual})"),
            Self::MissingEdge { name } => write!(f, "Requires the {name} edge"),
            Self::MissingEdgeFamily { prefix } => write!(f, "Requires any {prefix} edge"),
            Self::NoAlternativeMet { options } => write!(f, "Requires {options}"),
            Self::ConflictsWith { name } => write!(f, "Conflicts with {name}"),
        }
    }
}

/// Outcome of a selection check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The selection may be made.
    Valid,
    /// The selection is refused.
    Invalid(Rejection),
}

impl Validation {
    /// Whether the selection may be made.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The refusal, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Valid => None,
            Self::Invalid(rejection) => Some(rejection),
        }
    }

    /// Human-readable refusal reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.rejection().map(ToString::to_string)
    }
}

impl From<std::result::Result<(), Rejection>> for Validation {
    fn from(result: std::result::Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(rejection) => Self::Invalid(rejection),
        }
    }
}

/// Whether a hindrance may be taken.
///
/// # Errors
///
/// Returns [`ChargenError::UnknownHindrance`] for names the catalog lacks.
pub fn check_hindrance(
    character: &CharacterState,
    catalog: &Catalog,
    name: &str,
) -> Result<Validation> {
    let data = catalog
        .hindrance(name)
        .ok_or_else(|| ChargenError::UnknownHindrance(name.to_string()))?;
    Ok(hindrance_verdict(character, catalog, data))
}

/// [`check_hindrance`] reduced to a yes/no.
///
/// # Errors
///
/// Returns [`ChargenError::UnknownHindrance`] for names the catalog lacks.
pub fn can_select_hindrance(
    character: &CharacterState,
    catalog: &Catalog,
    name: &str,
) -> Result<bool> {
    check_hindrance(character, catalog, name).map(|v| v.is_valid())
}

pub(crate) fn hindrance_verdict(
    character: &CharacterState,
    catalog: &Catalog,
    data: &HindranceData,
) -> Validation {
    let rules = catalog.rules();
    let adding = data.points();

    if character.has_hindrance(&data.name) {
        return Validation::Invalid(Rejection::AlreadySelected {
            name: data.name.clone(),
        });
    }

    let used = hindrance_points_used(character);
    if used + adding > rules.hindrance_point_cap {
        return Validation::Invalid(Rejection::HindranceCapExceeded {
            used,
            adding,
            cap: rules.hindrance_point_cap,
        });
    }

    if data.severity == Severity::Minor {
        let minor_used = minor_hindrance_points_used(character);
        if minor_used + adding > rules.minor_hindrance_cap {
            return Validation::Invalid(Rejection::MinorCapExceeded {
                used: minor_used,
                adding,
                cap: rules.minor_hindrance_cap,
            });
        }
    }

    check_exclusions(character, catalog, &data.name).into()
}

/// Whether an edge may be taken.
///
/// Checks short-circuit in order: a free slot (skipped if the edge is
/// already held), then each requirement, then exclusions.
///
/// # Errors
///
/// Returns [`ChargenError::UnknownEdge`] for names the catalog lacks.
pub fn can_select_edge(
    character: &CharacterState,
    catalog: &Catalog,
    name: &str,
) -> Result<Validation> {
    let edge = catalog
        .edge(name)
        .ok_or_else(|| ChargenError::UnknownEdge(name.to_string()))?;

    if !character.has_edge(name) {
        let slots = available_edges(character, catalog);
        if slots.remaining == 0 {
            return Ok(Validation::Invalid(Rejection::NoEdgeSlots {
                used: slots.used,
                total: slots.total,
            }));
        }
    }

    for requirement in &edge.requirements {
        if let Err(rejection) = check_requirement(requirement, character) {
            return Ok(Validation::Invalid(rejection));
        }
    }

    Ok(check_exclusions(character, catalog, name).into())
}

/// Requirements of a selected edge that the character no longer meets.
#[must_use]
pub fn unmet_requirements(character: &CharacterState, edge: &CompiledEdge) -> Vec<Rejection> {
    edge.requirements
        .iter()
        .filter_map(|requirement| check_requirement(requirement, character).err())
        .collect()
}

/// Test one requirement against the character.
///
/// # Errors
///
/// Returns the [`Rejection`] describing the shortfall.
pub fn check_requirement(
    requirement: &Requirement,
    character: &CharacterState,
) -> std::result::Result<(), Rejection> {
    match requirement {
        Requirement::RankAtLeast(required) => {
            if Rank::CREATION >= *required {
                Ok(())
            } else {
                Err(Rejection::RankTooLow {
                    required: *required,
                })
            }
        }
        Requirement::AttributeAtLeast { attribute, rank } => {
            let actual = character.attribute(*attribute);
            if actual >= *rank {
                Ok(())
            } else {
                Err(Rejection::AttributeTooLow {
                    attribute: *attribute,
                    required: *rank,
                    actual,
                })
            }
        }
        Requirement::SkillAtLeast { skill, rank } => {
            let actual = character.skill_rank(skill);
            if actual >= *rank {
                Ok(())
            } else {
                Err(Rejection::SkillTooLow {
                    skill: skill.clone(),
                    required: *rank,
                    actual,
                })
            }
        }
        Requirement::HasEdge { name } => {
            if character.has_edge(name) {
                Ok(())
            } else {
                Err(Rejection::MissingEdge { name: name.clone() })
            }
        }
        Requirement::HasEdgeFamily { prefix } => {
            if character.edges().iter().any(|e| is_family_member(e, prefix)) {
                Ok(())
            } else {
                Err(Rejection::MissingEdgeFamily {
                    prefix: prefix.clone(),
                })
            }
        }
        Requirement::AnyOf(options) => {
            if options
                .iter()
                .any(|option| check_requirement(option, character).is_ok())
            {
                Ok(())
            } else {
                Err(Rejection::NoAlternativeMet {
                    options: requirement.to_string(),
                })
            }
        }
        Requirement::Unrecognized(text) => {
            tracing::trace!(requirement = %text, "Ignoring unrecognized requirement");
            Ok(())
        }
    }
}

fn check_exclusions(
    character: &CharacterState,
    catalog: &Catalog,
    name: &str,
) -> std::result::Result<(), Rejection> {
    match catalog
        .exclusions()
        .partners_of(name)
        .find(|partner| character.has_trait(partner))
    {
        Some(partner) => Err(Rejection::ConflictsWith {
            name: partner.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AncestryData, CatalogData, EdgeData, SkillData};

    fn create_test_catalog() -> Catalog {
        Catalog::compile(CatalogData {
            skills: vec![
                SkillData::new("Fighting", Attribute::Agility),
                SkillData::new("Shooting", Attribute::Agility),
            ],
            hindrances: vec![
                HindranceData::new("Bad Luck", Severity::Major),
                HindranceData::new("Loyal", Severity::Minor),
                HindranceData::new("Curious", Severity::Minor),
                HindranceData::new("Quirk", Severity::Minor),
                HindranceData::new("Wanted", Severity::Major),
                HindranceData::new("Enemy", Severity::Major),
            ],
            edges: vec![
                EdgeData::new("Luck", "Background", "Novice").with_exclusive(&["Bad Luck"]),
                EdgeData::new("Great Luck", "Background", "Novice, Luck"),
                EdgeData::new("Scholar", "Background", "Novice, Smarts d8+"),
                EdgeData::new("Block", "Combat", "Seasoned, Fighting d8+"),
                EdgeData::new("Marksman", "Combat", "Novice, Fighting d8+ or Shooting d8+"),
                EdgeData::new("Arcane Background (Magic)", "Background", "Novice"),
                EdgeData::new("Wizard", "Power", "Novice, Arcane Background (Any)"),
                EdgeData::new("Strange", "Weird", "Novice, Wild Card"),
                EdgeData::new("Steady Hands", "Combat", "Seasoned Rank, Smarts d6+"),
                EdgeData::new("Hardened", "Combat", "Veteran rank"),
            ],
            ancestries: vec![AncestryData::new("Human").with_grants(0, 5)],
            ..CatalogData::default()
        })
        .unwrap()
    }

    #[test]
    fn test_unknown_names_are_errors() {
        let catalog = create_test_catalog();
        let character = catalog.new_character();
        assert!(check_hindrance(&character, &catalog, "Cursed").is_err());
        assert!(can_select_edge(&character, &catalog, "Flight").is_err());
    }

    #[test]
    fn test_minor_sub_cap() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character.select_hindrance(&catalog, "Loyal").unwrap();
        character.select_hindrance(&catalog, "Curious").unwrap();

        let verdict = check_hindrance(&character, &catalog, "Quirk").unwrap();
        assert!(matches!(
            verdict,
            Validation::Invalid(Rejection::MinorCapExceeded { used: 2, .. })
        ));
        assert!(can_select_hindrance(&character, &catalog, "Wanted").unwrap());
    }

    #[test]
    fn test_global_cap() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character.select_hindrance(&catalog, "Wanted").unwrap();
        character.select_hindrance(&catalog, "Enemy").unwrap();
        let verdict = check_hindrance(&character, &catalog, "Loyal").unwrap();
        assert!(matches!(
            verdict,
            Validation::Invalid(Rejection::HindranceCapExceeded { used: 4, .. })
        ));
    }

    #[test]
    fn test_already_selected_hindrance() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character.select_hindrance(&catalog, "Loyal").unwrap();
        assert!(!can_select_hindrance(&character, &catalog, "Loyal").unwrap());
    }

    #[test]
    fn test_attribute_requirement() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        let verdict = can_select_edge(&character, &catalog, "Scholar").unwrap();
        assert!(matches!(
            verdict,
            Validation::Invalid(Rejection::AttributeTooLow { .. })
        ));
        assert_eq!(verdict.reason().unwrap(), "Requires Smarts d8+ (has d4)");

        character
            .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D8)
            .unwrap();
        assert!(can_select_edge(&character, &catalog, "Scholar").unwrap().is_valid());
    }

    #[test]
    fn test_rank_above_novice_fails() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character.set_skill(&catalog, "Fighting", DieRank::D12).unwrap();
        let verdict = can_select_edge(&character, &catalog, "Block").unwrap();
        assert_eq!(
            verdict,
            Validation::Invalid(Rejection::RankTooLow {
                required: Rank::Seasoned
            })
        );
    }

    #[test]
    fn test_phrased_rank_fails_at_creation() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character
            .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D6)
            .unwrap();
        assert_eq!(
            can_select_edge(&character, &catalog, "Steady Hands").unwrap(),
            Validation::Invalid(Rejection::RankTooLow {
                required: Rank::Seasoned
            })
        );
        assert_eq!(
            can_select_edge(&character, &catalog, "Hardened").unwrap(),
            Validation::Invalid(Rejection::RankTooLow {
                required: Rank::Veteran
            })
        );
    }

    #[test]
    fn test_alternatives() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        assert!(!can_select_edge(&character, &catalog, "Marksman").unwrap().is_valid());
        character.set_skill(&catalog, "Shooting", DieRank::D8).unwrap();
        assert!(can_select_edge(&character, &catalog, "Marksman").unwrap().is_valid());
    }

    #[test]
    fn test_edge_dependency_and_family() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        assert!(!can_select_edge(&character, &catalog, "Great Luck").unwrap().is_valid());
        assert!(!can_select_edge(&character, &catalog, "Wizard").unwrap().is_valid());

        character.select_edge(&catalog, "Luck").unwrap();
        character
            .select_edge(&catalog, "Arcane Background (Magic)")
            .unwrap();
        assert!(can_select_edge(&character, &catalog, "Great Luck").unwrap().is_valid());
        assert!(can_select_edge(&character, &catalog, "Wizard").unwrap().is_valid());
    }

    #[test]
    fn test_exclusion_both_directions() {
        let catalog = create_test_catalog();

        let mut lucky = catalog.new_character();
        lucky.select_edge(&catalog, "Luck").unwrap();
        assert_eq!(
            check_hindrance(&lucky, &catalog, "Bad Luck").unwrap(),
            Validation::Invalid(Rejection::ConflictsWith {
                name: "Luck".to_string()
            })
        );

        let mut unlucky = catalog.new_character();
        unlucky.select_hindrance(&catalog, "Bad Luck").unwrap();
        assert_eq!(
            can_select_edge(&unlucky, &catalog, "Luck").unwrap(),
            Validation::Invalid(Rejection::ConflictsWith {
                name: "Bad Luck".to_string()
            })
        );
    }

    #[test]
    fn test_unrecognized_requirement_never_blocks() {
        let catalog = create_test_catalog();
        let character = catalog.new_character();
        assert!(can_select_edge(&character, &catalog, "Strange").unwrap().is_valid());
    }

    #[test]
    fn test_no_slots() {
        let catalog = Catalog::compile(CatalogData {
            edges: vec![
                EdgeData::new("Alertness", "Background", "Novice"),
                EdgeData::new("Brave", "Background", "Novice"),
            ],
            ..CatalogData::default()
        })
        .unwrap();
        let mut character = catalog.new_character();
        character.select_edge(&catalog, "Alertness").unwrap();

        assert_eq!(
            can_select_edge(&character, &catalog, "Brave").unwrap(),
            Validation::Invalid(Rejection::NoEdgeSlots { used: 1, total: 1 })
        );
        // A held edge does not need a free slot.
        assert!(can_select_edge(&character, &catalog, "Alertness").unwrap().is_valid());
    }

    #[test]
    fn test_unmet_requirements_after_drift() {
        let catalog = create_test_catalog();
        let mut character = catalog.new_character();
        character
            .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D8)
            .unwrap();
        character.select_edge(&catalog, "Scholar").unwrap();
        character
            .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D6)
            .unwrap();

        let edge = catalog.edge("Scholar").unwrap();
        assert_eq!(unmet_requirements(&character, edge).len(), 1);
        assert!(character.has_edge("Scholar"));
    }
}
