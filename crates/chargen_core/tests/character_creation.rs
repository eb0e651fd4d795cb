//! End-to-end character creation against the standard catalog.

use chargen_core::prelude::*;
use chargen_test_utils::fixtures::{fighter, scholar, standard_catalog};
use chargen_test_utils::round_trip::verify_round_trip;

// ==========================================================================
// Derived stats
// ==========================================================================

#[test]
fn test_toughness_with_small_and_brawny() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    let rules = catalog.rules().clone();
    character
        .set_attribute(&rules, Attribute::Vigor, DieRank::D6)
        .unwrap();
    character
        .set_attribute(&rules, Attribute::Strength, DieRank::D6)
        .unwrap();
    assert_eq!(derive_stats(&character, &catalog).toughness, 5);

    assert!(character.select_hindrance(&catalog, "Small").unwrap().is_valid());
    assert_eq!(derive_stats(&character, &catalog).toughness, 4);

    assert!(character.select_edge(&catalog, "Brawny").unwrap().is_valid());
    assert_eq!(derive_stats(&character, &catalog).toughness, 5);
}

#[test]
fn test_fighter_sheet() {
    let catalog = standard_catalog();
    let character = fighter(&catalog);

    let stats = derive_stats(&character, &catalog);
    assert_eq!(
        stats,
        DerivedStats {
            pace: 6,
            parry: 6,
            toughness: 7,
        }
    );

    let report = validate_character(&character, &catalog);
    assert!(report.is_valid(), "Errors: {:?}", report.errors);
}

#[test]
fn test_ancestry_traits_feed_derived_stats() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    character.set_ancestry(&catalog, "Dwarf").unwrap();
    let stats = derive_stats(&character, &catalog);
    assert_eq!(stats.pace, 5);
    assert_eq!(stats.toughness, 5);
}

// ==========================================================================
// Hindrances
// ==========================================================================

#[test]
fn test_third_minor_hindrance_rejected() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    assert!(character.select_hindrance(&catalog, "Loyal").unwrap().is_valid());
    assert!(character.select_hindrance(&catalog, "Quirk").unwrap().is_valid());

    let verdict = character.select_hindrance(&catalog, "Cautious").unwrap();
    assert!(matches!(
        verdict,
        Validation::Invalid(Rejection::MinorCapExceeded { .. })
    ));
    assert!(!character.has_hindrance("Cautious"));
    assert_eq!(character.hindrances().len(), 2);
}

#[test]
fn test_hindrance_bonus_tiers() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();

    let pools = summarize(&character, &catalog);
    assert_eq!(pools.edges.total, 1);
    assert_eq!(pools.skills.total, 12);

    character.select_hindrance(&catalog, "Wanted").unwrap();
    let pools = summarize(&character, &catalog);
    assert_eq!(pools.edges.total, 2);
    assert_eq!(pools.skills.total, 12);

    character.select_hindrance(&catalog, "Heroic").unwrap();
    let pools = summarize(&character, &catalog);
    assert_eq!(pools.edges.total, 2);
    assert_eq!(pools.skills.total, 14);
}

#[test]
fn test_luck_exclusion_is_symmetric() {
    let catalog = standard_catalog();

    let mut lucky = catalog.new_character();
    assert!(lucky.select_edge(&catalog, "Luck").unwrap().is_valid());
    assert!(!can_select_hindrance(&lucky, &catalog, "Bad Luck").unwrap());

    let mut unlucky = catalog.new_character();
    assert!(unlucky.select_hindrance(&catalog, "Bad Luck").unwrap().is_valid());
    assert_eq!(
        can_select_edge(&unlucky, &catalog, "Luck").unwrap(),
        Validation::Invalid(Rejection::ConflictsWith {
            name: "Bad Luck".to_string()
        })
    );
}

// ==========================================================================
// Edges
// ==========================================================================

#[test]
fn test_attribute_prerequisite() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    character
        .set_attribute(catalog.rules(), Attribute::Smarts, DieRank::D8)
        .unwrap();
    character.set_skill(&catalog, "Research", DieRank::D6).unwrap();

    let verdict = can_select_edge(&character, &catalog, "Investigator").unwrap();
    assert_eq!(
        verdict.reason().as_deref(),
        Some("Requires Research d8+ (has d6)")
    );

    character.set_skill(&catalog, "Research", DieRank::D8).unwrap();
    assert!(can_select_edge(&character, &catalog, "Investigator").unwrap().is_valid());
}

#[test]
fn test_seasoned_edge_rejected_at_creation() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    character.set_skill(&catalog, "Fighting", DieRank::D12).unwrap();
    assert_eq!(
        character.select_edge(&catalog, "Block").unwrap(),
        Validation::Invalid(Rejection::RankTooLow {
            required: Rank::Seasoned
        })
    );
    assert!(!character.has_edge("Block"));
}

#[test]
fn test_edge_slots_run_out() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    assert!(character.select_edge(&catalog, "Alertness").unwrap().is_valid());
    assert!(matches!(
        character.select_edge(&catalog, "Luck").unwrap(),
        Validation::Invalid(Rejection::NoEdgeSlots { .. })
    ));
}

#[test]
fn test_deselecting_dependency_leaves_dependent_with_warning() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    character.select_hindrance(&catalog, "Wanted").unwrap();
    character.select_edge(&catalog, "Luck").unwrap();
    character.select_edge(&catalog, "Great Luck").unwrap();

    assert!(character.deselect_edge("Luck"));
    assert!(character.has_edge("Great Luck"));

    let report = validate_character(&character, &catalog);
    assert!(report
        .warnings
        .iter()
        .any(|w| w == "Great Luck no longer qualifies: Requires the Luck edge"));
}

// ==========================================================================
// Pools and reports
// ==========================================================================

#[test]
fn test_skill_cost_changes_with_attribute() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    character.set_skill(&catalog, "Fighting", DieRank::D8).unwrap();
    assert_eq!(skill_pool(&character, &catalog).used, 5);

    character
        .set_attribute(catalog.rules(), Attribute::Agility, DieRank::D8)
        .unwrap();
    assert_eq!(skill_pool(&character, &catalog).used, 3);
}

#[test]
fn test_overspent_skills_reported() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    for skill in ["Fighting", "Shooting", "Research"] {
        character.set_skill(&catalog, skill, DieRank::D8).unwrap();
    }
    // 3 x 5 points against a pool of 12
    let report = validate_character(&character, &catalog);
    assert!(report
        .errors
        .contains(&"Skill points overspent by 3".to_string()));
}

#[test]
fn test_scholar_sheet() {
    let catalog = standard_catalog();
    let character = scholar(&catalog);
    let pools = summarize(&character, &catalog);
    assert_eq!(pools.skills.total, 14);
    assert_eq!(pools.skills.used, 11);
    assert_eq!(pools.attributes.used, 4);
    assert!(validate_character(&character, &catalog).is_valid());
}

// ==========================================================================
// Snapshots
// ==========================================================================

#[test]
fn test_snapshot_reproduces_figures() {
    let catalog = standard_catalog();
    verify_round_trip(&fighter(&catalog), &catalog).assert_consistent();
    verify_round_trip(&scholar(&catalog), &catalog).assert_consistent();
}

#[test]
fn test_hand_edited_conflict_surfaces_in_report() {
    let catalog = standard_catalog();
    let mut character = catalog.new_character();
    character.select_hindrance(&catalog, "Bad Luck").unwrap();
    let text = CharacterSnapshot::new(&character).to_ron().unwrap();

    // Inject the excluded edge the way a hand edit would.
    let edited = text.replacen("edges: [],", "edges: [\"Luck\"],", 1);
    assert_ne!(edited, text);
    let restored = CharacterSnapshot::from_ron(&edited).unwrap().into_character();

    let report = validate_character(&restored, &catalog);
    assert!(report
        .errors
        .contains(&"Bad Luck conflicts with Luck".to_string()));
}
