//! Test fixtures and helpers.
//!
//! A standard catalog built in code, plus pre-built characters for
//! consistent testing.

use chargen_core::attributes::{Attribute, DieRank};
use chargen_core::catalog::Catalog;
use chargen_core::character::CharacterState;
use chargen_core::data::{
    AncestryData, CatalogData, EdgeData, GameRules, HindranceData, Severity, SkillData,
};

/// Standard skills with their linked attributes.
pub const STANDARD_SKILLS: &[(&str, Attribute)] = &[
    ("Athletics", Attribute::Agility),
    ("Common Knowledge", Attribute::Smarts),
    ("Notice", Attribute::Smarts),
    ("Persuasion", Attribute::Spirit),
    ("Stealth", Attribute::Agility),
    ("Fighting", Attribute::Agility),
    ("Shooting", Attribute::Agility),
    ("Research", Attribute::Smarts),
    ("Healing", Attribute::Smarts),
    ("Repair", Attribute::Smarts),
    ("Spellcasting", Attribute::Smarts),
    ("Faith", Attribute::Spirit),
    ("Intimidation", Attribute::Spirit),
    ("Survival", Attribute::Smarts),
    ("Riding", Attribute::Agility),
    ("Thievery", Attribute::Agility),
];

/// Skills every character is expected to know.
pub const CORE_SKILLS: &[&str] = &[
    "Athletics",
    "Common Knowledge",
    "Notice",
    "Persuasion",
    "Stealth",
];

/// The standard catalog's data, before compilation.
#[must_use]
pub fn standard_catalog_data() -> CatalogData {
    let skills = STANDARD_SKILLS
        .iter()
        .map(|(name, attribute)| {
            let skill = SkillData::new(*name, *attribute);
            if CORE_SKILLS.contains(name) {
                skill.core()
            } else {
                skill
            }
        })
        .collect();

    let hindrances = vec![
        HindranceData::new("Bad Luck", Severity::Major),
        HindranceData::new("Cautious", Severity::Minor),
        HindranceData::new("Curious", Severity::Major),
        HindranceData::new("Enemy", Severity::Minor),
        HindranceData::new("Heroic", Severity::Major),
        HindranceData::new("Loyal", Severity::Minor),
        HindranceData::new("Mean", Severity::Minor),
        HindranceData::new("Overconfident", Severity::Major),
        HindranceData::new("Poverty", Severity::Minor),
        HindranceData::new("Quirk", Severity::Minor),
        HindranceData::new("Slow", Severity::Minor),
        HindranceData::new("Small", Severity::Minor),
        HindranceData::new("Stubborn", Severity::Minor),
        HindranceData::new("Wanted", Severity::Major),
    ];

    let edges = vec![
        EdgeData::new("Alertness", "Background", "Novice"),
        EdgeData::new("Ambidextrous", "Background", "Novice, Agility d8+"),
        EdgeData::new("Arcane Background (Magic)", "Background", "Novice"),
        EdgeData::new("Arcane Background (Miracles)", "Background", "Novice"),
        EdgeData::new("Arcane Resistance", "Background", "Novice, Spirit d8+"),
        EdgeData::new("Brave", "Background", "Novice, Spirit d6+"),
        EdgeData::new("Brawny", "Background", "Novice, Strength d6+, Vigor d6+"),
        EdgeData::new("Fleet-Footed", "Background", "Novice, Agility d6+"),
        EdgeData::new("Linguist", "Background", "Novice, Smarts d6+"),
        EdgeData::new("Luck", "Background", "Novice").with_exclusive(&["Bad Luck"]),
        EdgeData::new("Great Luck", "Background", "Novice, Luck"),
        EdgeData::new("Quick", "Background", "Novice, Agility d8+"),
        EdgeData::new("Rich", "Background", "Novice").with_exclusive(&["Poverty"]),
        EdgeData::new("Filthy Rich", "Background", "Novice, Rich"),
        EdgeData::new("Block", "Combat", "Seasoned, Fighting d8+"),
        EdgeData::new("Improved Block", "Combat", "Veteran, Block"),
        EdgeData::new("Nerves of Steel", "Combat", "Novice, Vigor d8+"),
        EdgeData::new("Marksman", "Combat", "Seasoned, Athletics d8+ or Shooting d8+"),
        EdgeData::new("Trademark Weapon", "Combat", "Novice, Fighting d8+ or Shooting d8+"),
        EdgeData::new("Healer", "Professional", "Novice, Spirit d8+, Healing d8+"),
        EdgeData::new("Investigator", "Professional", "Novice, Smarts d8+, Research d8+"),
        EdgeData::new("Mr. Fix It", "Professional", "Novice, Repair d8+"),
        EdgeData::new("Scholar", "Professional", "Novice, Research d8+"),
        EdgeData::new("Channeling", "Power", "Seasoned, Arcane Background (Any)"),
        EdgeData::new("Wizard", "Power", "Novice, Arcane Background (Magic), Spellcasting d6+"),
    ];

    let ancestries = vec![
        AncestryData::new("Human").with_grants(0, 1),
        AncestryData::new("Dwarf").with_traits(&["Low Light Vision", "Slow", "Toughness +1"]),
        AncestryData::new("Elf").with_traits(&["Agile", "Low Light Vision"]),
        AncestryData::new("Half-Folk")
            .with_traits(&["Small", "Spirited"])
            .with_grants(0, 1),
        AncestryData::new("Android").with_traits(&["Armor +2", "Construct"]),
        AncestryData::new("Savant").with_grants(2, 0),
    ];

    CatalogData {
        rules: GameRules::default(),
        default_ancestry: "Human".to_string(),
        skills,
        hindrances,
        edges,
        ancestries,
    }
}

/// The standard catalog, compiled.
///
/// # Panics
///
/// Panics if the fixture data is inconsistent.
#[must_use]
pub fn standard_catalog() -> Catalog {
    Catalog::compile(standard_catalog_data()).expect("standard catalog should compile")
}

/// A fighter built within every budget.
///
/// Agility d8, Strength d6, Vigor d8; Fighting d8 plus core skills;
/// Loyal and Wanted; Brawny and Trademark Weapon.
///
/// # Panics
///
/// Panics if the fixture no longer fits `catalog`.
#[must_use]
pub fn fighter(catalog: &Catalog) -> CharacterState {
    let rules = catalog.rules();
    let mut character = catalog.new_character();
    character.set_name("Brakka");
    for (attribute, rank) in [
        (Attribute::Agility, DieRank::D8),
        (Attribute::Strength, DieRank::D6),
        (Attribute::Vigor, DieRank::D8),
    ] {
        character
            .set_attribute(rules, attribute, rank)
            .expect("fighter attributes");
    }
    for (skill, rank) in [
        ("Fighting", DieRank::D8),
        ("Athletics", DieRank::D6),
        ("Notice", DieRank::D4),
        ("Stealth", DieRank::D4),
        ("Intimidation", DieRank::D4),
    ] {
        character
            .set_skill(catalog, skill, rank)
            .expect("fighter skills");
    }
    for hindrance in ["Loyal", "Wanted"] {
        let verdict = character
            .select_hindrance(catalog, hindrance)
            .expect("fighter hindrances");
        assert!(verdict.is_valid(), "{hindrance}: {verdict:?}");
    }
    for edge in ["Brawny", "Trademark Weapon"] {
        let verdict = character.select_edge(catalog, edge).expect("fighter edges");
        assert!(verdict.is_valid(), "{edge}: {verdict:?}");
    }
    character
}

/// A scholar with a custom skill and the Savant ancestry.
///
/// # Panics
///
/// Panics if the fixture no longer fits `catalog`.
#[must_use]
pub fn scholar(catalog: &Catalog) -> CharacterState {
    let rules = catalog.rules();
    let mut character = catalog.new_character();
    character.set_name("Ilse");
    character.set_ancestry(catalog, "Savant").expect("scholar ancestry");
    character
        .set_attribute(rules, Attribute::Smarts, DieRank::D10)
        .expect("scholar smarts");
    character
        .set_attribute(rules, Attribute::Spirit, DieRank::D6)
        .expect("scholar spirit");
    character
        .add_custom_skill(catalog, "Occult", Attribute::Smarts)
        .expect("scholar custom skill");
    for (skill, rank) in [
        ("Research", DieRank::D10),
        ("Occult", DieRank::D8),
        ("Common Knowledge", DieRank::D6),
        ("Notice", DieRank::D6),
    ] {
        character
            .set_skill(catalog, skill, rank)
            .expect("scholar skills");
    }
    character
        .select_hindrance(catalog, "Curious")
        .expect("scholar hindrances");
    character
        .select_edge(catalog, "Scholar")
        .expect("scholar edges");
    character
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_consistent() {
        let errors = standard_catalog_data().validate();
        assert!(errors.is_empty(), "Errors: {errors:?}");
    }

    #[test]
    fn test_fixtures_build() {
        let catalog = standard_catalog();
        assert_eq!(fighter(&catalog).edges().len(), 2);
        assert!(scholar(&catalog).has_edge("Scholar"));
    }
}
