//! Derived combat statistics and starting funds.

use serde::{Deserialize, Serialize};

use crate::attributes::Attribute;
use crate::catalog::Catalog;
use crate::character::CharacterState;
use crate::effects::{named_effects, parse_trait_tag, TraitEffect};

/// Pace, Parry and Toughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Movement per round.
    pub pace: i32,
    /// Target number to hit in melee.
    pub parry: i32,
    /// Target number to damage.
    pub toughness: i32,
}

/// Visit every stat effect the character carries.
///
/// Sources are the ancestry's trait tags, then hindrances, then edges.
/// Catalog entries with no explicit effects, and selections the catalog no
/// longer defines, use the built-in named effects.
pub fn for_each_effect(
    character: &CharacterState,
    catalog: &Catalog,
    mut visit: impl FnMut(TraitEffect),
) {
    if let Some(ancestry) = catalog.ancestry(character.ancestry()) {
        ancestry
            .traits
            .iter()
            .filter_map(|tag| parse_trait_tag(tag))
            .for_each(&mut visit);
    }

    for (name, selection) in character.hindrances() {
        match catalog.hindrance(name).and_then(|h| h.effects.as_deref()) {
            Some(effects) => effects.iter().copied().for_each(&mut visit),
            None => named_effects(name, selection.points)
                .iter()
                .copied()
                .for_each(&mut visit),
        }
    }

    for name in character.edges() {
        match catalog.edge(name).and_then(|e| e.data.effects.as_deref()) {
            Some(effects) => effects.iter().copied().for_each(&mut visit),
            None => named_effects(name, 0).iter().copied().for_each(&mut visit),
        }
    }
}

/// Compute derived stats.
#[must_use]
pub fn derive_stats(character: &CharacterState, catalog: &Catalog) -> DerivedStats {
    let rules = &catalog.rules().derived;

    let mut pace_bonus: i32 = 0;
    let mut parry_bonus: i32 = 0;
    let mut toughness_bonus: i32 = 0;
    for_each_effect(character, catalog, |effect| match effect {
        TraitEffect::Pace(n) => pace_bonus = pace_bonus.saturating_add(n),
        TraitEffect::Parry(n) => parry_bonus = parry_bonus.saturating_add(n),
        TraitEffect::Toughness(n) => toughness_bonus = toughness_bonus.saturating_add(n),
        TraitEffect::StartingFunds(_) => {}
    });

    let fighting = i32::from(character.skill_rank(&rules.parry_skill).value());
    let vigor = i32::from(character.attribute(Attribute::Vigor).value());

    let stats = DerivedStats {
        pace: rules.base_pace.saturating_add(pace_bonus).max(1),
        parry: rules
            .parry_base
            .saturating_add(fighting / 2)
            .max(rules.parry_minimum)
            .saturating_add(parry_bonus),
        toughness: rules
            .toughness_base
            .saturating_add(vigor / 2)
            .saturating_add(toughness_bonus)
            .max(1),
    };
    tracing::trace!(?stats, "Derived stats");
    stats
}

/// Starting funds: the rules' base unless an effect overrides it.
///
/// When several overrides are present the largest wins.
#[must_use]
pub fn starting_funds(character: &CharacterState, catalog: &Catalog) -> u32 {
    let mut funds = None;
    for_each_effect(character, catalog, |effect| {
        if let TraitEffect::StartingFunds(amount) = effect {
            funds = Some(funds.map_or(amount, |current: u32| current.max(amount)));
        }
    });
    funds.unwrap_or(catalog.rules().derived.starting_funds)
}
