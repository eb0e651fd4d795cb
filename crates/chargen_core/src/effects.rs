//! Stat effects granted by edges, hindrances and ancestry traits.
//!
//! Catalog entries may list their effects explicitly. Entries that leave
//! `effects` unset fall back to [`named_effects`], a fixed table of the
//! well-known edges and hindrances, so that a selection the catalog does
//! not describe still contributes to derived stats.

use serde::{Deserialize, Serialize};

/// A modifier applied by the derived-stat calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitEffect {
    /// Flat change to Pace.
    Pace(i32),
    /// Flat change to Parry.
    Parry(i32),
    /// Flat change to Toughness.
    Toughness(i32),
    /// Replace the starting funds. The highest override present wins.
    StartingFunds(u32),
}

/// Pace bonus for Fleet-Footed.
pub const FLEET_FOOTED_PACE: i32 = 2;
/// Parry bonus for Block and, separately, Improved Block.
pub const BLOCK_PARRY: i32 = 1;
/// Toughness bonus for Brawny.
pub const BRAWNY_TOUGHNESS: i32 = 1;
/// Toughness penalty for being Small.
pub const SMALL_TOUGHNESS: i32 = -1;
/// Funds for a character with Poverty.
pub const POVERTY_FUNDS: u32 = 250;
/// Funds for a Rich character.
pub const RICH_FUNDS: u32 = 1_500;
/// Funds for a Filthy Rich character.
pub const FILTHY_RICH_FUNDS: u32 = 2_500;

/// Built-in effects of a named edge or hindrance.
///
/// `points` is the hindrance point value of the selection (0 for edges);
/// Slow scales with it.
#[must_use]
pub fn named_effects(name: &str, points: u32) -> &'static [TraitEffect] {
    const FLEET_FOOTED: &[TraitEffect] = &[TraitEffect::Pace(FLEET_FOOTED_PACE)];
    const BLOCK: &[TraitEffect] = &[TraitEffect::Parry(BLOCK_PARRY)];
    const BRAWNY: &[TraitEffect] = &[TraitEffect::Toughness(BRAWNY_TOUGHNESS)];
    const SMALL: &[TraitEffect] = &[TraitEffect::Toughness(SMALL_TOUGHNESS)];
    const SLOW_MINOR: &[TraitEffect] = &[TraitEffect::Pace(-1)];
    const SLOW_MAJOR: &[TraitEffect] = &[TraitEffect::Pace(-2)];
    const POVERTY: &[TraitEffect] = &[TraitEffect::StartingFunds(POVERTY_FUNDS)];
    const RICH: &[TraitEffect] = &[TraitEffect::StartingFunds(RICH_FUNDS)];
    const FILTHY_RICH: &[TraitEffect] = &[TraitEffect::StartingFunds(FILTHY_RICH_FUNDS)];

    match name.trim() {
        "Fleet-Footed" => FLEET_FOOTED,
        "Block" | "Improved Block" => BLOCK,
        "Brawny" => BRAWNY,
        "Small" => SMALL,
        "Poverty" => POVERTY,
        "Rich" => RICH,
        "Filthy Rich" => FILTHY_RICH,
        other if other.starts_with("Slow") => {
            if points >= 2 {
                SLOW_MAJOR
            } else {
                SLOW_MINOR
            }
        }
        _ => &[],
    }
}

/// Interpret a free-form ancestry trait tag.
///
/// Recognized: `Slow`, `Small`, `Armor +N`, and `Pace`/`Parry`/`Toughness`
/// followed by a signed amount. Anything else carries no stat effect.
#[must_use]
pub fn parse_trait_tag(tag: &str) -> Option<TraitEffect> {
    let tag = tag.trim();
    match tag {
        "Slow" => return Some(TraitEffect::Pace(-1)),
        "Small" => return Some(TraitEffect::Toughness(SMALL_TOUGHNESS)),
        _ => {}
    }

    let (label, amount) = tag.rsplit_once(' ')?;
    let amount = parse_signed(amount)?;
    match label.trim() {
        "Armor" | "Toughness" => Some(TraitEffect::Toughness(amount)),
        "Pace" => Some(TraitEffect::Pace(amount)),
        "Parry" => Some(TraitEffect::Parry(amount)),
        _ => None,
    }
}

fn parse_signed(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('+') {
        rest.parse().ok()
    } else {
        text.parse().ok()
    }
}
