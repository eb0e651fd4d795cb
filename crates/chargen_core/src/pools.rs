//! Point pool accounting.
//!
//! Every figure here is recomputed from the character on demand; nothing
//! is cached on [`CharacterState`]. Over-budget characters produce a
//! negative `balance` and zero `remaining` rather than an error.

use serde::{Deserialize, Serialize};

use crate::attributes::DieRank;
use crate::catalog::Catalog;
use crate::character::CharacterState;
use crate::cost::skill_cost_unchecked;
use crate::data::GameRules;

/// Hindrance points that buy the first edge slot.
pub const EDGE_TIER_POINTS: u32 = 2;

/// Maximum skill points bought with hindrance points past the edge tier.
pub const SKILL_TIER_POINTS: u32 = 2;

/// Budget, spend and balance of one point pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolSummary {
    /// Points from the rules.
    pub base: u32,
    /// Points from ancestry and hindrances.
    pub bonus: u32,
    /// `base + bonus`.
    pub total: u32,
    /// Points spent.
    pub used: u32,
    /// Points left, never below zero.
    pub remaining: u32,
    /// `total - used`; negative when overspent.
    pub balance: i64,
}

impl PoolSummary {
    /// Build a summary from its inputs.
    #[must_use]
    pub fn new(base: u32, bonus: u32, used: u32) -> Self {
        let total = base.saturating_add(bonus);
        Self {
            base,
            bonus,
            total,
            used,
            remaining: total.saturating_sub(used),
            balance: i64::from(total) - i64::from(used),
        }
    }

    /// Whether more was spent than the pool holds.
    #[must_use]
    pub const fn is_overspent(&self) -> bool {
        self.balance < 0
    }

    /// Points spent beyond the pool.
    #[must_use]
    pub const fn overage(&self) -> u32 {
        self.used.saturating_sub(self.total)
    }
}

/// What a hindrance point total buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HindranceBonus {
    /// Extra edge slots.
    pub edge_slots: u32,
    /// Extra skill points.
    pub skill_points: u32,
}

/// Hindrance point usage against the caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HindrancePool {
    /// Points taken across all hindrances.
    pub used: u32,
    /// Global cap.
    pub cap: u32,
    /// Points left under the global cap.
    pub remaining: u32,
    /// Points taken in minor hindrances.
    pub minor_used: u32,
    /// Minor sub-cap.
    pub minor_cap: u32,
    /// Points left under the minor sub-cap.
    pub minor_remaining: u32,
    /// What the points taken buy.
    pub bonus: HindranceBonus,
}

impl HindrancePool {
    /// Whether either cap is exceeded.
    #[must_use]
    pub const fn is_over_cap(&self) -> bool {
        self.used > self.cap || self.minor_used > self.minor_cap
    }
}

/// Edge slot accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeSlots {
    /// Slots granted by ancestry.
    pub base: u32,
    /// Slots bought with hindrance points.
    pub from_hindrances: u32,
    /// `base + from_hindrances`.
    pub total: u32,
    /// Edges selected.
    pub used: u32,
    /// Slots left, never below zero.
    pub remaining: u32,
    /// `total - used`; negative when over.
    pub balance: i64,
}

impl EdgeSlots {
    /// Whether more edges are selected than slots exist.
    #[must_use]
    pub const fn is_overspent(&self) -> bool {
        self.balance < 0
    }
}

/// Every pool at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolReport {
    /// Attribute points.
    pub attributes: PoolSummary,
    /// Skill points.
    pub skills: PoolSummary,
    /// Hindrance points.
    pub hindrances: HindrancePool,
    /// Edge slots.
    pub edges: EdgeSlots,
}

/// Attribute points spent above d4.
#[must_use]
pub fn attribute_points_used(character: &CharacterState) -> u32 {
    character
        .attributes()
        .iter()
        .map(|(_, rank)| {
            u32::from(rank.value().saturating_sub(DieRank::D4.value()) / DieRank::STEP)
        })
        .sum()
}

/// Attribute pool.
#[must_use]
pub fn attribute_pool(character: &CharacterState, rules: &GameRules) -> PoolSummary {
    PoolSummary::new(rules.attribute_points, 0, attribute_points_used(character))
}

/// Skill points spent, priced against each skill's current linked attribute.
#[must_use]
pub fn skill_points_used(character: &CharacterState, catalog: &Catalog) -> u32 {
    character
        .skills()
        .iter()
        .map(|(skill, rank)| {
            let linked = character.attribute(character.linked_attribute(catalog, skill));
            skill_cost_unchecked(DieRank::UNTRAINED, *rank, linked)
        })
        .sum()
}

/// Hindrance points taken.
#[must_use]
pub fn hindrance_points_used(character: &CharacterState) -> u32 {
    character.hindrances().values().map(|h| h.points).sum()
}

/// Hindrance points taken in minor hindrances.
#[must_use]
pub fn minor_hindrance_points_used(character: &CharacterState) -> u32 {
    character
        .hindrances()
        .values()
        .filter(|h| h.is_minor())
        .map(|h| h.points)
        .sum()
}

/// What `points` hindrance points buy.
///
/// The first two points buy an edge slot. The next two buy one skill
/// point each. Points past four buy nothing.
#[must_use]
pub fn hindrance_bonus(points: u32) -> HindranceBonus {
    HindranceBonus {
        edge_slots: u32::from(points >= EDGE_TIER_POINTS),
        skill_points: points
            .saturating_sub(EDGE_TIER_POINTS)
            .min(SKILL_TIER_POINTS),
    }
}

/// Hindrance pool.
#[must_use]
pub fn hindrance_pool(character: &CharacterState, rules: &GameRules) -> HindrancePool {
    let used = hindrance_points_used(character);
    let minor_used = minor_hindrance_points_used(character);
    HindrancePool {
        used,
        cap: rules.hindrance_point_cap,
        remaining: rules.hindrance_point_cap.saturating_sub(used),
        minor_used,
        minor_cap: rules.minor_hindrance_cap,
        minor_remaining: rules.minor_hindrance_cap.saturating_sub(minor_used),
        bonus: hindrance_bonus(used),
    }
}

/// Ancestry grants as `(skill_points, edge_slots)`; unknown ancestries grant nothing.
fn ancestry_grants(character: &CharacterState, catalog: &Catalog) -> (u32, u32) {
    match catalog.ancestry(character.ancestry()) {
        Some(ancestry) => (ancestry.bonus_skill_points, ancestry.bonus_edges),
        None => {
            tracing::warn!(ancestry = character.ancestry(), "Unknown ancestry grants nothing");
            (0, 0)
        }
    }
}

/// Skill pool: rules base plus ancestry and hindrance bonuses.
#[must_use]
pub fn skill_pool(character: &CharacterState, catalog: &Catalog) -> PoolSummary {
    let (ancestry_points, _) = ancestry_grants(character, catalog);
    let bonus = hindrance_bonus(hindrance_points_used(character)).skill_points;
    PoolSummary::new(
        catalog.rules().skill_points,
        ancestry_points + bonus,
        skill_points_used(character, catalog),
    )
}

/// Edge slots: ancestry grant plus hindrance bonus.
#[must_use]
pub fn available_edges(character: &CharacterState, catalog: &Catalog) -> EdgeSlots {
    let (_, base) = ancestry_grants(character, catalog);
    let from_hindrances = hindrance_bonus(hindrance_points_used(character)).edge_slots;
    let total = base + from_hindrances;
    let used = u32::try_from(character.edges().len()).unwrap_or(u32::MAX);
    EdgeSlots {
        base,
        from_hindrances,
        total,
        used,
        remaining: total.saturating_sub(used),
        balance: i64::from(total) - i64::from(used),
    }
}

/// All pools for a character.
#[must_use]
pub fn summarize(character: &CharacterState, catalog: &Catalog) -> PoolReport {
    PoolReport {
        attributes: attribute_pool(character, catalog.rules()),
        skills: skill_pool(character, catalog),
        hindrances: hindrance_pool(character, catalog.rules()),
        edges: available_edges(character, catalog),
    }
}
