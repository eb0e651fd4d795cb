//! Global point budgets and derived-stat baselines.

use serde::{Deserialize, Serialize};

use crate::attributes::DieRank;

/// Global constants for a ruleset.
///
/// Every field has a serde default, so a catalog file only needs to spell
/// out what it changes.
///
/// # Example RON
///
/// ```ron
/// GameRules(
///     attribute_points: 5,
///     skill_points: 12,
///     hindrance_point_cap: 4,
///     minor_hindrance_cap: 2,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Points available for raising attributes above d4.
    #[serde(default = "default_attribute_points")]
    pub attribute_points: u32,

    /// Base skill points before ancestry and hindrance bonuses.
    #[serde(default = "default_skill_points")]
    pub skill_points: u32,

    /// Maximum total hindrance points that may be taken.
    #[serde(default = "default_hindrance_point_cap")]
    pub hindrance_point_cap: u32,

    /// Maximum points that may come from minor hindrances.
    #[serde(default = "default_minor_hindrance_cap")]
    pub minor_hindrance_cap: u32,

    /// Legal die ranks for attributes, ascending. Skills may also be untrained.
    #[serde(default = "default_die_ranks")]
    pub die_ranks: Vec<DieRank>,

    /// Baselines for derived statistics.
    #[serde(default)]
    pub derived: DerivedRules,
}

/// Baselines the derived-stat calculator starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRules {
    /// Pace before modifiers.
    #[serde(default = "default_base_pace")]
    pub base_pace: i32,

    /// Constant added to half the Fighting die.
    #[serde(default = "default_parry_base")]
    pub parry_base: i32,

    /// Parry never drops below this before edge bonuses.
    #[serde(default = "default_parry_minimum")]
    pub parry_minimum: i32,

    /// Constant added to half the Vigor die.
    #[serde(default = "default_toughness_base")]
    pub toughness_base: i32,

    /// Starting funds when no override applies.
    #[serde(default = "default_starting_funds")]
    pub starting_funds: u32,

    /// Skill whose rank feeds Parry.
    #[serde(default = "default_parry_skill")]
    pub parry_skill: String,
}

const fn default_attribute_points() -> u32 {
    5
}

const fn default_skill_points() -> u32 {
    12
}

const fn default_hindrance_point_cap() -> u32 {
    4
}

const fn default_minor_hindrance_cap() -> u32 {
    2
}

fn default_die_ranks() -> Vec<DieRank> {
    DieRank::SEQUENCE.to_vec()
}

const fn default_base_pace() -> i32 {
    6
}

const fn default_parry_base() -> i32 {
    2
}

const fn default_parry_minimum() -> i32 {
    2
}

const fn default_toughness_base() -> i32 {
    2
}

const fn default_starting_funds() -> u32 {
    500
}

fn default_parry_skill() -> String {
    "Fighting".to_string()
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            attribute_points: default_attribute_points(),
            skill_points: default_skill_points(),
            hindrance_point_cap: default_hindrance_point_cap(),
            minor_hindrance_cap: default_minor_hindrance_cap(),
            die_ranks: default_die_ranks(),
            derived: DerivedRules::default(),
        }
    }
}

impl Default for DerivedRules {
    fn default() -> Self {
        Self {
            base_pace: default_base_pace(),
            parry_base: default_parry_base(),
            parry_minimum: default_parry_minimum(),
            toughness_base: default_toughness_base(),
            starting_funds: default_starting_funds(),
            parry_skill: default_parry_skill(),
        }
    }
}

impl GameRules {
    /// Lowest attribute rank; new characters start here.
    #[must_use]
    pub fn min_rank(&self) -> DieRank {
        self.die_ranks.first().copied().unwrap_or(DieRank::D4)
    }

    /// Highest legal rank.
    #[must_use]
    pub fn max_rank(&self) -> DieRank {
        self.die_ranks.last().copied().unwrap_or(DieRank::D12)
    }

    /// Whether `rank` is a legal attribute rank under these rules.
    #[must_use]
    pub fn is_attribute_rank(&self, rank: DieRank) -> bool {
        self.die_ranks.contains(&rank)
    }

    /// Whether `rank` is a legal skill rank (untrained or an attribute rank).
    #[must_use]
    pub fn is_skill_rank(&self, rank: DieRank) -> bool {
        rank.is_untrained() || self.is_attribute_rank(rank)
    }

    /// The rank after `rank`, if any.
    #[must_use]
    pub fn next_rank(&self, rank: DieRank) -> Option<DieRank> {
        if rank.is_untrained() {
            return self.die_ranks.first().copied();
        }
        let index = self.die_ranks.iter().position(|r| *r == rank)?;
        self.die_ranks.get(index + 1).copied()
    }

    /// The rank before `rank`, if any. Does not step below the sequence.
    #[must_use]
    pub fn previous_rank(&self, rank: DieRank) -> Option<DieRank> {
        let index = self.die_ranks.iter().position(|r| *r == rank)?;
        index.checked_sub(1).and_then(|i| self.die_ranks.get(i).copied())
    }

    /// Check the rank sequence is usable by the cost model.
    ///
    /// The sequence must be non-empty, start at d4, step up one die at a
    /// time, and lie within d4..=d12. Attribute and skill prices count
    /// steps from d4.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.die_ranks.is_empty() {
            errors.push("Rules define no die ranks".to_string());
        }
        if let Some(first) = self.die_ranks.first() {
            if *first != DieRank::D4 {
                errors.push(format!("Die ranks must start at d4, not {first}"));
            }
        }
        for rank in &self.die_ranks {
            if !rank.is_attribute_rank() {
                errors.push(format!("Die rank {rank} is outside d4..d12"));
            }
        }
        for pair in self.die_ranks.windows(2) {
            if pair[1].value() != pair[0].value() + DieRank::STEP {
                errors.push(format!(
                    "Die ranks {} and {} are not one step apart",
                    pair[0], pair[1]
                ));
            }
        }
        if self.minor_hindrance_cap > self.hindrance_point_cap {
            errors.push(format!(
                "Minor hindrance cap {} exceeds hindrance point cap {}",
                self.minor_hindrance_cap, self.hindrance_point_cap
            ));
        }

        errors
    }
}
