//! Attributes and die ranks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five core attributes every character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Nimbleness, dexterity and coordination.
    Agility,
    /// Raw intellect and perception.
    Smarts,
    /// Self-confidence, grit and willpower.
    Spirit,
    /// Physical power.
    Strength,
    /// Endurance and resistance to harm.
    Vigor,
}

impl Attribute {
    /// All attributes in sheet order.
    pub const ALL: [Self; 5] = [
        Self::Agility,
        Self::Smarts,
        Self::Spirit,
        Self::Strength,
        Self::Vigor,
    ];

    /// Display name for this attribute.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Smarts => "Smarts",
            Self::Spirit => "Spirit",
            Self::Strength => "Strength",
            Self::Vigor => "Vigor",
        }
    }

    /// Parse an attribute name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A trait's die size: d4, d6, d8, d10 or d12.
///
/// Skills additionally use [`DieRank::UNTRAINED`] (0). The raw value is
/// not range-checked on construction; use [`DieRank::is_attribute_rank`]
/// and [`DieRank::is_skill_rank`] at the boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DieRank(pub u8);

impl DieRank {
    /// Untrained skill.
    pub const UNTRAINED: Self = Self(0);
    /// d4, the minimum for attributes and trained skills.
    pub const D4: Self = Self(4);
    /// d6.
    pub const D6: Self = Self(6);
    /// d8.
    pub const D8: Self = Self(8);
    /// d10.
    pub const D10: Self = Self(10);
    /// d12, the maximum.
    pub const D12: Self = Self(12);

    /// Ranks gained per purchase step.
    pub const STEP: u8 = 2;

    /// Standard attribute rank sequence.
    pub const SEQUENCE: [Self; 5] = [Self::D4, Self::D6, Self::D8, Self::D10, Self::D12];

    /// Create a rank from its raw die size.
    #[must_use]
    pub const fn new(sides: u8) -> Self {
        Self(sides)
    }

    /// Raw die size (0 for untrained).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this is a legal attribute rank (even, d4..=d12).
    #[must_use]
    pub const fn is_attribute_rank(self) -> bool {
        self.0 >= 4 && self.0 <= 12 && self.0 % 2 == 0
    }

    /// Whether this is a legal skill rank (untrained or an attribute rank).
    #[must_use]
    pub const fn is_skill_rank(self) -> bool {
        self.0 == 0 || self.is_attribute_rank()
    }

    /// Whether a skill at this rank is untrained.
    #[must_use]
    pub const fn is_untrained(self) -> bool {
        self.0 == 0
    }

    /// Next rank up the skill sequence (untrained steps to d4).
    #[must_use]
    pub const fn next_skill_rank(self) -> Self {
        if self.0 == 0 {
            Self::D4
        } else {
            Self(self.0 + Self::STEP)
        }
    }

    /// Next rank down the skill sequence (d4 steps to untrained).
    #[must_use]
    pub const fn previous_skill_rank(self) -> Self {
        if self.0 <= 4 {
            Self::UNTRAINED
        } else {
            Self(self.0 - Self::STEP)
        }
    }
}

impl fmt::Display for DieRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            f.write_str("untrained")
        } else {
            write!(f, "d{}", self.0)
        }
    }
}

/// The five attribute ranks of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// Agility rank.
    pub agility: DieRank,
    /// Smarts rank.
    pub smarts: DieRank,
    /// Spirit rank.
    pub spirit: DieRank,
    /// Strength rank.
    pub strength: DieRank,
    /// Vigor rank.
    pub vigor: DieRank,
}

impl Attributes {
    /// Every attribute at the same rank.
    #[must_use]
    pub const fn uniform(rank: DieRank) -> Self {
        Self {
            agility: rank,
            smarts: rank,
            spirit: rank,
            strength: rank,
            vigor: rank,
        }
    }

    /// Rank of one attribute.
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> DieRank {
        match attribute {
            Attribute::Agility => self.agility,
            Attribute::Smarts => self.smarts,
            Attribute::Spirit => self.spirit,
            Attribute::Strength => self.strength,
            Attribute::Vigor => self.vigor,
        }
    }

    /// Mutable access to one attribute's rank.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut DieRank {
        match attribute {
            Attribute::Agility => &mut self.agility,
            Attribute::Smarts => &mut self.smarts,
            Attribute::Spirit => &mut self.spirit,
            Attribute::Strength => &mut self.strength,
            Attribute::Vigor => &mut self.vigor,
        }
    }

    /// Iterate `(attribute, rank)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, DieRank)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(DieRank::D4)
    }
}
