//! Error types for the rules engine.
//!
//! Everything in here signals a caller bug: a malformed rank, a name the
//! catalog has never heard of, a cost query with a descending interval.
//! Rules violations (over budget, unmet prerequisite, conflicting picks)
//! are never errors; they are reported through
//! [`Validation`](crate::prerequisites::Validation) and
//! [`CharacterReport`](crate::report::CharacterReport).

use thiserror::Error;

use crate::attributes::{Attribute, DieRank};

/// Result type alias using [`ChargenError`].
pub type Result<T> = std::result::Result<T, ChargenError>;

/// Top-level error type for engine misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChargenError {
    /// A die rank outside the allowed sequence for the trait.
    #[error("Invalid die rank {rank} for {context}")]
    InvalidRank {
        /// The offending rank value.
        rank: DieRank,
        /// What the rank was meant for (an attribute or skill name).
        context: String,
    },

    /// Attribute is already at the top or bottom of the rank sequence.
    #[error("{attribute} cannot move past {rank}")]
    AttributeOutOfRange {
        /// Attribute being changed.
        attribute: Attribute,
        /// Current rank.
        rank: DieRank,
    },

    /// Skill is already at the top or bottom of the rank sequence.
    #[error("Skill '{skill}' cannot move past {rank}")]
    SkillOutOfRange {
        /// Skill being changed.
        skill: String,
        /// Current rank.
        rank: DieRank,
    },

    /// Cost function called with `to < from`.
    #[error("Descending cost interval {from} -> {to}; use the refund for decrements")]
    DescendingInterval {
        /// Starting rank.
        from: DieRank,
        /// Target rank.
        to: DieRank,
    },

    /// Skill not present in the catalog or the character's custom skills.
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// Hindrance not present in the catalog.
    #[error("Unknown hindrance: {0}")]
    UnknownHindrance(String),

    /// Edge not present in the catalog.
    #[error("Unknown edge: {0}")]
    UnknownEdge(String),

    /// Ancestry not present in the catalog.
    #[error("Unknown ancestry: {0}")]
    UnknownAncestry(String),

    /// Custom skill name collides with an existing skill, or is blank.
    #[error("Invalid custom skill name '{0}'")]
    InvalidCustomSkill(String),

    /// Catalog data is structurally unusable.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Character snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Snapshot was written by an incompatible format version.
    #[error("Snapshot version mismatch: expected {expected}, got {found}")]
    SnapshotVersion {
        /// Version this build understands.
        expected: u32,
        /// Version found in the snapshot.
        found: u32,
    },
}
