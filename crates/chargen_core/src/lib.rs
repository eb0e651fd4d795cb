//! # Chargen Core
//!
//! Rules engine for point-buy character creation.
//!
//! This crate contains **only** rules logic:
//! - No UI
//! - No catalog file loading (hosts hand in [`data::CatalogData`])
//! - No hidden state: every figure is recomputed from the character
//!
//! A host compiles a [`catalog::Catalog`] once, creates a
//! [`character::CharacterState`] from it, and then drives selections and
//! rank changes through the character's methods, reading pools, derived
//! stats and reports between edits.
//!
//! ## Crate Structure
//!
//! - [`attributes`] - Attributes and die ranks
//! - [`cost`] - Point prices for attribute and skill steps
//! - [`data`] - Serializable catalog definitions
//! - [`catalog`] - Compiled, indexed catalog
//! - [`character`] - The character under construction
//! - [`pools`] - Point pool accounting
//! - [`prerequisites`] - Hindrance and edge selection gates
//! - [`derived`] - Pace, Parry, Toughness and starting funds
//! - [`report`] - Whole-character validation
//! - [`snapshot`] - Versioned export and import

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod attributes;
pub mod catalog;
pub mod character;
pub mod cost;
pub mod data;
pub mod derived;
pub mod effects;
pub mod error;
pub mod pools;
pub mod prerequisites;
pub mod report;
pub mod requirements;
pub mod snapshot;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::attributes::{Attribute, Attributes, DieRank};
    pub use crate::catalog::{Catalog, CompiledEdge, ExclusionTable};
    pub use crate::character::{CharacterState, HindranceSelection};
    pub use crate::cost::{attribute_step_cost, skill_refund, skill_step_cost};
    pub use crate::data::{
        AncestryData, CatalogData, DerivedRules, EdgeData, GameRules, HindranceData, Severity,
        SkillData,
    };
    pub use crate::derived::{derive_stats, starting_funds, DerivedStats};
    pub use crate::effects::TraitEffect;
    pub use crate::error::{ChargenError, Result};
    pub use crate::pools::{
        attribute_pool, available_edges, hindrance_bonus, hindrance_pool, skill_pool, summarize,
        EdgeSlots, HindranceBonus, HindrancePool, PoolReport, PoolSummary,
    };
    pub use crate::prerequisites::{
        can_select_edge, can_select_hindrance, check_hindrance, Rejection, Validation,
    };
    pub use crate::report::{validate_character, CharacterReport};
    pub use crate::requirements::{Rank, Requirement};
    pub use crate::snapshot::{CharacterSnapshot, SNAPSHOT_VERSION};
}
