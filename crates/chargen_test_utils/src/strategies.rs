//! Proptest strategies for character generation.
//!
//! Strategies produce *edit scripts* rather than characters: a list of
//! [`Edit`]s is replayed against a fresh character, so every generated
//! state is one the engine's own mutations can reach.

use chargen_core::attributes::{Attribute, DieRank};
use chargen_core::catalog::Catalog;
use chargen_core::character::CharacterState;
use proptest::prelude::*;

use crate::fixtures::STANDARD_SKILLS;

/// One host action against a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Raise an attribute one step.
    RaiseAttribute(Attribute),
    /// Lower an attribute one step.
    LowerAttribute(Attribute),
    /// Raise a standard skill one step.
    RaiseSkill(&'static str),
    /// Lower a standard skill one step.
    LowerSkill(&'static str),
    /// Try to take a hindrance.
    SelectHindrance(String),
    /// Drop a hindrance.
    DeselectHindrance(String),
    /// Try to take an edge.
    SelectEdge(String),
    /// Drop an edge.
    DeselectEdge(String),
}

impl Edit {
    /// Apply the edit, ignoring refusals and range errors.
    pub fn apply(&self, character: &mut CharacterState, catalog: &Catalog) {
        let rules = catalog.rules();
        match self {
            Self::RaiseAttribute(attribute) => {
                let _ = character.increment_attribute(rules, *attribute);
            }
            Self::LowerAttribute(attribute) => {
                let _ = character.decrement_attribute(rules, *attribute);
            }
            Self::RaiseSkill(skill) => {
                let _ = character.increment_skill(catalog, skill);
            }
            Self::LowerSkill(skill) => {
                let _ = character.decrement_skill(catalog, skill);
            }
            Self::SelectHindrance(name) => {
                let _ = character.select_hindrance(catalog, name);
            }
            Self::DeselectHindrance(name) => {
                character.deselect_hindrance(name);
            }
            Self::SelectEdge(name) => {
                let _ = character.select_edge(catalog, name);
            }
            Self::DeselectEdge(name) => {
                character.deselect_edge(name);
            }
        }
    }
}

/// Replay edits against a fresh character.
#[must_use]
pub fn build_character(catalog: &Catalog, edits: &[Edit]) -> CharacterState {
    let mut character = catalog.new_character();
    for edit in edits {
        edit.apply(&mut character, catalog);
    }
    character
}

/// Any attribute.
pub fn arb_attribute() -> impl Strategy<Value = Attribute> {
    prop::sample::select(Attribute::ALL.to_vec())
}

/// Any attribute rank.
pub fn arb_attribute_rank() -> impl Strategy<Value = DieRank> {
    prop::sample::select(DieRank::SEQUENCE.to_vec())
}

/// Any skill rank, including untrained.
pub fn arb_skill_rank() -> impl Strategy<Value = DieRank> {
    prop_oneof![Just(DieRank::UNTRAINED), arb_attribute_rank()]
}

/// Any standard skill name.
pub fn arb_skill() -> impl Strategy<Value = &'static str> {
    prop::sample::select(STANDARD_SKILLS.iter().map(|(name, _)| *name).collect::<Vec<_>>())
}

/// Any hindrance name from `catalog`.
pub fn arb_hindrance(catalog: &Catalog) -> impl Strategy<Value = String> {
    prop::sample::select(catalog.hindrances().map(|h| h.name.clone()).collect::<Vec<_>>())
}

/// Any edge name from `catalog`.
pub fn arb_edge(catalog: &Catalog) -> impl Strategy<Value = String> {
    prop::sample::select(catalog.edges().map(|e| e.name().to_string()).collect::<Vec<_>>())
}

/// Any single edit against `catalog`.
pub fn arb_edit(catalog: &Catalog) -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => arb_attribute().prop_map(Edit::RaiseAttribute),
        1 => arb_attribute().prop_map(Edit::LowerAttribute),
        3 => arb_skill().prop_map(Edit::RaiseSkill),
        1 => arb_skill().prop_map(Edit::LowerSkill),
        2 => arb_hindrance(catalog).prop_map(Edit::SelectHindrance),
        1 => arb_hindrance(catalog).prop_map(Edit::DeselectHindrance),
        2 => arb_edge(catalog).prop_map(Edit::SelectEdge),
        1 => arb_edge(catalog).prop_map(Edit::DeselectEdge),
    ]
}

/// A sequence of edits.
pub fn arb_edit_script(catalog: &Catalog, max_len: usize) -> impl Strategy<Value = Vec<Edit>> {
    proptest::collection::vec(arb_edit(catalog), 0..max_len)
}
