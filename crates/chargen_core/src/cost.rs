//! Point prices for raising attributes and skills.
//!
//! Attributes cost a flat point per step above d4. Skills walk the
//! sequence untrained → d4 → d6 → … one step at a time, and each step is
//! priced by the rank it starts from: cheap (1) while the skill is below
//! its linked attribute, expensive (2) once it has caught up.
//!
//! All functions here are pure and never touch a
//! [`CharacterState`](crate::character::CharacterState).

use crate::attributes::DieRank;
use crate::error::{ChargenError, Result};

/// Points per step while a skill is below its linked attribute.
pub const SKILL_STEP_BELOW_ATTRIBUTE: u32 = 1;

/// Points per step once a skill has reached its linked attribute.
pub const SKILL_STEP_AT_OR_ABOVE_ATTRIBUTE: u32 = 2;

/// Points per attribute step.
pub const ATTRIBUTE_STEP: u32 = 1;

/// Cost of raising an attribute from `from` to `to`.
///
/// Returns 0 when `to <= from`.
///
/// # Errors
///
/// Returns [`ChargenError::InvalidRank`] if either rank is not an
/// attribute rank.
pub fn attribute_step_cost(from: DieRank, to: DieRank) -> Result<u32> {
    for rank in [from, to] {
        if !rank.is_attribute_rank() {
            return Err(ChargenError::InvalidRank {
                rank,
                context: "attribute".to_string(),
            });
        }
    }
    if to <= from {
        return Ok(0);
    }
    Ok(u32::from((to.value() - from.value()) / DieRank::STEP) * ATTRIBUTE_STEP)
}

/// Cost of raising a skill from `from` to `to` against a linked attribute.
///
/// # Errors
///
/// Returns [`ChargenError::InvalidRank`] if either rank is not a skill
/// rank, or [`ChargenError::DescendingInterval`] if `to < from`.
pub fn skill_step_cost(from: DieRank, to: DieRank, linked: DieRank) -> Result<u32> {
    for rank in [from, to] {
        if !rank.is_skill_rank() {
            return Err(ChargenError::InvalidRank {
                rank,
                context: "skill".to_string(),
            });
        }
    }
    if to < from {
        return Err(ChargenError::DescendingInterval { from, to });
    }
    Ok(skill_cost_unchecked(from, to, linked))
}

/// Points returned when lowering a skill from `from` to `to`.
///
/// The refund is the price of the reversed interval, so stepping down and
/// back up again is always free.
///
/// # Errors
///
/// Returns [`ChargenError::InvalidRank`] for non-skill ranks, or
/// [`ChargenError::DescendingInterval`] if `to > from`.
pub fn skill_refund(from: DieRank, to: DieRank, linked: DieRank) -> Result<u32> {
    skill_step_cost(to, from, linked)
}

/// Price of a single step starting at `rank`.
#[must_use]
pub const fn skill_step_price(rank: DieRank, linked: DieRank) -> u32 {
    if rank.value() < linked.value() {
        SKILL_STEP_BELOW_ATTRIBUTE
    } else {
        SKILL_STEP_AT_OR_ABOVE_ATTRIBUTE
    }
}

/// Walk the skill sequence without validating the ranks.
///
/// Callers must pass skill ranks with `from <= to`; stored character
/// ranks satisfy this by construction. Ranks above d12 are priced as d12.
pub(crate) fn skill_cost_unchecked(from: DieRank, to: DieRank, linked: DieRank) -> u32 {
    let to = to.min(DieRank::D12);
    let mut rank = from;
    let mut total = 0;
    while rank < to {
        total += skill_step_price(rank, linked);
        rank = rank.next_skill_rank();
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_cost_from_d4() {
        for rank in DieRank::SEQUENCE {
            let expected = u32::from((rank.value() - 4) / 2);
            assert_eq!(attribute_step_cost(DieRank::D4, rank), Ok(expected));
        }
    }

    #[test]
    fn test_attribute_cost_is_flat_per_step() {
        assert_eq!(attribute_step_cost(DieRank::D10, DieRank::D12), Ok(1));
        assert_eq!(attribute_step_cost(DieRank::D6, DieRank::D10), Ok(2));
    }

    #[test]
    fn test_attribute_cost_zero_when_not_raising() {
        assert_eq!(attribute_step_cost(DieRank::D8, DieRank::D8), Ok(0));
        assert_eq!(attribute_step_cost(DieRank::D8, DieRank::D6), Ok(0));
    }

    #[test]
    fn test_attribute_cost_rejects_bad_rank() {
        assert!(matches!(
            attribute_step_cost(DieRank::new(5), DieRank::D8),
            Err(ChargenError::InvalidRank { .. })
        ));
        assert!(attribute_step_cost(DieRank::UNTRAINED, DieRank::D8).is_err());
    }

    #[test]
    fn test_skill_cost_below_attribute() {
        // Linked d8: untrained->d4->d6->d8 are all cheap steps.
        assert_eq!(
            skill_step_cost(DieRank::UNTRAINED, DieRank::D8, DieRank::D8),
            Ok(3)
        );
    }

    #[test]
    fn test_skill_cost_crossing_attribute() {
        // Linked d6: 0->4 (1), 4->6 (1), 6->8 (2), 8->10 (2)
        assert_eq!(
            skill_step_cost(DieRank::UNTRAINED, DieRank::D10, DieRank::D6),
            Ok(6)
        );
    }

    #[test]
    fn test_skill_cost_same_rank_is_free() {
        assert_eq!(skill_step_cost(DieRank::D6, DieRank::D6, DieRank::D4), Ok(0));
    }

    #[test]
    fn test_skill_cost_descending_is_error() {
        assert_eq!(
            skill_step_cost(DieRank::D8, DieRank::D6, DieRank::D6),
            Err(ChargenError::DescendingInterval {
                from: DieRank::D8,
                to: DieRank::D6,
            })
        );
    }

    #[test]
    fn test_skill_refund_matches_cost() {
        let linked = DieRank::D6;
        let up = skill_step_cost(DieRank::D6, DieRank::D8, linked).unwrap();
        let down = skill_refund(DieRank::D8, DieRank::D6, linked).unwrap();
        assert_eq!(up, down);
        assert_eq!(up, 2);
    }

    #[test]
    fn test_untrained_linked_attribute_never_discounts() {
        assert_eq!(
            skill_step_cost(DieRank::UNTRAINED, DieRank::D4, DieRank::UNTRAINED),
            Ok(2)
        );
    }
}
