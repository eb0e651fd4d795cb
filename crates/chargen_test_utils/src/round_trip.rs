//! Snapshot round-trip checks.
//!
//! A restored character must reproduce every figure the engine derives
//! from the original: pools, derived stats, starting funds and the
//! validation report. [`verify_round_trip`] compares them field by field
//! through both snapshot encodings.

use chargen_core::catalog::Catalog;
use chargen_core::character::CharacterState;
use chargen_core::derived::{derive_stats, starting_funds, DerivedStats};
use chargen_core::pools::{summarize, PoolReport};
use chargen_core::report::{validate_character, CharacterReport};
use chargen_core::snapshot::CharacterSnapshot;

/// Everything the engine computes for a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figures {
    /// Pool accounting.
    pub pools: PoolReport,
    /// Pace, Parry, Toughness.
    pub stats: DerivedStats,
    /// Starting funds.
    pub funds: u32,
    /// Validation report.
    pub report: CharacterReport,
}

impl Figures {
    /// Compute all figures.
    #[must_use]
    pub fn of(character: &CharacterState, catalog: &Catalog) -> Self {
        Self {
            pools: summarize(character, catalog),
            stats: derive_stats(character, catalog),
            funds: starting_funds(character, catalog),
            report: validate_character(character, catalog),
        }
    }
}

/// Result of a round-trip check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripResult {
    /// Figures of the original character.
    pub original: Figures,
    /// Figures after a RON round trip, or the import error.
    pub via_ron: Result<Figures, String>,
    /// Figures after a bincode round trip, or the import error.
    pub via_bytes: Result<Figures, String>,
}

impl RoundTripResult {
    /// Whether both encodings reproduced the original figures.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.via_ron.as_ref() == Ok(&self.original) && self.via_bytes.as_ref() == Ok(&self.original)
    }

    /// Assert consistency, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if either encoding diverged or failed.
    pub fn assert_consistent(&self) {
        if !self.is_consistent() {
            panic!(
                "Snapshot round trip diverged!\n  original: {:?}\n  ron:      {:?}\n  bytes:    {:?}",
                self.original, self.via_ron, self.via_bytes
            );
        }
    }
}

/// Round-trip a character through both snapshot encodings.
#[must_use]
pub fn verify_round_trip(character: &CharacterState, catalog: &Catalog) -> RoundTripResult {
    let snapshot = CharacterSnapshot::new(character);

    let via_ron = snapshot
        .to_ron()
        .and_then(|text| CharacterSnapshot::from_ron(&text))
        .map(|restored| Figures::of(&restored.character, catalog))
        .map_err(|e| e.to_string());

    let via_bytes = snapshot
        .to_bytes()
        .and_then(|bytes| CharacterSnapshot::from_bytes(&bytes))
        .map(|restored| Figures::of(&restored.character, catalog))
        .map_err(|e| e.to_string());

    RoundTripResult {
        original: Figures::of(character, catalog),
        via_ron,
        via_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fighter, scholar, standard_catalog};

    #[test]
    fn test_fresh_character_round_trips() {
        let catalog = standard_catalog();
        verify_round_trip(&catalog.new_character(), &catalog).assert_consistent();
    }

    #[test]
    fn test_fixtures_round_trip() {
        let catalog = standard_catalog();
        verify_round_trip(&fighter(&catalog), &catalog).assert_consistent();
        verify_round_trip(&scholar(&catalog), &catalog).assert_consistent();
    }
}
