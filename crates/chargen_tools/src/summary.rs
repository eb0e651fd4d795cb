//! Character sheet summaries.

use std::fmt::Write as _;

use chargen_core::catalog::Catalog;
use chargen_core::character::CharacterState;
use chargen_core::derived::{derive_stats, starting_funds, DerivedStats};
use chargen_core::pools::{summarize, PoolReport, PoolSummary};
use chargen_core::report::{validate_character, CharacterReport};
use serde::Serialize;

/// Everything a sheet shows about a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSummary {
    /// Character name.
    pub name: String,
    /// Ancestry name.
    pub ancestry: String,
    /// Attribute dice, e.g. `("Agility", "d8")`.
    pub attributes: Vec<(String, String)>,
    /// Trained skill dice.
    pub skills: Vec<(String, String)>,
    /// Hindrances with their severity.
    pub hindrances: Vec<(String, String)>,
    /// Selected edges.
    pub edges: Vec<String>,
    /// Pool accounting.
    pub pools: PoolReport,
    /// Pace, Parry, Toughness.
    pub stats: DerivedStats,
    /// Starting funds.
    pub starting_funds: u32,
    /// Validation findings.
    pub report: CharacterReport,
}

impl CharacterSummary {
    /// Build the summary.
    #[must_use]
    pub fn new(character: &CharacterState, catalog: &Catalog) -> Self {
        Self {
            name: character.name().to_string(),
            ancestry: character.ancestry().to_string(),
            attributes: character
                .attributes()
                .iter()
                .map(|(attribute, rank)| (attribute.to_string(), rank.to_string()))
                .collect(),
            skills: character
                .skills()
                .iter()
                .map(|(skill, rank)| (skill.clone(), rank.to_string()))
                .collect(),
            hindrances: character
                .hindrances()
                .iter()
                .map(|(name, selection)| (name.clone(), selection.severity.to_string()))
                .collect(),
            edges: character.edges().iter().cloned().collect(),
            pools: summarize(character, catalog),
            stats: derive_stats(character, catalog),
            starting_funds: starting_funds(character, catalog),
            report: validate_character(character, catalog),
        }
    }

    /// Render as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render as a plain-text sheet.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        let _ = writeln!(out, "{name} ({})", self.ancestry);
        let _ = writeln!(out);

        let _ = writeln!(out, "Attributes  {}", pool_line(&self.pools.attributes));
        for (attribute, rank) in &self.attributes {
            let _ = writeln!(out, "  {attribute:<12} {rank}");
        }

        let _ = writeln!(out, "Skills      {}", pool_line(&self.pools.skills));
        for (skill, rank) in &self.skills {
            let _ = writeln!(out, "  {skill:<20} {rank}");
        }

        let hindrances = &self.pools.hindrances;
        let _ = writeln!(
            out,
            "Hindrances  {}/{} points ({}/{} minor)",
            hindrances.used, hindrances.cap, hindrances.minor_used, hindrances.minor_cap
        );
        for (name, severity) in &self.hindrances {
            let _ = writeln!(out, "  {name} ({severity})");
        }

        let edges = &self.pools.edges;
        let _ = writeln!(out, "Edges       {}/{} slots", edges.used, edges.total);
        for name in &self.edges {
            let _ = writeln!(out, "  {name}");
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Pace {}  Parry {}  Toughness {}  Funds ${}",
            self.stats.pace, self.stats.parry, self.stats.toughness, self.starting_funds
        );

        for error in &self.report.errors {
            let _ = writeln!(out, "error: {error}");
        }
        for warning in &self.report.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
        out
    }
}

fn pool_line(pool: &PoolSummary) -> String {
    format!("{}/{} points", pool.used, pool.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargen_test_utils::fixtures::{fighter, standard_catalog};

    #[test]
    fn test_fighter_text() {
        let catalog = standard_catalog();
        let summary = CharacterSummary::new(&fighter(&catalog), &catalog);
        let text = summary.to_text();
        assert!(text.starts_with("Brakka (Human)"));
        assert!(text.contains("Attributes  5/5 points"));
        assert!(text.contains("Pace 6  Parry 6  Toughness 7  Funds $500"));
        assert!(!text.contains("error:"));
    }

    #[test]
    fn test_json_fields() {
        let catalog = standard_catalog();
        let summary = CharacterSummary::new(&fighter(&catalog), &catalog);
        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(value["stats"]["toughness"], 7);
        assert_eq!(value["pools"]["edges"]["total"], 2);
        assert_eq!(value["edges"].as_array().map(Vec::len), Some(2));
    }
}
