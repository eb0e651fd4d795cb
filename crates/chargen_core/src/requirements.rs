//! Parsed edge prerequisites.
//!
//! Catalog requirement text such as `"Novice, Smarts d8+, Arcane
//! Background (Any)"` is turned into [`Requirement`] values once, when the
//! catalog is compiled. Validation then matches on the variants instead of
//! re-reading text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, DieRank};

/// Advancement rank tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Starting rank.
    Novice,
    /// Second tier.
    Seasoned,
    /// Third tier.
    Veteran,
    /// Fourth tier.
    Heroic,
    /// Final tier.
    Legendary,
}

impl Rank {
    /// Every new character is created at this rank.
    pub const CREATION: Self = Self::Novice;

    const ALL: [Self; 5] = [
        Self::Novice,
        Self::Seasoned,
        Self::Veteran,
        Self::Heroic,
        Self::Legendary,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Seasoned => "Seasoned",
            Self::Veteran => "Veteran",
            Self::Heroic => "Heroic",
            Self::Legendary => "Legendary",
        }
    }

    /// Parse a rank keyword, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|rank| rank.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single prerequisite of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// Character must be at least this rank.
    RankAtLeast(Rank),
    /// Attribute must be at least this die.
    AttributeAtLeast {
        /// Attribute checked.
        attribute: Attribute,
        /// Minimum die.
        rank: DieRank,
    },
    /// Skill must be at least this die; untrained counts as 0.
    SkillAtLeast {
        /// Skill checked.
        skill: String,
        /// Minimum die.
        rank: DieRank,
    },
    /// A specific edge must already be selected.
    HasEdge {
        /// Required edge.
        name: String,
    },
    /// Any edge whose name starts with the prefix must be selected.
    HasEdgeFamily {
        /// Name prefix, e.g. "Arcane Background".
        prefix: String,
    },
    /// At least one alternative must hold ("Fighting d8+ or Shooting d8+").
    AnyOf(Vec<Requirement>),
    /// Text the parser could not classify. Never blocks selection.
    Unrecognized(String),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RankAtLeast(rank) => write!(f, "{rank}"),
            Self::AttributeAtLeast { attribute, rank } => write!(f, "{attribute} {rank}+"),
            Self::SkillAtLeast { skill, rank } => write!(f, "{skill} {rank}+"),
            Self::HasEdge { name } => f.write_str(name),
            Self::HasEdgeFamily { prefix } => write!(f, "{prefix} (Any)"),
            Self::AnyOf(options) => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{option}")?;
                }
                Ok(())
            }
            Self::Unrecognized(text) => f.write_str(text),
        }
    }
}

/// Parse a requirement string into its parts.
///
/// `known_edges` lists every edge name in the catalog; it decides whether
/// a bare fragment is an edge dependency and whether a bare prefix names
/// a family of edges.
#[must_use]
pub fn parse_requirements(text: &str, known_edges: &[&str]) -> Vec<Requirement> {
    text.split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| parse_fragment(fragment, known_edges))
        .collect()
}

fn parse_fragment(fragment: &str, known_edges: &[&str]) -> Requirement {
    let alternatives: Vec<&str> = split_alternatives(fragment);
    if alternatives.len() > 1 {
        return Requirement::AnyOf(
            alternatives
                .into_iter()
                .map(|alt| parse_single(alt, known_edges))
                .collect(),
        );
    }
    parse_single(fragment, known_edges)
}

fn split_alternatives(fragment: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = fragment;
    while let Some(index) = find_ignore_case(rest, " or ") {
        parts.push(rest[..index].trim());
        rest = &rest[index + 4..];
    }
    parts.push(rest.trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(needle)
}

fn parse_single(fragment: &str, known_edges: &[&str]) -> Requirement {
    if let Some(rank) = Rank::from_name(fragment) {
        return Requirement::RankAtLeast(rank);
    }

    if let Some((name, rank)) = parse_threshold(fragment) {
        return match Attribute::from_name(name) {
            Some(attribute) => Requirement::AttributeAtLeast { attribute, rank },
            None => Requirement::SkillAtLeast {
                skill: name.to_string(),
                rank,
            },
        };
    }

    if let Some(prefix) = strip_suffix_ignore_case(fragment, "(any)") {
        return Requirement::HasEdgeFamily {
            prefix: prefix.trim().to_string(),
        };
    }

    if let Some(name) = known_edges.iter().find(|e| e.eq_ignore_ascii_case(fragment)) {
        return Requirement::HasEdge {
            name: (*name).to_string(),
        };
    }

    if known_edges.iter().any(|e| is_family_member(e, fragment)) {
        return Requirement::HasEdgeFamily {
            prefix: fragment.to_string(),
        };
    }

    // "Seasoned Rank", "veteran rank or higher"
    if let Some(rank) = rank_word(fragment) {
        return Requirement::RankAtLeast(rank);
    }

    Requirement::Unrecognized(fragment.to_string())
}

/// Highest rank keyword appearing as a whole word in `fragment`.
fn rank_word(fragment: &str) -> Option<Rank> {
    fragment
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter_map(Rank::from_name)
        .max()
}

/// Split `"<name> d<N>+"` into the name and die.
fn parse_threshold(fragment: &str) -> Option<(&str, DieRank)> {
    let (name, die) = fragment.trim().rsplit_once(' ')?;
    let die = die.strip_prefix(['d', 'D'])?;
    let die = die.strip_suffix('+').unwrap_or(die);
    let sides: u8 = die.parse().ok()?;
    let rank = DieRank::new(sides);
    if !rank.is_attribute_rank() || name.trim().is_empty() {
        return None;
    }
    Some((name.trim(), rank))
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Whether `edge` belongs to the family named by `prefix`.
///
/// Family members continue the prefix with a space, as in
/// "Arcane Background (Magic)".
#[must_use]
pub fn is_family_member(edge: &str, prefix: &str) -> bool {
    edge.len() > prefix.len()
        && edge.is_char_boundary(prefix.len())
        && edge[..prefix.len()].eq_ignore_ascii_case(prefix)
        && edge[prefix.len()..].starts_with(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: &[&str] = &[
        "Luck",
        "Great Luck",
        "Block",
        "Arcane Background (Magic)",
        "Arcane Background (Miracles)",
    ];

    #[test]
    fn test_parse_rank_keywords() {
        assert_eq!(
            parse_requirements("Seasoned", EDGES),
            vec![Requirement::RankAtLeast(Rank::Seasoned)]
        );
        assert_eq!(
            parse_requirements("novice", EDGES),
            vec![Requirement::RankAtLeast(Rank::Novice)]
        );
    }

    #[test]
    fn test_parse_rank_keyword_inside_phrase() {
        assert_eq!(
            parse_requirements("Seasoned Rank, Smarts d6+", EDGES)[0],
            Requirement::RankAtLeast(Rank::Seasoned)
        );
        assert_eq!(
            parse_requirements("Veteran rank", EDGES),
            vec![Requirement::RankAtLeast(Rank::Veteran)]
        );
        assert_eq!(
            parse_requirements("Rank: heroic.", EDGES),
            vec![Requirement::RankAtLeast(Rank::Heroic)]
        );
    }

    #[test]
    fn test_rank_word_needs_whole_word() {
        assert_eq!(
            parse_requirements("Noviceship", EDGES),
            vec![Requirement::Unrecognized("Noviceship".to_string())]
        );
    }

    #[test]
    fn test_parse_attribute_and_skill_thresholds() {
        let parsed = parse_requirements("Novice, Smarts d8+, Fighting d6+", EDGES);
        assert_eq!(
            parsed,
            vec![
                Requirement::RankAtLeast(Rank::Novice),
                Requirement::AttributeAtLeast {
                    attribute: Attribute::Smarts,
                    rank: DieRank::D8,
                },
                Requirement::SkillAtLeast {
                    skill: "Fighting".to_string(),
                    rank: DieRank::D6,
                },
            ]
        );
    }

    #[test]
    fn test_parse_multi_word_skill() {
        assert_eq!(
            parse_requirements("Common Knowledge d8+", EDGES),
            vec![Requirement::SkillAtLeast {
                skill: "Common Knowledge".to_string(),
                rank: DieRank::D8,
            }]
        );
    }

    #[test]
    fn test_parse_edge_dependency() {
        assert_eq!(
            parse_requirements("Novice, Luck", EDGES)[1],
            Requirement::HasEdge {
                name: "Luck".to_string()
            }
        );
    }

    #[test]
    fn test_parse_edge_family() {
        let expected = Requirement::HasEdgeFamily {
            prefix: "Arcane Background".to_string(),
        };
        assert_eq!(
            parse_requirements("Arcane Background (Any)", EDGES),
            vec![expected.clone()]
        );
        assert_eq!(
            parse_requirements("Arcane Background", EDGES),
            vec![expected]
        );
    }

    #[test]
    fn test_parse_alternatives() {
        let parsed = parse_requirements("Fighting d8+ or Shooting d8+", EDGES);
        assert_eq!(parsed.len(), 1);
        let Requirement::AnyOf(options) = &parsed[0] else {
            panic!("expected AnyOf, got {:?}", parsed[0]);
        };
        assert_eq!(options.len(), 2);
        assert_eq!(parsed[0].to_string(), "Fighting d8+ or Shooting d8+");
    }

    #[test]
    fn test_unrecognized_is_kept() {
        assert_eq!(
            parse_requirements("Wild Card", EDGES),
            vec![Requirement::Unrecognized("Wild Card".to_string())]
        );
    }

    #[test]
    fn test_family_member() {
        assert!(is_family_member("Arcane Background (Magic)", "Arcane Background"));
        assert!(!is_family_member("Arcane Background", "Arcane Background"));
        assert!(!is_family_member("Arcane Backgrounds", "Arcane Background"));
    }

    #[test]
    fn test_empty_requirements() {
        assert!(parse_requirements("", EDGES).is_empty());
        assert!(parse_requirements(" , ", EDGES).is_empty());
    }
}
