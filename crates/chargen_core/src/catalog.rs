//! Compiled, read-only catalog.
//!
//! [`Catalog::compile`] turns [`CatalogData`] into indexed lookups, parses
//! every edge's requirement text into [`Requirement`]s, and folds all
//! `exclusive_with` declarations into one symmetric [`ExclusionTable`].
//! The result is immutable and shared by reference with every engine call.

use std::collections::{BTreeMap, BTreeSet};

use crate::character::CharacterState;
use crate::data::{AncestryData, CatalogData, EdgeData, GameRules, HindranceData, SkillData};
use crate::error::{ChargenError, Result};
use crate::requirements::{is_family_member, parse_requirements, Requirement};

/// An edge with its requirements parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledEdge {
    /// Original catalog entry.
    pub data: EdgeData,
    /// Parsed prerequisites, in catalog order.
    pub requirements: Vec<Requirement>,
}

impl CompiledEdge {
    /// Edge name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }
}

/// Symmetric "cannot be held together" relation over trait names.
///
/// Edges and hindrances share one namespace, so an edge may exclude a
/// hindrance (Luck and Bad Luck).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionTable {
    partners: BTreeMap<String, BTreeSet<String>>,
}

impl ExclusionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `a` and `b` exclude each other.
    pub fn insert(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.partners
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.partners
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Whether `a` and `b` exclude each other, in either direction.
    #[must_use]
    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        self.partners.get(a).is_some_and(|set| set.contains(b))
    }

    /// Every name that `name` excludes.
    pub fn partners_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.partners
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Number of distinct excluded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partners.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// Indexed ruleset reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: GameRules,
    default_ancestry: String,
    skills: BTreeMap<String, SkillData>,
    hindrances: BTreeMap<String, HindranceData>,
    edges: BTreeMap<String, CompiledEdge>,
    ancestries: BTreeMap<String, AncestryData>,
    exclusions: ExclusionTable,
}

impl Catalog {
    /// Compile catalog data.
    ///
    /// Dangling references (exclusions or requirements naming things the
    /// catalog lacks) are logged and tolerated; see [`CatalogData::validate`]
    /// for the full list.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InvalidCatalog`] if the rules are malformed,
    /// a name is defined twice, or the default ancestry is missing.
    pub fn compile(data: CatalogData) -> Result<Self> {
        let rule_errors = data.rules.validate();
        if !rule_errors.is_empty() {
            return Err(ChargenError::InvalidCatalog(rule_errors.join("; ")));
        }

        for problem in data.validate() {
            tracing::warn!(%problem, "Catalog inconsistency");
        }

        let edge_names: Vec<&str> = data.edges.iter().map(|e| e.name.as_str()).collect();
        let mut edges = BTreeMap::new();
        for edge in &data.edges {
            let requirements = parse_requirements(&edge.requirements, &edge_names);
            let compiled = CompiledEdge {
                data: edge.clone(),
                requirements,
            };
            insert_unique(&mut edges, "edge", &edge.name, compiled)?;
        }

        let mut exclusions = ExclusionTable::new();
        for hindrance in &data.hindrances {
            for other in &hindrance.exclusive_with {
                exclusions.insert(&hindrance.name, other);
            }
        }
        for edge in &data.edges {
            for other in &edge.exclusive_with {
                exclusions.insert(&edge.name, other);
            }
        }

        let mut skills = BTreeMap::new();
        for skill in data.skills {
            let name = skill.name.clone();
            insert_unique(&mut skills, "skill", &name, skill)?;
        }
        let mut hindrances = BTreeMap::new();
        for hindrance in data.hindrances {
            let name = hindrance.name.clone();
            insert_unique(&mut hindrances, "hindrance", &name, hindrance)?;
        }
        let mut ancestries = BTreeMap::new();
        for ancestry in data.ancestries {
            let name = ancestry.name.clone();
            insert_unique(&mut ancestries, "ancestry", &name, ancestry)?;
        }

        if !ancestries.contains_key(&data.default_ancestry) {
            return Err(ChargenError::InvalidCatalog(format!(
                "Default ancestry '{}' not found",
                data.default_ancestry
            )));
        }

        tracing::debug!(
            skills = skills.len(),
            hindrances = hindrances.len(),
            edges = edges.len(),
            ancestries = ancestries.len(),
            exclusions = exclusions.len(),
            "Catalog compiled"
        );

        Ok(Self {
            rules: data.rules,
            default_ancestry: data.default_ancestry,
            skills,
            hindrances,
            edges,
            ancestries,
            exclusions,
        })
    }

    /// Global rules.
    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Name of the ancestry new characters start with.
    #[must_use]
    pub fn default_ancestry(&self) -> &str {
        &self.default_ancestry
    }

    /// A fresh character: every attribute at the minimum rank, nothing
    /// selected, default ancestry.
    #[must_use]
    pub fn new_character(&self) -> CharacterState {
        CharacterState::with_rules(&self.rules, &self.default_ancestry)
    }

    /// Look up a standard skill.
    #[must_use]
    pub fn skill(&self, name: &str) -> Option<&SkillData> {
        self.skills.get(name)
    }

    /// Look up a hindrance.
    #[must_use]
    pub fn hindrance(&self, name: &str) -> Option<&HindranceData> {
        self.hindrances.get(name)
    }

    /// Look up a compiled edge.
    #[must_use]
    pub fn edge(&self, name: &str) -> Option<&CompiledEdge> {
        self.edges.get(name)
    }

    /// Look up an ancestry.
    #[must_use]
    pub fn ancestry(&self, name: &str) -> Option<&AncestryData> {
        self.ancestries.get(name)
    }

    /// All standard skills, sorted by name.
    pub fn skills(&self) -> impl Iterator<Item = &SkillData> {
        self.skills.values()
    }

    /// All hindrances, sorted by name.
    pub fn hindrances(&self) -> impl Iterator<Item = &HindranceData> {
        self.hindrances.values()
    }

    /// All edges, sorted by name.
    pub fn edges(&self) -> impl Iterator<Item = &CompiledEdge> {
        self.edges.values()
    }

    /// All ancestries, sorted by name.
    pub fn ancestries(&self) -> impl Iterator<Item = &AncestryData> {
        self.ancestries.values()
    }

    /// Edges in a category, sorted by name.
    pub fn edges_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CompiledEdge> + 'a {
        self.edges
            .values()
            .filter(move |e| e.data.category.eq_ignore_ascii_case(category))
    }

    /// Edges whose names start a family prefix.
    pub fn edge_family<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a CompiledEdge> + 'a {
        self.edges
            .values()
            .filter(move |e| is_family_member(e.name(), prefix))
    }

    /// The symmetric exclusion table.
    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionTable {
        &self.exclusions
    }

    /// Whether two traits exclude each other.
    #[must_use]
    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        self.exclusions.conflicts(a, b)
    }
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    kind: &str,
    name: &str,
    value: T,
) -> Result<()> {
    if map.insert(name.to_string(), value).is_some() {
        return Err(ChargenError::InvalidCatalog(format!(
            "Duplicate {kind} '{name}'"
        )));
    }
    Ok(())
}
