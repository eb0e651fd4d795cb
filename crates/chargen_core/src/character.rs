//! The character being built.
//!
//! [`CharacterState`] is a plain value: the host owns it, passes it to the
//! engine by reference, and mutates it only through the methods here.
//! Every mutation either applies completely or returns an error with the
//! state untouched. Budgets are deliberately not enforced by mutations;
//! an over-budget character is a normal, representable state that
//! [`pools`](crate::pools) and [`report`](crate::report) describe.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, Attributes, DieRank};
use crate::catalog::Catalog;
use crate::data::{GameRules, Severity};
use crate::error::{ChargenError, Result};
use crate::prerequisites::{self, Validation};

/// Ancestry used by [`CharacterState::default`].
pub const DEFAULT_ANCESTRY: &str = "Human";

/// Attribute assumed for a skill neither the catalog nor the character knows.
pub const DEFAULT_LINKED_ATTRIBUTE: Attribute = Attribute::Agility;

/// A selected hindrance, with the points it was worth when taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HindranceSelection {
    /// Severity tier.
    pub severity: Severity,
    /// Hindrance points contributed.
    pub points: u32,
}

impl HindranceSelection {
    /// Selection at the standard point value for `severity`.
    #[must_use]
    pub const fn new(severity: Severity) -> Self {
        Self {
            severity,
            points: severity.points(),
        }
    }

    /// Whether this is a minor hindrance.
    #[must_use]
    pub const fn is_minor(&self) -> bool {
        matches!(self.severity, Severity::Minor)
    }
}

/// Mutable record of a character under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterState {
    name: String,
    attributes: Attributes,
    /// Trained skills only; an absent key means untrained.
    skills: BTreeMap<String, DieRank>,
    custom_skills: BTreeMap<String, Attribute>,
    hindrances: BTreeMap<String, HindranceSelection>,
    edges: BTreeSet<String>,
    ancestry: String,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::with_rules(&GameRules::default(), DEFAULT_ANCESTRY)
    }
}

impl CharacterState {
    /// A fresh character with attributes at the rules' minimum rank.
    #[must_use]
    pub fn with_rules(rules: &GameRules, ancestry: &str) -> Self {
        Self {
            name: String::new(),
            attributes: Attributes::uniform(rules.min_rank()),
            skills: BTreeMap::new(),
            custom_skills: BTreeMap::new(),
            hindrances: BTreeMap::new(),
            edges: BTreeSet::new(),
            ancestry: ancestry.to_string(),
        }
    }

    /// Replace this character wholesale with a fresh default.
    pub fn reset(&mut self, catalog: &Catalog) {
        *self = catalog.new_character();
        tracing::debug!("Character reset");
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Character name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the character name. Names carry no rules meaning.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// All attribute ranks.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// One attribute's rank.
    #[must_use]
    pub const fn attribute(&self, attribute: Attribute) -> DieRank {
        self.attributes.get(attribute)
    }

    /// Trained skills and their ranks.
    #[must_use]
    pub const fn skills(&self) -> &BTreeMap<String, DieRank> {
        &self.skills
    }

    /// A skill's rank, untrained if absent.
    #[must_use]
    pub fn skill_rank(&self, skill: &str) -> DieRank {
        self.skills.get(skill).copied().unwrap_or(DieRank::UNTRAINED)
    }

    /// Custom skills registered on this character.
    #[must_use]
    pub const fn custom_skills(&self) -> &BTreeMap<String, Attribute> {
        &self.custom_skills
    }

    /// Selected hindrances.
    #[must_use]
    pub const fn hindrances(&self) -> &BTreeMap<String, HindranceSelection> {
        &self.hindrances
    }

    /// Whether a hindrance is selected.
    #[must_use]
    pub fn has_hindrance(&self, name: &str) -> bool {
        self.hindrances.contains_key(name)
    }

    /// Selected edges.
    #[must_use]
    pub const fn edges(&self) -> &BTreeSet<String> {
        &self.edges
    }

    /// Whether an edge is selected.
    #[must_use]
    pub fn has_edge(&self, name: &str) -> bool {
        self.edges.contains(name)
    }

    /// Whether an edge or hindrance with this name is selected.
    #[must_use]
    pub fn has_trait(&self, name: &str) -> bool {
        self.has_edge(name) || self.has_hindrance(name)
    }

    /// Ancestry name.
    #[must_use]
    pub fn ancestry(&self) -> &str {
        &self.ancestry
    }

    /// The attribute a skill is linked to, if the skill is known.
    #[must_use]
    pub fn resolve_skill(&self, catalog: &Catalog, skill: &str) -> Option<Attribute> {
        catalog
            .skill(skill)
            .map(|s| s.linked_attribute)
            .or_else(|| self.custom_skills.get(skill).copied())
    }

    /// The attribute a skill is linked to, defaulting for unknown skills.
    #[must_use]
    pub fn linked_attribute(&self, catalog: &Catalog, skill: &str) -> Attribute {
        self.resolve_skill(catalog, skill).unwrap_or_else(|| {
            tracing::warn!(
                skill,
                default = %DEFAULT_LINKED_ATTRIBUTE,
                "Unknown skill; using default linked attribute"
            );
            DEFAULT_LINKED_ATTRIBUTE
        })
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Raise an attribute one step.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::AttributeOutOfRange`] at the top of the sequence.
    pub fn increment_attribute(
        &mut self,
        rules: &GameRules,
        attribute: Attribute,
    ) -> Result<DieRank> {
        let current = self.attribute(attribute);
        let next = rules
            .next_rank(current)
            .ok_or(ChargenError::AttributeOutOfRange {
                attribute,
                rank: current,
            })?;
        *self.attributes.get_mut(attribute) = next;
        tracing::debug!(%attribute, rank = %next, "Attribute raised");
        self.debug_check();
        Ok(next)
    }

    /// Lower an attribute one step.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::AttributeOutOfRange`] at the bottom of the sequence.
    pub fn decrement_attribute(
        &mut self,
        rules: &GameRules,
        attribute: Attribute,
    ) -> Result<DieRank> {
        let current = self.attribute(attribute);
        let previous = rules
            .previous_rank(current)
            .ok_or(ChargenError::AttributeOutOfRange {
                attribute,
                rank: current,
            })?;
        *self.attributes.get_mut(attribute) = previous;
        tracing::debug!(%attribute, rank = %previous, "Attribute lowered");
        self.debug_check();
        Ok(previous)
    }

    /// Set an attribute directly.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InvalidRank`] if `rank` is not in the rules sequence.
    pub fn set_attribute(
        &mut self,
        rules: &GameRules,
        attribute: Attribute,
        rank: DieRank,
    ) -> Result<()> {
        if !rules.is_attribute_rank(rank) {
            return Err(ChargenError::InvalidRank {
                rank,
                context: attribute.name().to_string(),
            });
        }
        *self.attributes.get_mut(attribute) = rank;
        self.debug_check();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------

    /// Set a skill's rank; untrained removes it.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownSkill`] for a skill that is neither in
    /// the catalog nor custom, or [`ChargenError::InvalidRank`] for a rank
    /// outside the skill sequence.
    pub fn set_skill(&mut self, catalog: &Catalog, skill: &str, rank: DieRank) -> Result<()> {
        self.require_skill(catalog, skill)?;
        if !catalog.rules().is_skill_rank(rank) {
            return Err(ChargenError::InvalidRank {
                rank,
                context: skill.to_string(),
            });
        }
        self.store_skill(skill, rank);
        self.debug_check();
        Ok(())
    }

    /// Raise a skill one step (untrained becomes d4).
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownSkill`] or
    /// [`ChargenError::SkillOutOfRange`] at the top of the sequence.
    pub fn increment_skill(&mut self, catalog: &Catalog, skill: &str) -> Result<DieRank> {
        self.require_skill(catalog, skill)?;
        let current = self.skill_rank(skill);
        let next = catalog
            .rules()
            .next_rank(current)
            .ok_or_else(|| ChargenError::SkillOutOfRange {
                skill: skill.to_string(),
                rank: current,
            })?;
        self.store_skill(skill, next);
        tracing::debug!(skill, rank = %next, "Skill raised");
        self.debug_check();
        Ok(next)
    }

    /// Lower a skill one step (d4 becomes untrained).
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownSkill`] or
    /// [`ChargenError::SkillOutOfRange`] if the skill is already untrained.
    pub fn decrement_skill(&mut self, catalog: &Catalog, skill: &str) -> Result<DieRank> {
        self.require_skill(catalog, skill)?;
        let current = self.skill_rank(skill);
        if current.is_untrained() {
            return Err(ChargenError::SkillOutOfRange {
                skill: skill.to_string(),
                rank: current,
            });
        }
        let previous = catalog
            .rules()
            .previous_rank(current)
            .unwrap_or(DieRank::UNTRAINED);
        self.store_skill(skill, previous);
        tracing::debug!(skill, rank = %previous, "Skill lowered");
        self.debug_check();
        Ok(previous)
    }

    /// Register a custom skill linked to an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::InvalidCustomSkill`] if the name is blank,
    /// names an attribute, or collides with an existing skill.
    pub fn add_custom_skill(
        &mut self,
        catalog: &Catalog,
        name: &str,
        linked: Attribute,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty()
            || Attribute::from_name(name).is_some()
            || catalog.skill(name).is_some()
            || self.custom_skills.contains_key(name)
        {
            return Err(ChargenError::InvalidCustomSkill(name.to_string()));
        }
        self.custom_skills.insert(name.to_string(), linked);
        tracing::debug!(skill = name, %linked, "Custom skill added");
        self.debug_check();
        Ok(())
    }

    /// Remove a custom skill and any rank bought in it.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownSkill`] if no such custom skill exists.
    pub fn remove_custom_skill(&mut self, name: &str) -> Result<()> {
        if self.custom_skills.remove(name).is_none() {
            return Err(ChargenError::UnknownSkill(name.to_string()));
        }
        self.skills.remove(name);
        tracing::debug!(skill = name, "Custom skill removed");
        self.debug_check();
        Ok(())
    }

    fn require_skill(&self, catalog: &Catalog, skill: &str) -> Result<()> {
        self.resolve_skill(catalog, skill)
            .map(|_| ())
            .ok_or_else(|| ChargenError::UnknownSkill(skill.to_string()))
    }

    fn store_skill(&mut self, skill: &str, rank: DieRank) {
        if rank.is_untrained() {
            self.skills.remove(skill);
        } else {
            self.skills.insert(skill.to_string(), rank);
        }
    }

    // ------------------------------------------------------------------
    // Ancestry, hindrances, edges
    // ------------------------------------------------------------------

    /// Switch ancestry.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownAncestry`] if the catalog lacks it.
    pub fn set_ancestry(&mut self, catalog: &Catalog, ancestry: &str) -> Result<()> {
        if catalog.ancestry(ancestry).is_none() {
            return Err(ChargenError::UnknownAncestry(ancestry.to_string()));
        }
        self.ancestry = ancestry.to_string();
        tracing::debug!(ancestry, "Ancestry set");
        Ok(())
    }

    /// Take a hindrance if the rules allow it.
    ///
    /// Re-selecting a held hindrance is a no-op reported as valid. A
    /// rejected selection leaves the character unchanged and returns the
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownHindrance`] for names the catalog lacks.
    pub fn select_hindrance(&mut self, catalog: &Catalog, name: &str) -> Result<Validation> {
        let data = catalog
            .hindrance(name)
            .ok_or_else(|| ChargenError::UnknownHindrance(name.to_string()))?;
        if self.has_hindrance(name) {
            return Ok(Validation::Valid);
        }
        let verdict = prerequisites::hindrance_verdict(self, catalog, data);
        if verdict.is_valid() {
            self.hindrances
                .insert(name.to_string(), HindranceSelection::new(data.severity));
            tracing::debug!(hindrance = name, severity = %data.severity, "Hindrance selected");
            self.debug_check();
        }
        Ok(verdict)
    }

    /// Drop a hindrance. Returns whether it was held.
    pub fn deselect_hindrance(&mut self, name: &str) -> bool {
        let removed = self.hindrances.remove(name).is_some();
        if removed {
            tracing::debug!(hindrance = name, "Hindrance deselected");
        }
        removed
    }

    /// Take an edge if its slot, prerequisites and exclusions allow it.
    ///
    /// Requirements are checked only here, at selection time. Re-selecting
    /// a held edge is a no-op reported as valid.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::UnknownEdge`] for names the catalog lacks.
    pub fn select_edge(&mut self, catalog: &Catalog, name: &str) -> Result<Validation> {
        let verdict = prerequisites::can_select_edge(self, catalog, name)?;
        if self.has_edge(name) {
            return Ok(Validation::Valid);
        }
        if verdict.is_valid() {
            self.edges.insert(name.to_string());
            tracing::debug!(edge = name, "Edge selected");
            self.debug_check();
        }
        Ok(verdict)
    }

    /// Drop an edge. Returns whether it was held.
    ///
    /// Edges that depended on it stay selected; see
    /// [`report::validate_character`](crate::report::validate_character).
    pub fn deselect_edge(&mut self, name: &str) -> bool {
        let removed = self.edges.remove(name);
        if removed {
            tracing::debug!(edge = name, "Edge deselected");
        }
        removed
    }

    // ------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------

    /// Structural problems that no engine mutation can produce but a
    /// hand-edited or corrupted snapshot might contain.
    #[must_use]
    pub fn check_structure(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (attribute, rank) in self.attributes.iter() {
            if !rank.is_attribute_rank() {
                problems.push(format!("{attribute} has invalid rank {}", rank.value()));
            }
        }
        for (skill, rank) in &self.skills {
            if rank.is_untrained() {
                problems.push(format!("Skill '{skill}' stored as untrained"));
            } else if !rank.is_skill_rank() {
                problems.push(format!("Skill '{skill}' has invalid rank {}", rank.value()));
            }
        }
        for (name, selection) in &self.hindrances {
            if selection.points != selection.severity.points() {
                problems.push(format!(
                    "Hindrance '{name}' is worth {} points as {}",
                    selection.points, selection.severity
                ));
            }
        }
        if self.ancestry.trim().is_empty() {
            problems.push("Character has no ancestry".to_string());
        }

        problems
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(feature = "debug-validation")]
        {
            let problems = self.check_structure();
            debug_assert!(problems.is_empty(), "Character invariants violated: {problems:?}");
        }
    }
}
