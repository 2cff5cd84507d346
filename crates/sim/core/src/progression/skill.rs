//! Skill definitions, the skill catalog, and XP attribution.

use std::collections::BTreeMap;

use strum::{Display, EnumIter};

/// Where a grant of experience came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XpSource {
    /// Passive grant for staying alive, per simulated minute.
    Survival,
    Combat,
    Crafting,
    Exploration,
    Quest,
    /// Direct grants from tooling or scripts.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCategory {
    Combat,
    Survival,
    Crafting,
    Medical,
    Social,
}

/// Immutable template for one learnable skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    /// Highest learnable rank.
    pub max_level: u32,
    /// Skill points per rank.
    pub cost_per_level: u32,
    /// Character level needed to learn rank 1.
    pub required_level: u32,
    /// Skill ids that must be unlocked first.
    pub prerequisites: Vec<String>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            max_level: 1,
            cost_per_level: 1,
            required_level: 1,
            prerequisites: Vec::new(),
        }
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    pub fn with_cost(mut self, cost_per_level: u32) -> Self {
        self.cost_per_level = cost_per_level;
        self
    }

    pub fn with_required_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    pub fn with_prerequisite(mut self, id: impl Into<String>) -> Self {
        self.prerequisites.push(id.into());
        self
    }
}

/// An unlocked skill and its current rank.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSkill {
    pub definition: SkillDefinition,
    pub level: u32,
}

/// Lookup table of skill definitions, keyed by id.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCatalog {
    definitions: BTreeMap<String, SkillDefinition>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: SkillDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn with(mut self, definition: SkillDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.definitions.values()
    }
}
