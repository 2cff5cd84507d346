//! Level, experience, and unlocked skills for one subject.

use std::collections::BTreeMap;

use thiserror::Error;

use super::skill::{ActiveSkill, SkillCatalog, XpSource};
use crate::config::SimConfig;
use crate::event::{EventQueue, SimEvent};
use crate::stats::{StatCategory, StatKind, StatLedger};

#[derive(Debug, Error, PartialEq)]
pub enum SkillError {
    #[error("unknown skill id `{0}`")]
    UnknownSkill(String),
    #[error("skill `{0}` is already unlocked")]
    AlreadyUnlocked(String),
    #[error("skill `{0}` is not unlocked")]
    NotUnlocked(String),
    #[error("skill `{skill}` requires `{prerequisite}` first")]
    MissingPrerequisite { skill: String, prerequisite: String },
    #[error("character level {required} required")]
    LevelTooLow { required: u32 },
    #[error("skill `{0}` is already at its maximum rank")]
    MaxRankReached(String),
    #[error("not enough skill points ({available} of {needed})")]
    InsufficientSkillPoints { needed: u32, available: u32 },
    #[error("no attribute points left")]
    NoAttributePoints,
    #[error("{0} is not a spendable attribute")]
    NotAnAttribute(StatKind),
}

/// Character progression: level, XP, point pools, and unlocked skills.
///
/// XP thresholds grow geometrically; a single grant can clear several
/// levels in one call. The level cap is administrative and stops both
/// leveling and further XP accumulation past the final threshold.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionLedger {
    level: u32,
    /// XP toward the next level (resets on level-up).
    xp: u32,
    attribute_points: u32,
    skill_points: u32,
    skills: BTreeMap<String, ActiveSkill>,
    /// Fractional simulated minutes not yet converted into survival XP.
    survival_accumulator: f32,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionLedger {
    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            attribute_points: 0,
            skill_points: 0,
            skills: BTreeMap::new(),
            survival_accumulator: 0.0,
        }
    }

    // ========================================================================
    // Experience
    // ========================================================================

    /// XP needed to clear the current level.
    pub fn xp_to_next_level(&self, config: &SimConfig) -> u32 {
        let scale = config.xp_multiplier.powi(self.level.saturating_sub(1) as i32);
        (config.xp_base as f32 * scale).floor() as u32
    }

    /// Grants XP and resolves any resulting level-ups.
    pub fn grant_xp(
        &mut self,
        amount: u32,
        source: XpSource,
        config: &SimConfig,
        events: &mut EventQueue,
    ) {
        if amount == 0 || self.level >= config.level_cap {
            return;
        }
        self.xp += amount;
        events.push(SimEvent::XpGained { amount, source });

        loop {
            let threshold = self.xp_to_next_level(config);
            if self.level >= config.level_cap || self.xp < threshold {
                break;
            }
            self.xp -= threshold;
            self.level += 1;
            self.attribute_points += config.attribute_points_per_level;
            self.skill_points += config.skill_points_per_level;
            events.push(SimEvent::LevelUp {
                new_level: self.level,
            });
        }
        if self.level >= config.level_cap {
            // Leftover XP past the cap is discarded.
            self.xp = 0;
        }
    }

    /// Converts survived game time into passive XP, one simulated minute
    /// at a time.
    pub fn tick_survival(
        &mut self,
        game_minutes: f32,
        config: &SimConfig,
        events: &mut EventQueue,
    ) {
        if config.survival_xp_per_minute == 0 || game_minutes <= 0.0 {
            return;
        }
        self.survival_accumulator += game_minutes;
        let whole = self.survival_accumulator.floor();
        if whole >= 1.0 {
            self.survival_accumulator -= whole;
            self.grant_xp(
                whole as u32 * config.survival_xp_per_minute,
                XpSource::Survival,
                config,
                events,
            );
        }
    }

    // ========================================================================
    // Skills
    // ========================================================================

    /// Unlocks a skill at rank 1. Fails if it is already unlocked or any
    /// gate (level, prerequisites, point cost) is unmet.
    pub fn unlock_skill(
        &mut self,
        id: &str,
        catalog: &SkillCatalog,
        events: &mut EventQueue,
    ) -> Result<(), SkillError> {
        let definition = catalog
            .get(id)
            .ok_or_else(|| SkillError::UnknownSkill(id.to_owned()))?;

        if self.skills.contains_key(id) {
            return Err(SkillError::AlreadyUnlocked(id.to_owned()));
        }
        if self.level < definition.required_level {
            return Err(SkillError::LevelTooLow {
                required: definition.required_level,
            });
        }
        for prerequisite in &definition.prerequisites {
            if !self.skills.contains_key(prerequisite) {
                return Err(SkillError::MissingPrerequisite {
                    skill: id.to_owned(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
        self.spend_skill_points(definition.cost_per_level)?;

        self.skills.insert(
            id.to_owned(),
            ActiveSkill {
                definition: definition.clone(),
                level: 1,
            },
        );
        events.push(SimEvent::SkillUnlocked {
            id: id.to_owned(),
            level: 1,
        });
        Ok(())
    }

    /// Raises an unlocked skill one rank, spending the same per-rank cost.
    pub fn level_up_skill(&mut self, id: &str, events: &mut EventQueue) -> Result<(), SkillError> {
        let Some(skill) = self.skills.get(id) else {
            return Err(SkillError::NotUnlocked(id.to_owned()));
        };
        if skill.level >= skill.definition.max_level {
            return Err(SkillError::MaxRankReached(id.to_owned()));
        }
        let cost = skill.definition.cost_per_level;
        self.spend_skill_points(cost)?;

        let skill = self
            .skills
            .get_mut(id)
            .ok_or_else(|| SkillError::NotUnlocked(id.to_owned()))?;
        skill.level += 1;
        events.push(SimEvent::SkillLeveled {
            id: id.to_owned(),
            level: skill.level,
        });
        Ok(())
    }

    fn spend_skill_points(&mut self, cost: u32) -> Result<(), SkillError> {
        if self.skill_points < cost {
            return Err(SkillError::InsufficientSkillPoints {
                needed: cost,
                available: self.skill_points,
            });
        }
        self.skill_points -= cost;
        Ok(())
    }

    /// Spends one attribute point to raise an RPG attribute by one.
    pub fn spend_attribute_point(
        &mut self,
        attribute: StatKind,
        stats: &mut StatLedger,
        events: &mut EventQueue,
    ) -> Result<(), SkillError> {
        if attribute.category() != StatCategory::RpgAttributes {
            return Err(SkillError::NotAnAttribute(attribute));
        }
        if self.attribute_points == 0 {
            return Err(SkillError::NoAttributePoints);
        }
        self.attribute_points -= 1;
        stats.set_base_max(attribute, stats.base_max(attribute) + 1.0);
        stats.set_max(attribute, stats.max(attribute) + 1.0, events);
        stats.apply_delta(attribute, 1.0, events);
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn attribute_points(&self) -> u32 {
        self.attribute_points
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn has_skill(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    pub fn skill_rank(&self, id: &str) -> u32 {
        self.skills.get(id).map_or(0, |s| s.level)
    }

    pub fn skills(&self) -> impl Iterator<Item = &ActiveSkill> {
        self.skills.values()
    }
}
