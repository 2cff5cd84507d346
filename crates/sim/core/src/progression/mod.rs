//! Progression ledger - levels, experience, and skills.
//!
//! XP thresholds grow geometrically per level. Level-ups award attribute
//! and skill points; attribute points raise RPG stats through the stat
//! ledger, skill points buy ranks in an injected [`SkillCatalog`].

pub mod ledger;
pub mod skill;

pub use ledger::{ProgressionLedger, SkillError};
pub use skill::{ActiveSkill, SkillCatalog, SkillCategory, SkillDefinition, XpSource};
