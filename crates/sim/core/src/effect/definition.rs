//! Status-effect definitions and the catalog they are looked up in.

use std::collections::BTreeMap;

use strum::Display;

use crate::stats::StatKind;

/// Lifecycle class of an effect. The type decides what re-applying an
/// already-active effect does: `Stackable` adds stacks and resets the
/// timer, `Temporary` just refreshes the timer, and the other two reject
/// the call outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectType {
    /// Timed, single-instance; reapplication refreshes the timer.
    Temporary,
    /// Present while some external condition holds; the owner removes it.
    Conditional,
    /// Never expires on its own.
    Permanent,
    /// Timed and stackable up to `max_stacks`.
    Stackable,
}

/// One stat adjustment carried by an effect.
///
/// Used in two roles: as a per-second delta on the stat's current value
/// (`tick_modifiers`) and as a reshaping of the stat's maximum
/// (`max_modifiers`). In both roles flats sum and multipliers scale the
/// summed result, gathered in descending effect priority.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub flat: f32,
    pub multiplier: f32,
}

impl StatModifier {
    pub fn flat(stat: StatKind, flat: f32) -> Self {
        Self {
            stat,
            flat,
            multiplier: 1.0,
        }
    }

    pub fn scaled(stat: StatKind, multiplier: f32) -> Self {
        Self {
            stat,
            flat: 0.0,
            multiplier,
        }
    }
}

/// Immutable template for a status effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    /// Stable identifier used by apply/remove calls and content files.
    pub id: String,
    pub name: String,
    pub effect_type: EffectType,
    /// Seconds until expiry; `None` lasts until removed. Ignored for
    /// `Permanent` effects.
    pub duration: Option<f32>,
    /// Stack cap; only meaningful for `Stackable`.
    pub max_stacks: u32,
    /// Higher priority composes first when modifiers are gathered.
    pub priority: i32,
    /// Free-form labels for batch removal (`poison`, `disease`, ...).
    pub tags: Vec<String>,
    /// Per-second deltas on stat current values, scaled by stack count.
    pub tick_modifiers: Vec<StatModifier>,
    /// Reshapes stat maxima while the effect is active.
    pub max_modifiers: Vec<StatModifier>,
}

impl EffectDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect_type: EffectType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect_type,
            duration: None,
            max_stacks: 1,
            priority: 0,
            tags: Vec::new(),
            tick_modifiers: Vec::new(),
            max_modifiers: Vec::new(),
        }
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_max_stacks(mut self, stacks: u32) -> Self {
        self.max_stacks = stacks.max(1);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tick_modifier(mut self, modifier: StatModifier) -> Self {
        self.tick_modifiers.push(modifier);
        self
    }

    pub fn with_max_modifier(mut self, modifier: StatModifier) -> Self {
        self.max_modifiers.push(modifier);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Lookup table of effect definitions, keyed by id.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectCatalog {
    definitions: BTreeMap<String, EffectDefinition>,
}

impl EffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: EffectDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn with(mut self, definition: EffectDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, id: &str) -> Option<&EffectDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.definitions.values()
    }
}
