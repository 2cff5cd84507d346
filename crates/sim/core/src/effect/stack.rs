//! The bounded set of effects active on one subject.

use arrayvec::ArrayVec;
use thiserror::Error;

use super::definition::{EffectCatalog, EffectDefinition, EffectType};
use crate::config::SimConfig;
use crate::event::{EventQueue, SimEvent};
use crate::stats::{StatKind, StatLedger};

#[derive(Debug, Error, PartialEq)]
pub enum EffectError {
    #[error("unknown effect id `{0}`")]
    UnknownEffect(String),
    #[error("effect `{0}` is already active and its type does not stack")]
    NotStackable(String),
    #[error("active effect list is full ({max} effects)")]
    CapacityExhausted { max: usize },
}

/// One live effect instance.
///
/// The definition is copied out of the catalog at apply time, so catalog
/// edits never retroactively change running effects.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub definition: EffectDefinition,
    pub stacks: u32,
    /// Seconds left; `None` for untimed and `Permanent` effects.
    pub remaining: Option<f32>,
    /// Game-clock seconds at the moment of application.
    pub applied_at: f64,
}

impl ActiveEffect {
    fn new(definition: EffectDefinition, stacks: u32, applied_at: f64) -> Self {
        let remaining = match definition.effect_type {
            EffectType::Permanent => None,
            _ => definition.duration,
        };
        let stacks = stacks.clamp(1, definition.max_stacks);
        Self {
            definition,
            stacks,
            remaining,
            applied_at,
        }
    }
}

/// All effects currently active on a subject, capacity-bounded.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectStack {
    effects: ArrayVec<ActiveEffect, { SimConfig::MAX_ACTIVE_EFFECTS }>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Apply / remove
    // ========================================================================

    /// Applies `stacks` worth of an effect by id at game time `applied_at`.
    ///
    /// Reapplication follows the definition's type: `Stackable` adds stacks
    /// (saturating at the cap) and resets the timer, `Temporary` refreshes
    /// the timer, anything else is rejected.
    pub fn apply(
        &mut self,
        id: &str,
        stacks: u32,
        applied_at: f64,
        catalog: &EffectCatalog,
        events: &mut EventQueue,
    ) -> Result<(), EffectError> {
        let stacks = stacks.max(1);
        if let Some(active) = self.effects.iter_mut().find(|e| e.definition.id == id) {
            match active.definition.effect_type {
                EffectType::Stackable => {
                    active.stacks = (active.stacks + stacks).min(active.definition.max_stacks);
                    active.remaining = active.definition.duration;
                }
                EffectType::Temporary => {
                    active.remaining = active.definition.duration;
                }
                EffectType::Conditional | EffectType::Permanent => {
                    return Err(EffectError::NotStackable(id.to_owned()));
                }
            }
            events.push(SimEvent::EffectApplied {
                id: id.to_owned(),
                stacks: active.stacks,
            });
            return Ok(());
        }

        let definition = catalog
            .get(id)
            .ok_or_else(|| EffectError::UnknownEffect(id.to_owned()))?;
        if self.effects.is_full() {
            return Err(EffectError::CapacityExhausted {
                max: SimConfig::MAX_ACTIVE_EFFECTS,
            });
        }
        let active = ActiveEffect::new(definition.clone(), stacks, applied_at);
        events.push(SimEvent::EffectApplied {
            id: id.to_owned(),
            stacks: active.stacks,
        });
        self.effects.push(active);
        Ok(())
    }

    /// Removes an effect entirely, all stacks at once. Returns whether it
    /// was present.
    pub fn remove(&mut self, id: &str, events: &mut EventQueue) -> bool {
        let Some(index) = self.effects.iter().position(|e| e.definition.id == id) else {
            return false;
        };
        self.effects.remove(index);
        events.push(SimEvent::EffectRemoved { id: id.to_owned() });
        true
    }

    /// Removes every effect carrying the tag; returns how many went.
    pub fn remove_by_tag(&mut self, tag: &str, events: &mut EventQueue) -> usize {
        let mut removed = 0;
        let mut index = 0;
        while index < self.effects.len() {
            if self.effects[index].definition.has_tag(tag) {
                let effect = self.effects.remove(index);
                events.push(SimEvent::EffectRemoved {
                    id: effect.definition.id,
                });
                removed += 1;
            } else {
                index += 1;
            }
        }
        removed
    }

    pub fn clear(&mut self, events: &mut EventQueue) {
        for effect in self.effects.drain(..) {
            events.push(SimEvent::EffectRemoved {
                id: effect.definition.id,
            });
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances timers, expires finished effects, and applies composed
    /// per-second stat deltas.
    pub fn tick(&mut self, dt: f32, stats: &mut StatLedger, events: &mut EventQueue) {
        if dt <= 0.0 {
            return;
        }
        let mut index = 0;
        while index < self.effects.len() {
            let effect = &mut self.effects[index];
            let expired = match (&effect.definition.effect_type, &mut effect.remaining) {
                (EffectType::Permanent, _) | (_, None) => false,
                (_, Some(remaining)) => {
                    *remaining -= dt;
                    *remaining <= 0.0
                }
            };
            if expired {
                let effect = self.effects.remove(index);
                events.push(SimEvent::EffectExpired {
                    id: effect.definition.id,
                    stacks: effect.stacks,
                });
            } else {
                index += 1;
            }
        }

        // Deltas compose across effects the same way maxima do: flats sum
        // in descending priority, then the sum is scaled by the product of
        // multipliers targeting the same stat.
        for kind in self.modified_stats(|d| &d.tick_modifiers) {
            let (flat, multiplier) = self.compose(kind, |d| &d.tick_modifiers);
            let delta = flat * multiplier * dt;
            if delta != 0.0 {
                stats.apply_delta(kind, delta, events);
            }
        }
    }

    /// Composes the active max-modifiers for one stat onto a base maximum.
    pub fn adjusted_max(&self, stat: StatKind, base: f32) -> f32 {
        if !self.modifies_max(stat) {
            return base;
        }
        let (flat, multiplier) = self.compose(stat, |d| &d.max_modifiers);
        ((base + flat) * multiplier).max(0.0)
    }

    /// Whether any active effect reshapes this stat's maximum.
    pub fn modifies_max(&self, stat: StatKind) -> bool {
        self.effects
            .iter()
            .any(|e| e.definition.max_modifiers.iter().any(|m| m.stat == stat))
    }

    /// Gathers `(sum of flats x stacks, product of multipliers)` for one
    /// stat over the selected modifier list, in descending priority order.
    fn compose(
        &self,
        stat: StatKind,
        select: impl Fn(&EffectDefinition) -> &Vec<super::definition::StatModifier>,
    ) -> (f32, f32) {
        let mut ordered: Vec<&ActiveEffect> = self.effects.iter().collect();
        ordered.sort_by_key(|e| std::cmp::Reverse(e.definition.priority));

        let mut flat = 0.0;
        let mut multiplier = 1.0;
        for effect in ordered {
            for modifier in select(&effect.definition) {
                if modifier.stat == stat {
                    flat += modifier.flat * effect.stacks as f32;
                    multiplier *= modifier.multiplier;
                }
            }
        }
        (flat, multiplier)
    }

    fn modified_stats(
        &self,
        select: impl Fn(&EffectDefinition) -> &Vec<super::definition::StatModifier>,
    ) -> Vec<StatKind> {
        let mut kinds: Vec<StatKind> = self
            .effects
            .iter()
            .flat_map(|e| select(&e.definition).iter().map(|m| m.stat))
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn has(&self, id: &str) -> bool {
        self.effects.iter().any(|e| e.definition.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.definition.id == id)
    }

    pub fn stacks(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |e| e.stacks)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::definition::{EffectType, StatModifier};
    use crate::stats::StatDefaults;

    fn catalog() -> EffectCatalog {
        EffectCatalog::new()
            .with(
                EffectDefinition::new("bleed", "Bleeding", EffectType::Stackable)
                    .with_duration(10.0)
                    .with_max_stacks(3)
                    .with_tag("injury")
                    .with_tick_modifier(StatModifier::flat(StatKind::Health, -2.0)),
            )
            .with(
                EffectDefinition::new("adrenaline", "Adrenaline", EffectType::Temporary)
                    .with_duration(30.0)
                    .with_max_modifier(StatModifier::flat(StatKind::Stamina, 20.0)),
            )
            .with(
                EffectDefinition::new("weakened", "Weakened", EffectType::Conditional)
                    .with_priority(-1)
                    .with_tag("injury")
                    .with_max_modifier(StatModifier::scaled(StatKind::Stamina, 0.5)),
            )
            .with(EffectDefinition::new(
                "cursed",
                "Cursed",
                EffectType::Permanent,
            ))
    }

    fn stats() -> StatLedger {
        StatLedger::new(&StatDefaults::new(), &SimConfig::new())
    }

    #[test]
    fn unknown_id_is_an_error_and_changes_nothing() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let err = stack.apply("no-such-effect", 1, 0.0, &catalog(), &mut events);
        assert_eq!(
            err,
            Err(EffectError::UnknownEffect("no-such-effect".into()))
        );
        assert!(stack.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn stackable_saturates_and_resets_the_timer() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let catalog = catalog();
        for _ in 0..5 {
            stack.apply("bleed", 1, 0.0, &catalog, &mut events).unwrap();
        }
        assert_eq!(stack.stacks("bleed"), 3);

        // Reapplication resets the clock.
        let mut stats = stats();
        stack.tick(9.0, &mut stats, &mut events);
        stack.apply("bleed", 1, 9.0, &catalog, &mut events).unwrap();
        stack.tick(9.0, &mut stats, &mut events);
        assert!(stack.has("bleed"));
    }

    #[test]
    fn temporary_refreshes_without_duplicating() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let catalog = catalog();
        stack
            .apply("adrenaline", 1, 0.0, &catalog, &mut events)
            .unwrap();
        stack
            .apply("adrenaline", 1, 5.0, &catalog, &mut events)
            .unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.stacks("adrenaline"), 1);
    }

    #[test]
    fn non_stacking_types_reject_reapplication() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let catalog = catalog();
        stack
            .apply("weakened", 1, 0.0, &catalog, &mut events)
            .unwrap();
        assert_eq!(
            stack.apply("weakened", 1, 1.0, &catalog, &mut events),
            Err(EffectError::NotStackable("weakened".into()))
        );
        stack.apply("cursed", 1, 0.0, &catalog, &mut events).unwrap();
        assert_eq!(
            stack.apply("cursed", 1, 1.0, &catalog, &mut events),
            Err(EffectError::NotStackable("cursed".into()))
        );
    }

    #[test]
    fn permanent_effects_never_expire() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let mut stats = stats();
        stack
            .apply("cursed", 1, 0.0, &catalog(), &mut events)
            .unwrap();
        stack.tick(1.0e6, &mut stats, &mut events);
        assert!(stack.has("cursed"));
    }

    #[test]
    fn tick_modifiers_scale_with_stacks() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let mut stats = stats();
        let catalog = catalog();
        stack.apply("bleed", 2, 0.0, &catalog, &mut events).unwrap();

        stack.tick(1.0, &mut stats, &mut events);
        // Two stacks of -2 health/s.
        assert!((stats.value(StatKind::Health) - 96.0).abs() < 1.0e-3);
    }

    #[test]
    fn expiry_fires_once_with_final_stacks() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let mut stats = stats();
        let catalog = catalog();
        stack.apply("bleed", 2, 0.0, &catalog, &mut events).unwrap();
        events.drain();

        stack.tick(10.0, &mut stats, &mut events);
        let expired: Vec<_> = events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, SimEvent::EffectExpired { .. }))
            .collect();
        assert_eq!(expired.len(), 1);
        assert!(matches!(
            &expired[0],
            SimEvent::EffectExpired { id, stacks: 2 } if id == "bleed"
        ));
        assert!(stack.is_empty());
    }

    #[test]
    fn max_composition_sums_flats_then_multiplies() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let catalog = catalog();
        stack
            .apply("adrenaline", 1, 0.0, &catalog, &mut events)
            .unwrap();
        stack
            .apply("weakened", 1, 0.0, &catalog, &mut events)
            .unwrap();
        // (100 + 20) * 0.5
        assert!((stack.adjusted_max(StatKind::Stamina, 100.0) - 60.0).abs() < 1.0e-3);
        // Untouched stats pass through.
        assert_eq!(stack.adjusted_max(StatKind::Health, 100.0), 100.0);
    }

    #[test]
    fn tag_removal_takes_every_match() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let catalog = catalog();
        stack.apply("bleed", 1, 0.0, &catalog, &mut events).unwrap();
        stack
            .apply("weakened", 1, 0.0, &catalog, &mut events)
            .unwrap();
        stack
            .apply("adrenaline", 1, 0.0, &catalog, &mut events)
            .unwrap();

        assert_eq!(stack.remove_by_tag("injury", &mut events), 2);
        assert_eq!(stack.len(), 1);
        assert!(stack.has("adrenaline"));
        // Unknown tags remove nothing.
        assert_eq!(stack.remove_by_tag("blessing", &mut events), 0);
    }

    #[test]
    fn capacity_is_bounded() {
        let mut stack = EffectStack::new();
        let mut events = EventQueue::new();
        let mut catalog = EffectCatalog::new();
        for i in 0..=SimConfig::MAX_ACTIVE_EFFECTS {
            catalog.insert(EffectDefinition::new(
                format!("e{i}"),
                format!("Effect {i}"),
                EffectType::Permanent,
            ));
        }
        for i in 0..SimConfig::MAX_ACTIVE_EFFECTS {
            stack
                .apply(&format!("e{i}"), 1, 0.0, &catalog, &mut events)
                .unwrap();
        }
        let overflow = stack.apply(
            &format!("e{}", SimConfig::MAX_ACTIVE_EFFECTS),
            1,
            0.0,
            &catalog,
            &mut events,
        );
        assert_eq!(
            overflow,
            Err(EffectError::CapacityExhausted {
                max: SimConfig::MAX_ACTIVE_EFFECTS
            })
        );
    }
}
