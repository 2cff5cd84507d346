//! Aggregate body model and the capability multipliers derived from it.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::part::{BodyPart, BodyPartState, BurnLevel};
use crate::config::SimConfig;
use crate::event::{EventQueue, SimEvent};
use crate::stats::{StatKind, StatLedger};

/// Pain added per point of damage taken.
const PAIN_PER_DAMAGE: f32 = 0.5;
/// Pain relieved per point of condition healed.
const PAIN_RELIEF_PER_HEAL: f32 = 0.3;
/// Pain added at the moment a fracture occurs.
const FRACTURE_PAIN: f32 = 50.0;
/// Pain growth per second on an infected part.
const INFECTION_PAIN_RATE: f32 = 0.1;
/// Growth of the global infection-level stat per infected part per second.
const SYSTEMIC_INFECTION_RATE: f32 = 0.2;

/// Capability multipliers derived from the body's current state.
///
/// Multipliers are neutral (1.0, or 0.0 for additive-rate fields) on an
/// uninjured body and worsen linearly as the relevant parts degrade.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectMultipliers {
    /// Scales movement speed; legs. 1.0 healthy, 0.3 destroyed.
    pub movement_speed: f32,
    /// Scales stamina costs; legs. 1.0 healthy, 2.0 destroyed.
    pub stamina_drain: f32,
    /// Scales aim accuracy; arms. 1.0 healthy, 0.4 destroyed.
    pub accuracy: f32,
    /// Scales weapon sway; arms. 1.0 healthy, 2.5 destroyed.
    pub weapon_sway: f32,
    /// Scales the health stat's maximum; torso. 1.0 healthy, 0.5 destroyed.
    pub max_health: f32,
    /// Sanity loss per second; head. 0.0 healthy, 5.0 destroyed.
    pub sanity_drain: f32,
    /// Chance per second of losing consciousness; head. 0.0 healthy,
    /// 0.5 destroyed.
    pub unconscious_chance: f32,
}

impl Default for EffectMultipliers {
    fn default() -> Self {
        Self {
            movement_speed: 1.0,
            stamina_drain: 1.0,
            accuracy: 1.0,
            weapon_sway: 1.0,
            max_health: 1.0,
            sanity_drain: 0.0,
            unconscious_chance: 0.0,
        }
    }
}

/// Per-part medical state for one subject.
///
/// All six parts exist for the whole session; operations on a part mutate
/// in place and broadcast through the shared event queue.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyModel {
    parts: BTreeMap<BodyPart, BodyPartState>,
}

impl Default for BodyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyModel {
    pub fn new() -> Self {
        let parts = BodyPart::iter()
            .map(|p| (p, BodyPartState::default()))
            .collect();
        Self { parts }
    }

    // ========================================================================
    // Injuries
    // ========================================================================

    /// Applies structural damage to a part. Pain scales with the damage.
    pub fn damage(&mut self, part: BodyPart, amount: f32, events: &mut EventQueue) {
        if amount <= 0.0 {
            return;
        }
        let state = self.part_mut(part);
        state.condition -= amount;
        state.pain += amount * PAIN_PER_DAMAGE;
        state.clamp();
        events.push(SimEvent::BodyPartDamaged {
            part,
            damage: amount,
        });
    }

    /// Restores condition and relieves part of the associated pain.
    pub fn heal(&mut self, part: BodyPart, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        let state = self.part_mut(part);
        state.condition += amount;
        state.pain -= amount * PAIN_RELIEF_PER_HEAL;
        state.clamp();
    }

    /// Fractures a part. A second fracture on the same part is a no-op.
    pub fn fracture(&mut self, part: BodyPart, events: &mut EventQueue) {
        let state = self.part_mut(part);
        if state.is_fractured {
            return;
        }
        state.is_fractured = true;
        state.pain += FRACTURE_PAIN;
        state.clamp();
        events.push(SimEvent::BodyPartFractured { part });
    }

    /// Clears a fracture, e.g. after splinting.
    pub fn treat_fracture(&mut self, part: BodyPart) {
        self.part_mut(part).is_fractured = false;
    }

    /// Starts (or re-rates) bleeding on a part.
    pub fn start_bleeding(&mut self, part: BodyPart, rate: f32, events: &mut EventQueue) {
        if rate <= 0.0 {
            return;
        }
        self.part_mut(part).bleeding_rate = rate;
        events.push(SimEvent::BodyPartBleeding { part, rate });
    }

    pub fn stop_bleeding(&mut self, part: BodyPart) {
        self.part_mut(part).bleeding_rate = 0.0;
    }

    /// Inflicts a burn. Only an escalation over the current level applies.
    pub fn burn(&mut self, part: BodyPart, level: BurnLevel, events: &mut EventQueue) {
        let state = self.part_mut(part);
        if level <= state.burn {
            return;
        }
        state.burn = level;
        state.pain += level.pain();
        state.clamp();
        events.push(SimEvent::BodyPartBurned { part, level });
    }

    pub fn treat_burn(&mut self, part: BodyPart) {
        self.part_mut(part).burn = BurnLevel::None;
    }

    /// Infects a part with the given initial severity.
    pub fn infect(&mut self, part: BodyPart, severity: f32, events: &mut EventQueue) {
        if severity <= 0.0 {
            return;
        }
        let state = self.part_mut(part);
        state.infection = state.infection.max(severity);
        state.clamp();
        events.push(SimEvent::BodyPartInfected {
            part,
            infection: self.parts[&part].infection,
        });
    }

    pub fn disinfect(&mut self, part: BodyPart) {
        self.part_mut(part).infection = 0.0;
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances ongoing injury processes by `dt` seconds: bleeding drains
    /// the blood stat, infections spread locally and systemically, and a
    /// severe infection eats the part's condition.
    pub fn tick(
        &mut self,
        dt: f32,
        config: &SimConfig,
        stats: &mut StatLedger,
        events: &mut EventQueue,
    ) {
        if dt <= 0.0 {
            return;
        }
        let mut blood_loss = 0.0;
        let mut systemic_infection = 0.0;
        for state in self.parts.values_mut() {
            if state.is_bleeding() {
                blood_loss += state.bleeding_rate * dt;
            }
            if state.is_infected() {
                state.infection += config.infection_growth_rate * dt;
                state.pain += INFECTION_PAIN_RATE * dt;
                systemic_infection += SYSTEMIC_INFECTION_RATE * dt;
                if state.infection > config.infection_severity_threshold {
                    state.condition -= config.infection_condition_drain * dt;
                }
                state.clamp();
            }
        }
        if blood_loss > 0.0 {
            stats.apply_delta(StatKind::BloodLevel, -blood_loss, events);
        }
        if systemic_infection > 0.0 {
            stats.apply_delta(StatKind::InfectionLevel, systemic_infection, events);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn part(&self, part: BodyPart) -> &BodyPartState {
        &self.parts[&part]
    }

    fn part_mut(&mut self, part: BodyPart) -> &mut BodyPartState {
        // Every part is inserted at construction.
        self.parts.entry(part).or_default()
    }

    pub fn is_part_critical(&self, part: BodyPart) -> bool {
        self.parts[&part].is_critical()
    }

    pub fn any_critical(&self) -> bool {
        self.parts.values().any(BodyPartState::is_critical)
    }

    pub fn average_condition(&self) -> f32 {
        let sum: f32 = self.parts.values().map(|p| p.condition).sum();
        sum / self.parts.len() as f32
    }

    /// Mean pain over parts currently in pain; zero on a pain-free body.
    pub fn overall_pain(&self) -> f32 {
        let painful: Vec<f32> = self
            .parts
            .values()
            .map(|p| p.pain)
            .filter(|&p| p > 0.0)
            .collect();
        if painful.is_empty() {
            0.0
        } else {
            painful.iter().sum::<f32>() / painful.len() as f32
        }
    }

    /// Derives capability multipliers from the current part conditions.
    pub fn multipliers(&self) -> EffectMultipliers {
        let legs = self.pair_condition(BodyPart::LeftLeg, BodyPart::RightLeg);
        let arms = self.pair_condition(BodyPart::LeftArm, BodyPart::RightArm);
        let torso = self.parts[&BodyPart::Torso].condition / 100.0;
        let head = self.parts[&BodyPart::Head].condition / 100.0;

        EffectMultipliers {
            movement_speed: lerp(0.3, 1.0, legs),
            stamina_drain: lerp(2.0, 1.0, legs),
            accuracy: lerp(0.4, 1.0, arms),
            weapon_sway: lerp(2.5, 1.0, arms),
            max_health: lerp(0.5, 1.0, torso),
            sanity_drain: lerp(5.0, 0.0, head),
            unconscious_chance: lerp(0.5, 0.0, head),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, &BodyPartState)> {
        self.parts.iter().map(|(p, s)| (*p, s))
    }

    fn pair_condition(&self, a: BodyPart, b: BodyPart) -> f32 {
        (self.parts[&a].condition + self.parts[&b].condition) / 200.0
    }
}

fn lerp(at_zero: f32, at_full: f32, t: f32) -> f32 {
    at_zero + (at_full - at_zero) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatDefaults;

    fn stats() -> StatLedger {
        StatLedger::new(&StatDefaults::new(), &SimConfig::new())
    }

    #[test]
    fn damage_raises_pain_and_heal_relieves_it() {
        let mut body = BodyModel::new();
        let mut events = EventQueue::new();
        body.damage(BodyPart::LeftLeg, 40.0, &mut events);
        let state = body.part(BodyPart::LeftLeg);
        assert_eq!(state.condition, 60.0);
        assert_eq!(state.pain, 20.0);

        body.heal(BodyPart::LeftLeg, 40.0);
        let state = body.part(BodyPart::LeftLeg);
        assert_eq!(state.condition, 100.0);
        assert_eq!(state.pain, 8.0);
    }

    #[test]
    fn fracture_is_idempotent() {
        let mut body = BodyModel::new();
        let mut events = EventQueue::new();
        body.fracture(BodyPart::RightArm, &mut events);
        body.fracture(BodyPart::RightArm, &mut events);
        assert_eq!(body.part(BodyPart::RightArm).pain, 50.0);
        let fractures = events
            .drain()
            .iter()
            .filter(|e| matches!(e, SimEvent::BodyPartFractured { .. }))
            .count();
        assert_eq!(fractures, 1);
    }

    #[test]
    fn burns_only_escalate() {
        let mut body = BodyModel::new();
        let mut events = EventQueue::new();
        body.burn(BodyPart::Torso, BurnLevel::SecondDegree, &mut events);
        body.burn(BodyPart::Torso, BurnLevel::FirstDegree, &mut events);
        assert_eq!(body.part(BodyPart::Torso).burn, BurnLevel::SecondDegree);
        assert_eq!(body.part(BodyPart::Torso).pain, 30.0);
    }

    #[test]
    fn bleeding_drains_blood_during_tick() {
        let mut body = BodyModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        body.start_bleeding(BodyPart::Torso, 2.0, &mut events);
        body.tick(5.0, &SimConfig::new(), &mut stats, &mut events);
        assert!((stats.value(StatKind::BloodLevel) - 90.0).abs() < 1.0e-3);
    }

    #[test]
    fn severe_infection_eats_condition() {
        let mut body = BodyModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        let config = SimConfig::new();
        body.infect(BodyPart::LeftArm, 60.0, &mut events);
        body.tick(10.0, &config, &mut stats, &mut events);
        let state = body.part(BodyPart::LeftArm);
        // 60 + 0.5/s growth over 10s.
        assert!((state.infection - 65.0).abs() < 1.0e-3);
        assert!((state.condition - 98.0).abs() < 1.0e-3);
        assert!(stats.value(StatKind::InfectionLevel) > 0.0);
    }

    #[test]
    fn multipliers_worsen_with_leg_damage() {
        let mut body = BodyModel::new();
        let mut events = EventQueue::new();
        assert_eq!(body.multipliers(), EffectMultipliers::default());

        body.damage(BodyPart::LeftLeg, 100.0, &mut events);
        body.damage(BodyPart::RightLeg, 100.0, &mut events);
        let m = body.multipliers();
        assert!((m.movement_speed - 0.3).abs() < 1.0e-6);
        assert!((m.stamina_drain - 2.0).abs() < 1.0e-6);
        // Arms untouched.
        assert!((m.accuracy - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn critical_detection_covers_all_causes() {
        let mut body = BodyModel::new();
        let mut events = EventQueue::new();
        assert!(!body.any_critical());

        body.damage(BodyPart::Head, 85.0, &mut events);
        assert!(body.is_part_critical(BodyPart::Head));

        let mut body = BodyModel::new();
        body.fracture(BodyPart::LeftLeg, &mut events);
        assert!(body.is_part_critical(BodyPart::LeftLeg));

        let mut body = BodyModel::new();
        body.burn(BodyPart::RightArm, BurnLevel::ThirdDegree, &mut events);
        assert!(body.is_part_critical(BodyPart::RightArm));
    }

    #[test]
    fn treatment_clears_critical_state() {
        let mut body = BodyModel::new();
        let mut events = EventQueue::new();
        body.damage(BodyPart::Torso, 85.0, &mut events);
        body.fracture(BodyPart::Torso, &mut events);
        body.burn(BodyPart::Torso, BurnLevel::ThirdDegree, &mut events);
        assert!(body.any_critical());

        body.heal(BodyPart::Torso, 50.0);
        assert!(body.any_critical());
        body.treat_fracture(BodyPart::Torso);
        assert!(body.any_critical());
        body.treat_burn(BodyPart::Torso);
        assert!(!body.any_critical());
    }
}
