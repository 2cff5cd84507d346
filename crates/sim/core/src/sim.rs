//! Orchestrator tying the five layers and the clock into one subject.

use strum::{Display, IntoEnumIterator};

use crate::body::{BodyModel, BodyPart, BurnLevel};
use crate::clock::{Clock, ClockSettings};
use crate::config::SimConfig;
use crate::effect::{EffectCatalog, EffectError, EffectStack};
use crate::event::{EventQueue, SimEvent};
use crate::progression::{ProgressionLedger, SkillCatalog, SkillError, XpSource};
use crate::rng::PcgRng;
use crate::snapshot::SimSnapshot;
use crate::stats::{StatDefaults, StatKind, StatLedger};
use crate::thermal::{ClothingItem, ClothingSlot, FreezingStage, ThermalModel, WeatherPreset, WeatherType};

/// Whether this instance owns the subject's state or mirrors a remote one.
///
/// A replica rejects every command and only changes state through
/// [`Simulation::restore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Authority {
    Authoritative,
    Replica,
}

/// Injected content tables shared by all subjects.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub stat_defaults: StatDefaults,
    pub effects: EffectCatalog,
    pub skills: SkillCatalog,
}

/// One simulated subject: all five layers, the clock, and the outbound
/// event queue.
///
/// Per tick the layers run in a fixed order (clock, regeneration, body,
/// thermal, effects, maxima recompute, progression) so cross-layer reads
/// always observe the same stage of the frame.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    authority: Authority,
    catalogs: Catalogs,
    clock: Clock,
    stats: StatLedger,
    body: BodyModel,
    thermal: ThermalModel,
    effects: EffectStack,
    progression: ProgressionLedger,
    events: EventQueue,
    rng: PcgRng,
}

impl Simulation {
    pub fn new(config: SimConfig, catalogs: Catalogs) -> Self {
        let stats = StatLedger::new(&catalogs.stat_defaults, &config);
        Self {
            config,
            authority: Authority::Authoritative,
            catalogs,
            clock: Clock::default(),
            stats,
            body: BodyModel::new(),
            thermal: ThermalModel::new(),
            effects: EffectStack::new(),
            progression: ProgressionLedger::new(),
            events: EventQueue::new(),
            rng: PcgRng::new(0),
        }
    }

    pub fn with_clock_settings(mut self, settings: ClockSettings) -> Self {
        self.clock = Clock::new(settings);
        self
    }

    pub fn with_authority(mut self, authority: Authority) -> Self {
        self.authority = authority;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = PcgRng::new(seed);
        self
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the subject by `real_dt` real seconds and returns every
    /// event the frame produced, in emission order.
    pub fn tick(&mut self, real_dt: f32) -> Vec<SimEvent> {
        let game_dt = self.clock.tick(real_dt, &mut self.events);
        if game_dt > 0.0 {
            self.stats.tick_regen(game_dt, &mut self.events);
            self.body
                .tick(game_dt, &self.config, &mut self.stats, &mut self.events);
            self.thermal
                .tick(game_dt, &self.config, &mut self.stats, &mut self.events);
            self.effects
                .tick(game_dt, &mut self.stats, &mut self.events);
            self.apply_body_drains(game_dt);
            self.recompute_maxima();
            self.progression
                .tick_survival(game_dt / 60.0, &self.config, &mut self.events);
        }
        self.events.drain()
    }

    /// Continuous stat pressure derived from body state: head trauma
    /// erodes sanity.
    fn apply_body_drains(&mut self, dt: f32) {
        let sanity_drain = self.body.multipliers().sanity_drain;
        if sanity_drain > 0.0 {
            self.stats
                .apply_delta(StatKind::Sanity, -sanity_drain * dt, &mut self.events);
        }
    }

    /// Recomputes stat maxima from their base values: the torso scales
    /// health, then active effects reshape any stat they target. Working
    /// from `base_max` every frame keeps repeated ticks from compounding.
    fn recompute_maxima(&mut self) {
        for kind in StatKind::iter() {
            let mut base = self.stats.base_max(kind);
            let body_scaled = kind == StatKind::Health;
            if body_scaled {
                base *= self.body.multipliers().max_health;
            }
            if body_scaled || self.effects.modifies_max(kind) {
                let adjusted = self.effects.adjusted_max(kind, base);
                self.stats.set_max(kind, adjusted, &mut self.events);
            } else if (self.stats.max(kind) - base).abs() > SimConfig::VALUE_EPSILON {
                // An effect that just expired leaves the stale max behind.
                self.stats.set_max(kind, base, &mut self.events);
            }
        }
    }

    /// Rolls whether head trauma knocks the subject out during a window of
    /// `dt` seconds.
    pub fn roll_unconscious(&mut self, dt: f32) -> bool {
        let chance = self.body.multipliers().unconscious_chance;
        chance > 0.0 && self.rng.next_f32() < chance * dt
    }

    // ========================================================================
    // Commands (authoritative only)
    // ========================================================================

    fn check_authority(&self) -> bool {
        if self.authority == Authority::Replica {
            tracing::warn!("command ignored on a replica");
            return false;
        }
        true
    }

    pub fn apply_stat_delta(&mut self, kind: StatKind, amount: f32) {
        if self.check_authority() {
            self.stats.apply_delta(kind, amount, &mut self.events);
        }
    }

    pub fn set_stat(&mut self, kind: StatKind, value: f32) {
        if self.check_authority() {
            self.stats.set_value(kind, value, &mut self.events);
        }
    }

    pub fn set_regen_rate(&mut self, kind: StatKind, rate: f32) {
        if self.check_authority() {
            self.stats.set_regen_rate(kind, rate);
        }
    }

    /// Resets a stat's base maximum; active effects re-apply on the next
    /// tick's maxima pass.
    pub fn set_stat_max(&mut self, kind: StatKind, max: f32) {
        if self.check_authority() {
            self.stats.set_base_max(kind, max);
            self.stats.set_max(kind, max, &mut self.events);
        }
    }

    /// Eating, drinking, and resting in one call. Positive amounts restore
    /// the stat.
    pub fn consume(&mut self, hunger: f32, thirst: f32, energy: f32) {
        if self.check_authority() {
            self.stats
                .apply_delta(StatKind::Hunger, hunger, &mut self.events);
            self.stats
                .apply_delta(StatKind::Thirst, thirst, &mut self.events);
            self.stats
                .apply_delta(StatKind::Energy, energy, &mut self.events);
        }
    }

    /// Part damage also costs overall health at a reduced rate.
    pub fn damage_part(&mut self, part: BodyPart, amount: f32) {
        if self.check_authority() {
            self.body.damage(part, amount, &mut self.events);
            self.stats
                .apply_delta(StatKind::Health, -amount * 0.3, &mut self.events);
        }
    }

    pub fn heal_part(&mut self, part: BodyPart, amount: f32) {
        if self.check_authority() {
            self.body.heal(part, amount);
        }
    }

    pub fn fracture_part(&mut self, part: BodyPart) {
        if self.check_authority() {
            self.body.fracture(part, &mut self.events);
        }
    }

    pub fn treat_fracture(&mut self, part: BodyPart) {
        if self.check_authority() {
            self.body.treat_fracture(part);
        }
    }

    pub fn start_bleeding(&mut self, part: BodyPart, rate: f32) {
        if self.check_authority() {
            self.body.start_bleeding(part, rate, &mut self.events);
        }
    }

    pub fn stop_bleeding(&mut self, part: BodyPart) {
        if self.check_authority() {
            self.body.stop_bleeding(part);
        }
    }

    pub fn burn_part(&mut self, part: BodyPart, level: BurnLevel) {
        if self.check_authority() {
            self.body.burn(part, level, &mut self.events);
        }
    }

    pub fn treat_burn(&mut self, part: BodyPart) {
        if self.check_authority() {
            self.body.treat_burn(part);
        }
    }

    pub fn infect_part(&mut self, part: BodyPart, severity: f32) {
        if self.check_authority() {
            self.body.infect(part, severity, &mut self.events);
        }
    }

    pub fn disinfect_part(&mut self, part: BodyPart) {
        if self.check_authority() {
            self.body.disinfect(part);
        }
    }

    pub fn set_weather(&mut self, weather: WeatherType) {
        if self.check_authority() {
            self.thermal.set_weather(weather, &mut self.events);
        }
    }

    /// Applies a preset, jittering temperature and wind inside the
    /// preset's variance band with the subject's seeded RNG.
    pub fn apply_weather_preset(&mut self, preset: WeatherPreset) {
        if self.check_authority() {
            self.thermal.apply_preset(preset, &mut self.events);
            let (temperature_variance, wind_variance) = preset.variance();
            let (_, ambient, wind, _) = preset.settings();
            self.thermal
                .set_ambient_temperature(ambient + self.rng.symmetric(temperature_variance));
            self.thermal
                .set_wind_speed((wind + self.rng.symmetric(wind_variance)).max(0.0));
        }
    }

    pub fn set_ambient_temperature(&mut self, celsius: f32) {
        if self.check_authority() {
            self.thermal.set_ambient_temperature(celsius);
        }
    }

    pub fn set_wind_speed(&mut self, meters_per_second: f32) {
        if self.check_authority() {
            self.thermal.set_wind_speed(meters_per_second);
        }
    }

    pub fn set_precipitation(&mut self, intensity: f32) {
        if self.check_authority() {
            self.thermal.set_precipitation(intensity);
        }
    }

    pub fn set_shelter(&mut self, level: f32) {
        if self.check_authority() {
            self.thermal.set_shelter(level);
        }
    }

    pub fn equip_clothing(&mut self, slot: ClothingSlot, item: ClothingItem) -> Option<ClothingItem> {
        if self.check_authority() {
            self.thermal.equip(slot, item, &mut self.events)
        } else {
            None
        }
    }

    pub fn remove_clothing(&mut self, slot: ClothingSlot) -> Option<ClothingItem> {
        if self.check_authority() {
            self.thermal.remove(slot, &mut self.events)
        } else {
            None
        }
    }

    pub fn apply_effect(&mut self, id: &str, stacks: u32) -> Result<(), EffectError> {
        if !self.check_authority() {
            return Ok(());
        }
        let applied_at = self.clock.elapsed_seconds();
        self.effects
            .apply(id, stacks, applied_at, &self.catalogs.effects, &mut self.events)
    }

    pub fn remove_effect(&mut self, id: &str) -> bool {
        self.check_authority() && self.effects.remove(id, &mut self.events)
    }

    /// Removes every active effect carrying `tag`; returns how many went.
    pub fn remove_effects_by_tag(&mut self, tag: &str) -> usize {
        if !self.check_authority() {
            return 0;
        }
        self.effects.remove_by_tag(tag, &mut self.events)
    }

    pub fn grant_xp(&mut self, amount: u32, source: XpSource) {
        if self.check_authority() {
            self.progression
                .grant_xp(amount, source, &self.config, &mut self.events);
        }
    }

    pub fn unlock_skill(&mut self, id: &str) -> Result<(), SkillError> {
        if !self.check_authority() {
            return Ok(());
        }
        self.progression
            .unlock_skill(id, &self.catalogs.skills, &mut self.events)
    }

    pub fn level_up_skill(&mut self, id: &str) -> Result<(), SkillError> {
        if !self.check_authority() {
            return Ok(());
        }
        self.progression.level_up_skill(id, &mut self.events)
    }

    pub fn spend_attribute_point(&mut self, attribute: StatKind) -> Result<(), SkillError> {
        if !self.check_authority() {
            return Ok(());
        }
        self.progression
            .spend_attribute_point(attribute, &mut self.stats, &mut self.events)
    }

    pub fn pause(&mut self) {
        if self.check_authority() {
            self.clock.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.check_authority() {
            self.clock.resume();
        }
    }

    pub fn set_time(&mut self, day: u32, hour: u8, minute: u8) {
        if self.check_authority() {
            self.clock.set_time(day, hour, minute, &mut self.events);
        }
    }

    pub fn advance_by_hours(&mut self, hours: u32) {
        if self.check_authority() {
            self.clock.advance_by_hours(hours, &mut self.events);
        }
    }

    pub fn advance_by_days(&mut self, days: u32) {
        if self.check_authority() {
            self.clock.advance_by_days(days, &mut self.events);
        }
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Captures the full mutable state. Catalogs and config travel with it
    /// so a replica needs nothing else to mirror the subject.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            config: self.config.clone(),
            clock: self.clock.clone(),
            stats: self.stats.clone(),
            body: self.body.clone(),
            thermal: self.thermal.clone(),
            effects: self.effects.clone(),
            progression: self.progression.clone(),
        }
    }

    /// Replaces all mutable state with a snapshot's. Works on replicas;
    /// this is the one way their state changes.
    pub fn restore(&mut self, snapshot: SimSnapshot) {
        self.config = snapshot.config;
        self.clock = snapshot.clock;
        self.stats = snapshot.stats;
        self.body = snapshot.body;
        self.thermal = snapshot.thermal;
        self.effects = snapshot.effects;
        self.progression = snapshot.progression;
        self.events = EventQueue::new();
    }

    // ========================================================================
    // Composed queries
    // ========================================================================

    /// Any of: health critically low, a body part failed, or severe blood
    /// loss.
    pub fn is_critical(&self) -> bool {
        self.stats.percentage(StatKind::Health) < self.config.critical_threshold
            || self.body.any_critical()
            || self.stats.percentage(StatKind::BloodLevel) < 0.30
    }

    pub fn is_hypothermic(&self) -> bool {
        self.thermal.freezing_stage() >= FreezingStage::Hypothermia
    }

    pub fn is_dehydrated(&self) -> bool {
        self.stats.percentage(StatKind::Thirst) < 0.20
    }

    pub fn is_starving(&self) -> bool {
        self.stats.percentage(StatKind::Hunger) < 0.15
    }

    /// Shock from blood loss or overwhelming pain.
    pub fn is_in_shock(&self) -> bool {
        self.stats.percentage(StatKind::BloodLevel) < 0.40 || self.body.overall_pain() > 80.0
    }

    /// Single 0-1 wellness figure: vitals (health and blood) weighted 70%,
    /// structural body condition 30%.
    pub fn overall_health(&self) -> f32 {
        let vitals = self.stats.percentage(StatKind::Health) * 0.5
            + self.stats.percentage(StatKind::BloodLevel) * 0.5;
        let structure = self.body.average_condition() / 100.0;
        (vitals * 0.7 + structure * 0.3).clamp(0.0, 1.0)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn stats(&self) -> &StatLedger {
        &self.stats
    }

    pub fn body(&self) -> &BodyModel {
        &self.body
    }

    pub fn thermal(&self) -> &ThermalModel {
        &self.thermal
    }

    pub fn effects(&self) -> &EffectStack {
        &self.effects
    }

    pub fn progression(&self) -> &ProgressionLedger {
        &self.progression
    }
}
