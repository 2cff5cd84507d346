//! Owning container for every stat of one subject.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::entry::{RegenCurve, StatEntry};
use super::kind::{StatCategory, StatKind};
use crate::config::SimConfig;
use crate::event::{EventQueue, SimEvent};

/// Startup values for the ledger, typically loaded from content files.
///
/// Kinds absent from the table fall back to [`StatEntry::default_for`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDefaults {
    entries: BTreeMap<StatKind, StatEntry>,
}

impl StatDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: StatKind, entry: StatEntry) -> &mut Self {
        self.entries.insert(kind, entry);
        self
    }

    pub fn get(&self, kind: StatKind) -> Option<&StatEntry> {
        self.entries.get(&kind)
    }
}

/// The full stat table of one subject.
///
/// Every [`StatKind`] is present for the whole session. All mutation funnels
/// through a single clamp-and-broadcast path, so `0 <= current <= max` holds
/// after every operation and callers never observe a half-updated entry.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatLedger {
    entries: BTreeMap<StatKind, StatEntry>,
    /// Fraction of max below which a stat is considered critical.
    critical_threshold: f32,
}

impl StatLedger {
    /// Builds a ledger covering every [`StatKind`], taking startup values
    /// from `defaults` where provided.
    pub fn new(defaults: &StatDefaults, config: &SimConfig) -> Self {
        let mut entries = BTreeMap::new();
        for kind in StatKind::iter() {
            let entry = match defaults.get(kind) {
                Some(entry) => entry.clone(),
                None => {
                    tracing::debug!(stat = %kind, "no startup row, using stock default");
                    StatEntry::default_for(kind)
                }
            };
            entries.insert(kind, entry);
        }
        Self {
            entries,
            critical_threshold: config.critical_threshold,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Adds `amount` (negative to drain) to a stat, clamping the result.
    pub fn apply_delta(&mut self, kind: StatKind, amount: f32, events: &mut EventQueue) {
        if amount == 0.0 {
            return;
        }
        self.mutate(kind, events, SimConfig::VALUE_EPSILON, |entry| {
            entry.current += amount;
        });
    }

    /// Sets a stat's current value directly, clamping into `[0, max]`.
    pub fn set_value(&mut self, kind: StatKind, value: f32, events: &mut EventQueue) {
        self.mutate(kind, events, SimConfig::VALUE_EPSILON, |entry| {
            entry.current = value;
        });
    }

    /// Sets a stat's maximum, flooring at zero and re-clamping the current
    /// value. Broadcasts `StatMaxChanged` when the maximum actually moves.
    pub fn set_max(&mut self, kind: StatKind, new_max: f32, events: &mut EventQueue) {
        let new_max = new_max.max(0.0);
        let Some(entry) = self.entries.get(&kind) else {
            return;
        };
        if (entry.max - new_max).abs() <= SimConfig::VALUE_EPSILON {
            return;
        }
        self.mutate(kind, events, SimConfig::VALUE_EPSILON, |entry| {
            entry.max = new_max;
        });
        events.push(SimEvent::StatMaxChanged { kind, new_max });
    }

    /// Sets the unmodified base maximum other layers derive maxima from.
    pub fn set_base_max(&mut self, kind: StatKind, base_max: f32) {
        if let Some(entry) = self.entries.get_mut(&kind) {
            entry.base_max = base_max.max(0.0);
        }
    }

    pub fn set_regen_rate(&mut self, kind: StatKind, rate: f32) {
        if let Some(entry) = self.entries.get_mut(&kind) {
            entry.regen_rate = rate;
        }
    }

    pub fn set_regen_curve(&mut self, kind: StatKind, curve: Option<RegenCurve>) {
        if let Some(entry) = self.entries.get_mut(&kind) {
            entry.regen_curve = curve;
        }
    }

    /// Advances passive regeneration by `dt` seconds.
    ///
    /// Sub-epsilon drifts still accumulate in the stored value; the epsilon
    /// only suppresses per-tick `StatChanged` chatter.
    pub fn tick_regen(&mut self, dt: f32, events: &mut EventQueue) {
        if dt <= 0.0 {
            return;
        }
        let kinds: Vec<StatKind> = self
            .entries
            .iter()
            .filter(|(_, e)| e.regen_rate != 0.0)
            .map(|(k, _)| *k)
            .collect();
        for kind in kinds {
            self.mutate(kind, events, SimConfig::REGEN_EVENT_EPSILON, |entry| {
                let multiplier = entry
                    .regen_curve
                    .as_ref()
                    .map_or(1.0, |c| c.sample(entry.percentage()));
                entry.current += entry.regen_rate * multiplier * dt;
            });
        }
    }

    /// Applies `f` to the entry, clamps, and broadcasts the edge events the
    /// transition produced.
    fn mutate<F: FnOnce(&mut StatEntry)>(
        &mut self,
        kind: StatKind,
        events: &mut EventQueue,
        change_epsilon: f32,
        f: F,
    ) {
        let Some(entry) = self.entries.get_mut(&kind) else {
            return;
        };
        let old = entry.current;
        let old_pct = entry.percentage();
        f(entry);
        entry.clamp();
        let new = entry.current;
        let new_pct = entry.percentage();

        if (new - old).abs() > change_epsilon {
            events.push(SimEvent::StatChanged { kind, old, new });
        }
        if new <= SimConfig::VALUE_EPSILON && old > SimConfig::VALUE_EPSILON {
            events.push(SimEvent::StatReachedZero { kind });
        }
        if entry.max > 0.0
            && entry.is_at_max()
            && (old - entry.max).abs() > SimConfig::VALUE_EPSILON
        {
            events.push(SimEvent::StatReachedMax { kind });
        }
        // Edge-triggered: only fires on the crossing, not every tick below.
        if old_pct >= self.critical_threshold && new_pct < self.critical_threshold {
            events.push(SimEvent::StatCritical {
                kind,
                percentage: new_pct,
            });
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn value(&self, kind: StatKind) -> f32 {
        self.entries.get(&kind).map_or(0.0, |e| e.current)
    }

    pub fn max(&self, kind: StatKind) -> f32 {
        self.entries.get(&kind).map_or(0.0, |e| e.max)
    }

    pub fn base_max(&self, kind: StatKind) -> f32 {
        self.entries.get(&kind).map_or(0.0, |e| e.base_max)
    }

    /// Fill percentage in `[0, 1]`.
    pub fn percentage(&self, kind: StatKind) -> f32 {
        self.entries.get(&kind).map_or(0.0, StatEntry::percentage)
    }

    pub fn regen_rate(&self, kind: StatKind) -> f32 {
        self.entries.get(&kind).map_or(0.0, |e| e.regen_rate)
    }

    pub fn is_critical(&self, kind: StatKind) -> bool {
        self.percentage(kind) < self.critical_threshold
    }

    /// Kinds whose fill percentage is strictly below `fraction`.
    pub fn stats_below(&self, fraction: f32) -> Vec<StatKind> {
        self.entries
            .iter()
            .filter(|(_, e)| e.percentage() < fraction)
            .map(|(k, _)| *k)
            .collect()
    }

    /// The emptiest stat by fill percentage.
    pub fn lowest_percentage(&self) -> Option<(StatKind, f32)> {
        self.entries
            .iter()
            .map(|(k, e)| (*k, e.percentage()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// The fullest stat by fill percentage.
    pub fn highest_percentage(&self) -> Option<(StatKind, f32)> {
        self.entries
            .iter()
            .map(|(k, e)| (*k, e.percentage()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Mean fill percentage over one category.
    pub fn category_average(&self, category: StatCategory) -> f32 {
        let mut sum = 0.0;
        let mut count = 0u32;
        for (kind, entry) in &self.entries {
            if kind.category() == category {
                sum += entry.percentage();
                count += 1;
            }
        }
        if count > 0 {
            sum / count as f32
        } else {
            0.0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &StatEntry)> {
        self.entries.iter().map(|(k, e)| (*k, e))
    }
}
