//! A single stat's value, bounds, and regeneration shape.

use super::kind::StatKind;
use crate::config::SimConfig;

/// Piecewise-linear curve mapping a stat's fill percentage (0-1) to a
/// regeneration-rate multiplier.
///
/// Points must be sorted by percentage. Sampling clamps outside the covered
/// range, so a single point behaves like a constant multiplier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenCurve {
    points: Vec<(f32, f32)>,
}

impl RegenCurve {
    /// Creates a curve from `(percentage, multiplier)` points, sorting them
    /// by percentage. Returns `None` if no points are given.
    pub fn new(mut points: Vec<(f32, f32)>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(Self { points })
    }

    /// Samples the multiplier at the given fill percentage.
    pub fn sample(&self, percentage: f32) -> f32 {
        let first = self.points[0];
        if percentage <= first.0 {
            return first.1;
        }
        let last = self.points[self.points.len() - 1];
        if percentage >= last.0 {
            return last.1;
        }
        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if percentage <= x1 {
                let t = if x1 > x0 { (percentage - x0) / (x1 - x0) } else { 0.0 };
                return y0 + (y1 - y0) * t;
            }
        }
        last.1
    }
}

/// One stat's stored state.
///
/// Invariant: `0 <= current <= max` (enforced by [`StatEntry::clamp`] after
/// every mutation). `max` may be reshaped by other layers; `base_max` is the
/// unmodified maximum those layers derive from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatEntry {
    pub current: f32,
    pub max: f32,
    pub base_max: f32,
    /// Units per second; negative values decay.
    pub regen_rate: f32,
    /// Optional curve shaping the regeneration rate by fill percentage.
    pub regen_curve: Option<RegenCurve>,
}

impl StatEntry {
    /// A full stat with the given maximum and no regeneration.
    pub fn full(max: f32) -> Self {
        Self {
            current: max,
            max,
            base_max: max,
            regen_rate: 0.0,
            regen_curve: None,
        }
    }

    /// The stock default for a stat kind: 100/100 for everything except
    /// body temperature (37 of max 42) and wetness (empty).
    pub fn default_for(kind: StatKind) -> Self {
        match kind {
            StatKind::BodyTemperature => Self {
                current: 37.0,
                max: 42.0,
                base_max: 42.0,
                regen_rate: 0.0,
                regen_curve: None,
            },
            StatKind::Wetness => Self {
                current: 0.0,
                ..Self::full(100.0)
            },
            _ => Self::full(100.0),
        }
    }

    /// Clamps the current value into `[0, max]`.
    pub fn clamp(&mut self) {
        self.current = self.current.clamp(0.0, self.max);
    }

    /// Fill percentage in `[0, 1]`; zero when max is zero.
    pub fn percentage(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    pub fn is_at_max(&self) -> bool {
        (self.current - self.max).abs() <= SimConfig::VALUE_EPSILON
    }

    pub fn is_at_zero(&self) -> bool {
        self.current.abs() <= SimConfig::VALUE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_enforces_bounds() {
        let mut entry = StatEntry::full(100.0);
        entry.current = 150.0;
        entry.clamp();
        assert_eq!(entry.current, 100.0);
        entry.current = -5.0;
        entry.clamp();
        assert_eq!(entry.current, 0.0);
    }

    #[test]
    fn percentage_guards_zero_max() {
        let mut entry = StatEntry::full(100.0);
        entry.max = 0.0;
        assert_eq!(entry.percentage(), 0.0);
    }

    #[test]
    fn curve_interpolates_between_points() {
        let curve = RegenCurve::new(vec![(0.0, 2.0), (1.0, 0.0)]).unwrap();
        assert_eq!(curve.sample(0.0), 2.0);
        assert_eq!(curve.sample(1.0), 0.0);
        assert!((curve.sample(0.5) - 1.0).abs() < 1.0e-6);
        // Clamped outside the covered range.
        assert_eq!(curve.sample(-0.5), 2.0);
        assert_eq!(curve.sample(2.0), 0.0);
    }

    #[test]
    fn body_temperature_default_is_physiological() {
        let entry = StatEntry::default_for(StatKind::BodyTemperature);
        assert_eq!(entry.current, 37.0);
        assert_eq!(entry.max, 42.0);
    }
}
