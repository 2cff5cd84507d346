//! Deterministic random number generation for chance-based outcomes.
//!
//! Unconsciousness rolls sample a probability per tick. To keep the
//! simulation replayable (same seed, same outcomes), sampling goes through
//! a small stateful PCG instead of a global RNG.

/// PCG random number generator (PCG-XSH-RR variant).
///
/// Simple, fast, 64-bit state, deterministic: the same seed always produces
/// the same sequence.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // One warm-up step so sequential seeds diverge immediately.
        Self {
            state: Self::step(seed ^ Self::INCREMENT),
        }
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in `[-bound, bound]`.
    pub fn symmetric(&mut self, bound: f32) -> f32 {
        (self.next_f32() * 2.0 - 1.0) * bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::new(1);
        let mut b = PcgRng::new(2);
        assert_ne!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn symmetric_stays_in_bounds() {
        let mut rng = PcgRng::new(7);
        for _ in 0..100 {
            let v = rng.symmetric(5.0);
            assert!((-5.0..=5.0).contains(&v));
        }
    }
}
