//! Randomized operation sequences must never break structural invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use sim_core::{
    BodyPart, BurnLevel, Catalogs, ClothingItem, ClothingSlot, EffectDefinition, EffectType,
    SimConfig, Simulation, StatKind, StatModifier, WeatherPreset, XpSource,
};

fn catalogs() -> Catalogs {
    let mut catalogs = Catalogs::default();
    catalogs.effects.insert(
        EffectDefinition::new("poison", "Poison", EffectType::Stackable)
            .with_duration(8.0)
            .with_max_stacks(5)
            .with_tick_modifier(StatModifier::flat(StatKind::Health, -1.0)),
    );
    catalogs.effects.insert(
        EffectDefinition::new("second-wind", "Second Wind", EffectType::Temporary)
            .with_duration(15.0)
            .with_max_modifier(StatModifier::flat(StatKind::Stamina, 25.0)),
    );
    catalogs
}

fn pick<T: Copy>(rng: &mut StdRng, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

fn assert_invariants(sim: &Simulation) {
    for (kind, entry) in sim.stats().iter() {
        assert!(
            entry.current >= 0.0 && entry.current <= entry.max + 1.0e-3,
            "{kind}: current {} outside [0, {}]",
            entry.current,
            entry.max,
        );
        assert!(entry.max >= 0.0, "{kind}: negative max {}", entry.max);
    }
    for (part, state) in sim.body().iter() {
        assert!(
            (0.0..=100.0).contains(&state.condition),
            "{part}: condition {} out of range",
            state.condition,
        );
        assert!((0.0..=100.0).contains(&state.pain));
        assert!((0.0..=100.0).contains(&state.infection));
        assert!(state.bleeding_rate >= 0.0);
    }
    assert!(sim.effects().len() <= SimConfig::MAX_ACTIVE_EFFECTS);
    assert!(sim.progression().level() <= sim.config().level_cap);
    let overall = sim.overall_health();
    assert!((0.0..=1.0).contains(&overall));
}

#[test]
fn random_walks_hold_the_invariants() {
    let parts: Vec<BodyPart> = BodyPart::iter().collect();
    let kinds: Vec<StatKind> = StatKind::iter().collect();
    let presets = [
        WeatherPreset::Clear,
        WeatherPreset::Thunderstorm,
        WeatherPreset::Blizzard,
        WeatherPreset::Heatwave,
    ];

    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sim = Simulation::new(SimConfig::new(), catalogs()).with_seed(seed);

        for _ in 0..400 {
            match rng.gen_range(0..10) {
                0 => {
                    let kind = pick(&mut rng, &kinds);
                    sim.apply_stat_delta(kind, rng.gen_range(-50.0..50.0));
                }
                1 => sim.damage_part(pick(&mut rng, &parts), rng.gen_range(0.0..60.0)),
                2 => sim.heal_part(pick(&mut rng, &parts), rng.gen_range(0.0..40.0)),
                3 => sim.fracture_part(pick(&mut rng, &parts)),
                4 => sim.burn_part(pick(&mut rng, &parts), BurnLevel::SecondDegree),
                5 => sim.infect_part(pick(&mut rng, &parts), rng.gen_range(1.0..60.0)),
                6 => sim.apply_weather_preset(pick(&mut rng, &presets)),
                7 => {
                    // Errors (unknown ids, full stacks) must not corrupt state.
                    let id = pick(&mut rng, &["poison", "second-wind", "missing"]);
                    let _ = sim.apply_effect(id, rng.gen_range(1..3));
                }
                8 => sim.grant_xp(rng.gen_range(0..500), XpSource::Combat),
                _ => {
                    let mut coat = ClothingItem::new("coat");
                    coat.cold_insulation = rng.gen_range(0.0..100.0);
                    sim.equip_clothing(ClothingSlot::Torso, coat);
                }
            }
            sim.tick(rng.gen_range(0.0..2.0));
            assert_invariants(&sim);
        }
    }
}

#[test]
fn snapshots_taken_mid_walk_restore_identically() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut sim = Simulation::new(SimConfig::new(), catalogs());
    for _ in 0..50 {
        sim.damage_part(BodyPart::Torso, rng.gen_range(0.0..10.0));
        sim.tick(rng.gen_range(0.0..1.0));
    }

    let snapshot = sim.snapshot();
    let mut restored = Simulation::new(SimConfig::new(), catalogs());
    restored.restore(snapshot);

    for (kind, entry) in sim.stats().iter() {
        assert_eq!(entry.current, restored.stats().value(kind));
        assert_eq!(entry.max, restored.stats().max(kind));
    }
    assert_eq!(
        sim.body().average_condition(),
        restored.body().average_condition()
    );
    assert_eq!(sim.progression().xp(), restored.progression().xp());
}
