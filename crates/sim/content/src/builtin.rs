//! Built-in content tables, used when no content files are provided.

use sim_core::{
    Catalogs, EffectCatalog, EffectDefinition, EffectType, RegenCurve, SkillCatalog,
    SkillCategory, SkillDefinition, StatDefaults, StatEntry, StatKind, StatModifier,
};

/// Stock stat tuning: survival needs decay, stamina and energy recover.
///
/// Rates are per game second; at the default clock scale one real second is
/// one game minute, so a hunger decay of 0.001/s empties the stat in a bit
/// over one game day.
pub fn stat_defaults() -> StatDefaults {
    let mut defaults = StatDefaults::new();

    let mut health = StatEntry::full(100.0);
    health.regen_rate = 0.01;
    // Natural healing stops entirely below 30% health.
    health.regen_curve = RegenCurve::new(vec![(0.0, 0.0), (0.3, 0.0), (0.31, 1.0), (1.0, 1.0)]);
    defaults.set(StatKind::Health, health);

    let mut stamina = StatEntry::full(100.0);
    stamina.regen_rate = 5.0;
    // Winded recovery kicks in harder the emptier the stat is.
    stamina.regen_curve = RegenCurve::new(vec![(0.0, 2.0), (1.0, 1.0)]);
    defaults.set(StatKind::Stamina, stamina);

    let mut energy = StatEntry::full(100.0);
    energy.regen_rate = 0.5;
    defaults.set(StatKind::Energy, energy);

    let mut hunger = StatEntry::full(100.0);
    hunger.regen_rate = -0.001;
    defaults.set(StatKind::Hunger, hunger);

    let mut thirst = StatEntry::full(100.0);
    thirst.regen_rate = -0.002;
    defaults.set(StatKind::Thirst, thirst);

    let mut fatigue = StatEntry::full(100.0);
    fatigue.regen_rate = -0.0015;
    defaults.set(StatKind::Fatigue, fatigue);

    defaults
}

/// Stock status effects covering the common survival situations.
pub fn effects() -> EffectCatalog {
    EffectCatalog::new()
        .with(
            EffectDefinition::new("adrenaline", "Adrenaline", EffectType::Temporary)
                .with_duration(30.0)
                .with_priority(10)
                .with_tag("boost")
                .with_max_modifier(StatModifier::flat(StatKind::Stamina, 25.0)),
        )
        .with(
            EffectDefinition::new("well-fed", "Well Fed", EffectType::Temporary)
                .with_duration(600.0)
                .with_tag("boost")
                .with_max_modifier(StatModifier::flat(StatKind::Health, 10.0))
                .with_tick_modifier(StatModifier::flat(StatKind::Hunger, 0.01)),
        )
        .with(
            EffectDefinition::new("warmed-by-fire", "Warmed by Fire", EffectType::Temporary)
                .with_duration(120.0)
                .with_tick_modifier(StatModifier::flat(StatKind::BodyTemperature, 0.05)),
        )
        .with(
            EffectDefinition::new("food-poisoning", "Food Poisoning", EffectType::Stackable)
                .with_duration(300.0)
                .with_max_stacks(3)
                .with_tag("ailment")
                .with_tick_modifier(StatModifier::flat(StatKind::Health, -0.05))
                .with_tick_modifier(StatModifier::flat(StatKind::Energy, -0.1)),
        )
        .with(
            EffectDefinition::new("fever", "Fever", EffectType::Conditional)
                .with_duration(900.0)
                .with_priority(-5)
                .with_tag("ailment")
                .with_tick_modifier(StatModifier::flat(StatKind::BodyTemperature, 0.002))
                .with_max_modifier(StatModifier::scaled(StatKind::Stamina, 0.7)),
        )
        .with(
            EffectDefinition::new("sedated", "Sedated", EffectType::Temporary)
                .with_duration(60.0)
                .with_tick_modifier(StatModifier::flat(StatKind::Sanity, 0.1)),
        )
}

/// Stock skill tree. Ranks and gates are deliberately shallow; games ship
/// their own trees through content files.
pub fn skills() -> SkillCatalog {
    SkillCatalog::new()
        .with(
            SkillDefinition::new("foraging", "Foraging", SkillCategory::Survival)
                .with_max_level(3),
        )
        .with(
            SkillDefinition::new("firecraft", "Firecraft", SkillCategory::Survival)
                .with_max_level(3),
        )
        .with(
            SkillDefinition::new("shelter-building", "Shelter Building", SkillCategory::Survival)
                .with_prerequisite("firecraft")
                .with_required_level(3),
        )
        .with(
            SkillDefinition::new("first-aid", "First Aid", SkillCategory::Medical)
                .with_max_level(2),
        )
        .with(
            SkillDefinition::new("field-surgery", "Field Surgery", SkillCategory::Medical)
                .with_prerequisite("first-aid")
                .with_required_level(5)
                .with_cost(2),
        )
        .with(
            SkillDefinition::new("iron-grip", "Iron Grip", SkillCategory::Combat)
                .with_max_level(3),
        )
}

/// All three built-in tables bundled for [`sim_core::Simulation::new`].
pub fn catalogs() -> Catalogs {
    Catalogs {
        stat_defaults: stat_defaults(),
        effects: effects(),
        skills: skills(),
    }
}
