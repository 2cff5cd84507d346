//! End-to-end tests driving the worker through its public handle.

use sim_core::{
    BodyPart, ClockSettings, FreezingStage, SimEvent, SimSnapshot, StatKind, WeatherPreset,
};
use sim_runtime::{Runtime, RuntimeConfig, Scenario, SimCommand};

fn realtime_config() -> RuntimeConfig {
    // 1:1 clock keeps dt arithmetic obvious.
    RuntimeConfig {
        clock: ClockSettings {
            real_seconds_per_game_hour: 3600.0,
            ..ClockSettings::default()
        },
        ..RuntimeConfig::default()
    }
}

#[tokio::test]
async fn events_reach_both_the_caller_and_subscribers() {
    let runtime = Runtime::spawn(realtime_config(), sim_content::catalogs());
    let handle = runtime.handle();
    let mut feed = handle.subscribe();

    handle
        .apply(SimCommand::DamagePart {
            part: BodyPart::LeftArm,
            amount: 25.0,
        })
        .await
        .unwrap();
    let frame = handle.advance(1.0).await.unwrap();

    assert!(frame.iter().any(|e| matches!(
        e,
        SimEvent::BodyPartDamaged {
            part: BodyPart::LeftArm,
            ..
        }
    )));

    let mut seen_on_feed = false;
    while let Ok(event) = feed.try_recv() {
        if matches!(event, SimEvent::BodyPartDamaged { .. }) {
            seen_on_feed = true;
        }
    }
    assert!(seen_on_feed);

    drop(handle);
    drop(feed);
    runtime.shutdown().await;
}

#[tokio::test]
async fn command_errors_surface_through_the_handle() {
    let runtime = Runtime::spawn(realtime_config(), sim_content::catalogs());
    let handle = runtime.handle();

    let err = handle
        .apply(SimCommand::ApplyEffect {
            id: "no-such-effect".into(),
            stacks: 1,
        })
        .await;
    assert!(err.is_err());

    // The worker survives a failed command.
    handle
        .apply(SimCommand::ApplyEffect {
            id: "adrenaline".into(),
            stacks: 1,
        })
        .await
        .unwrap();

    drop(handle);
    runtime.shutdown().await;
}

#[tokio::test]
async fn blizzard_scenario_freezes_an_unsheltered_subject() {
    let runtime = Runtime::spawn(RuntimeConfig::default(), sim_content::catalogs());
    let handle = runtime.handle();

    let report = Scenario::blizzard().run(&handle).await.unwrap();

    assert!(report.freezing_stage >= FreezingStage::Freezing);
    assert!(report.body_temperature < 37.0);
    assert!(report.health < 100.0);
    assert!(report.events > 0);

    drop(handle);
    runtime.shutdown().await;
}

#[tokio::test]
async fn body_temperature_descends_monotonically_in_a_blizzard() {
    let runtime = Runtime::spawn(RuntimeConfig::default(), sim_content::catalogs());
    let handle = runtime.handle();

    handle
        .apply(SimCommand::ApplyWeatherPreset {
            preset: WeatherPreset::Blizzard,
        })
        .await
        .unwrap();

    let mut previous = handle
        .snapshot()
        .await
        .unwrap()
        .stats
        .value(StatKind::BodyTemperature);
    for _ in 0..120 {
        handle.advance(1.0).await.unwrap();
        let current = handle
            .snapshot()
            .await
            .unwrap()
            .stats
            .value(StatKind::BodyTemperature);
        assert!(current <= previous, "{current} > {previous}");
        previous = current;
    }
    assert!(previous < 37.0);

    drop(handle);
    runtime.shutdown().await;
}

#[tokio::test]
async fn snapshots_round_trip_as_json() {
    let runtime = Runtime::spawn(realtime_config(), sim_content::catalogs());
    let handle = runtime.handle();

    handle
        .apply(SimCommand::SetStat {
            kind: StatKind::Thirst,
            value: 35.0,
        })
        .await
        .unwrap();
    handle.advance(5.0).await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: SimSnapshot = serde_json::from_str(&json).unwrap();

    let mirror = Runtime::spawn(realtime_config(), sim_content::catalogs());
    let mirror_handle = mirror.handle();
    mirror_handle.restore(decoded).await.unwrap();

    let restored = mirror_handle.snapshot().await.unwrap();
    assert_eq!(
        restored.stats.value(StatKind::Thirst),
        snapshot.stats.value(StatKind::Thirst)
    );
    assert_eq!(
        restored.clock.elapsed_seconds(),
        snapshot.clock.elapsed_seconds()
    );

    drop(handle);
    runtime.shutdown().await;
    drop(mirror_handle);
    mirror.shutdown().await;
}

#[test]
fn commands_serialize_for_logs_and_replay() {
    let command = SimCommand::ApplyEffect {
        id: "fever".into(),
        stacks: 2,
    };
    let json = serde_json::to_string(&command).unwrap();
    let decoded: SimCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, command);
}
