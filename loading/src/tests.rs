use {
    crate::*,
    bevy::{ecs::system::RunSystemOnce, prelude::*},
    hud::HudViewMode,
};

fn setup_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(AssetPlugin::default())
        .init_asset::<CharacterTuning>()
        .init_asset::<HudSettings>()
        .init_asset::<InputBindings>()
        .init_resource::<LoadingStatus>()
        .init_resource::<NextState<LoadingPhase>>();
    app
}

fn insert_handles(app: &mut App, tuning: Handle<CharacterTuning>) {
    let world = app.world_mut();
    let hud = world
        .resource_mut::<Assets<HudSettings>>()
        .add(HudSettings {
            initial_view_mode: HudViewMode::Moderate,
        });
    let bindings = world
        .resource_mut::<Assets<InputBindings>>()
        .add(InputBindings::default());
    world.insert_resource(ConfigHandles {
        tuning,
        hud,
        bindings,
    });
}

#[test]
fn test_loaded_config_becomes_resources() {
    let mut app = setup_app();
    let tuning = app
        .world_mut()
        .resource_mut::<Assets<CharacterTuning>>()
        .add(CharacterTuning {
            max_health: 250,
            ..default()
        });
    insert_handles(&mut app, tuning);

    app.world_mut()
        .run_system_once(check_config_loaded)
        .expect("system ran");

    let world = app.world();
    assert_eq!(world.resource::<CharacterTuning>().max_health, 250);
    assert_eq!(
        world.resource::<HudSettings>().initial_view_mode,
        HudViewMode::Moderate
    );
    assert!(world.get_resource::<InputBindings>().is_some());
    assert!(world.get_resource::<ConfigHandles>().is_none());
    assert!(matches!(
        world.resource::<NextState<LoadingPhase>>(),
        NextState::Pending(LoadingPhase::SpawnWorld)
    ));
}

#[test]
fn test_waits_while_any_config_is_missing() {
    let mut app = setup_app();
    // A handle that never gets an asset behind it.
    let tuning = Handle::<CharacterTuning>::default();
    insert_handles(&mut app, tuning);

    app.world_mut()
        .run_system_once(check_config_loaded)
        .expect("system ran");

    let world = app.world();
    assert!(world.get_resource::<CharacterTuning>().is_none());
    assert!(world.get_resource::<ConfigHandles>().is_some());
    assert!(matches!(
        world.resource::<NextState<LoadingPhase>>(),
        NextState::Unchanged
    ));
}
