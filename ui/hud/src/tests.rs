use {
    crate::{components::*, subscriptions::key_listing_text, *},
    bevy::{ecs::system::RunSystemOnce, prelude::*},
    character::CharacterStatsPlugin,
    character_components::{Health, PlayerCharacter},
    character_events::{AddKey, UpdateHealth},
    widgets::StatBar,
};

fn setup_app(initial_view_mode: HudViewMode) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CharacterStatsPlugin)
        .insert_resource(HudSettings { initial_view_mode })
        .add_observer(on_set_hud_view_mode)
        .add_observer(on_cycle_hud_view_mode)
        .add_observer(on_cycle_hud_view_mode_back);

    let character = app
        .world_mut()
        .spawn((PlayerCharacter, Health { current: 40, max: 100 }))
        .id();

    app.world_mut()
        .run_system_once::<_, Result, _>(setup_hud)
        .expect("system ran")
        .expect("HUD set up");
    app.update();

    (app, character)
}

fn hud(app: &App) -> &Hud {
    app.world().resource::<Hud>()
}

fn bar(app: &App, entity: Entity) -> &StatBar {
    app.world().get::<StatBar>(entity).expect("stat bar")
}

fn text(app: &App, entity: Entity) -> &str {
    &app.world().get::<Text>(entity).expect("text").0
}

fn visible_layouts(app: &mut App) -> Vec<HudViewMode> {
    let mut query = app.world_mut().query::<(&HudLayout, &Node)>();
    let mut visible: Vec<HudViewMode> = query
        .iter(app.world())
        .filter(|(_, node)| node.display != Display::None)
        .map(|(layout, _)| layout.0)
        .collect();
    visible.sort_by_key(|mode| HudViewMode::ALL.iter().position(|m| m == mode));
    visible
}

#[test]
fn test_setup_shows_initial_mode_with_current_stats() {
    let (mut app, _) = setup_app(HudViewMode::Minimal);

    assert_eq!(hud(&app).current_view_mode, HudViewMode::Minimal);
    assert_eq!(hud(&app).subscriptions.len(), 3);
    assert_eq!(visible_layouts(&mut app), vec![HudViewMode::Minimal]);

    let bars = hud(&app).layouts.minimal.bars;
    assert_eq!(bar(&app, bars.health).value, 40.0);
    assert_eq!(bar(&app, bars.health).percentage, 0.4);
    assert_eq!(bar(&app, bars.psi).value_text, "1.0k");
}

#[test]
fn test_setup_without_character_fails() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<HudSettings>();

    let result = app
        .world_mut()
        .run_system_once::<_, Result, _>(setup_hud)
        .expect("system ran");
    assert!(result.is_err());
    assert!(app.world().get_resource::<Hud>().is_none());
}

#[test]
fn test_setup_without_settings_fails() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.world_mut().spawn(PlayerCharacter);

    let result = app
        .world_mut()
        .run_system_once::<_, Result, _>(setup_hud)
        .expect("system ran");
    assert!(result.is_err());
}

#[test]
fn test_cycling_rebinds_subscriptions() {
    let (mut app, character) = setup_app(HudViewMode::Minimal);
    let old_subscriptions = hud(&app).subscriptions.clone();

    app.world_mut().trigger(CycleHudViewMode);
    app.update();

    assert_eq!(hud(&app).current_view_mode, HudViewMode::Moderate);
    assert_eq!(visible_layouts(&mut app), vec![HudViewMode::Moderate]);
    // Bars plus the key readout.
    assert_eq!(hud(&app).subscriptions.len(), 4);
    for observer in old_subscriptions {
        assert!(app.world().get_entity(observer).is_err());
    }

    app.world_mut().trigger(UpdateHealth {
        entity: character,
        delta: -15,
    });
    app.update();

    let layouts = hud(&app).layouts;
    assert_eq!(bar(&app, layouts.moderate.bars.health).value, 25.0);
    // Off-screen layouts stop listening.
    assert_eq!(bar(&app, layouts.minimal.bars.health).value, 40.0);
}

#[test]
fn test_clean_mode_hides_everything_and_listens_to_nothing() {
    let (mut app, character) = setup_app(HudViewMode::Minimal);

    app.world_mut().trigger(CycleHudViewModeBack);
    app.update();

    assert_eq!(hud(&app).current_view_mode, HudViewMode::CleanAndPristine);
    assert!(hud(&app).subscriptions.is_empty());
    assert!(visible_layouts(&mut app).is_empty());

    app.world_mut().trigger(UpdateHealth {
        entity: character,
        delta: -15,
    });
    app.update();

    let layouts = hud(&app).layouts;
    assert_eq!(bar(&app, layouts.minimal.bars.health).value, 40.0);

    // And back around the other way.
    app.world_mut().trigger(CycleHudViewModeBack);
    app.update();
    assert_eq!(hud(&app).current_view_mode, HudViewMode::SensoryOverload);
}

#[test]
fn test_sensory_overload_shows_numbers_and_keys() {
    let (mut app, character) = setup_app(HudViewMode::SensoryOverload);

    app.world_mut().trigger(AddKey {
        entity: character,
        key: "red".into(),
    });
    app.world_mut().trigger(AddKey {
        entity: character,
        key: "blue".into(),
    });
    app.update();

    let widgets = hud(&app).layouts.sensory_overload;
    let stats = widgets.stats.expect("stat readout");
    assert_eq!(text(&app, stats.health), "40.0 / 100");
    assert_eq!(text(&app, stats.psi), "1.0k / 1.0k");
    assert_eq!(text(&app, widgets.keys.expect("key readout")), "blue, red");
}

#[test]
fn test_switching_to_the_same_mode_resends_stats() {
    let (mut app, _) = setup_app(HudViewMode::Minimal);
    let bars = hud(&app).layouts.minimal.bars;

    app.world_mut()
        .get_mut::<StatBar>(bars.health)
        .expect("stat bar")
        .value = 0.0;

    app.world_mut().trigger(SetHudViewMode(HudViewMode::Minimal));
    app.update();

    assert_eq!(bar(&app, bars.health).value, 40.0);
    assert_eq!(hud(&app).subscriptions.len(), 3);
}

#[test]
fn test_teardown_despawns_layouts() {
    let (mut app, _) = setup_app(HudViewMode::Moderate);
    let layouts = hud(&app).layouts;

    app.world_mut()
        .run_system_once(teardown_hud)
        .expect("system ran");

    assert!(app.world().get_resource::<Hud>().is_none());
    for root in layouts.roots() {
        assert!(app.world().get_entity(root).is_err());
    }
    let mut subscriptions = app
        .world_mut()
        .query_filtered::<Entity, With<HudSubscription>>();
    assert_eq!(subscriptions.iter(app.world()).count(), 0);
}

#[test]
fn test_key_listing_text() {
    assert_eq!(key_listing_text(""), "-");
    assert_eq!(key_listing_text("gold,"), "gold");
    assert_eq!(key_listing_text("blue,red,"), "blue, red");
}
