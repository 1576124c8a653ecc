use {
    crate::*,
    bevy::{ecs::system::RunSystemOnce, input::mouse::AccumulatedMouseMotion, prelude::*},
    character::CharacterStatsPlugin,
    character_components::{
        CharacterMovement, ControlRotation, Exertion, PlayerCharacter, Possessed, Stamina,
    },
    character_events::PsiBlastUnleashed,
    hud::CycleHudViewMode,
    screenshot::TakeScreenshot,
};

#[derive(Resource, Default)]
struct Requests {
    blasts: usize,
    hud_cycles: usize,
    screenshots: usize,
}

fn setup_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CharacterStatsPlugin)
        .add_message::<PlayerAction>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<AccumulatedMouseMotion>()
        .init_resource::<InputBindings>()
        .init_resource::<Requests>()
        .add_systems(
            Update,
            (collect_player_input, dispatch_player_actions).chain(),
        )
        .add_observer(|_: On<PsiBlastUnleashed>, mut r: ResMut<Requests>| r.blasts += 1)
        .add_observer(|_: On<CycleHudViewMode>, mut r: ResMut<Requests>| r.hud_cycles += 1)
        .add_observer(|_: On<TakeScreenshot>, mut r: ResMut<Requests>| r.screenshots += 1);
    app
}

fn spawn_possessed(app: &mut App) -> Entity {
    app.world_mut().spawn((PlayerCharacter, Possessed)).id()
}

fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

fn movement(app: &App, entity: Entity) -> &CharacterMovement {
    app.world().get::<CharacterMovement>(entity).unwrap()
}

#[test]
fn test_held_key_moves_along_facing() {
    let mut app = setup_app();
    let player = spawn_possessed(&mut app);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyW);
    app.update();

    let pending = movement(&app, player).pending_input;
    assert!(pending.abs_diff_eq(Vec3::NEG_Z, 1e-5), "{pending}");
}

#[test]
fn test_toggle_crouch_alternates() {
    let mut app = setup_app();
    let player = spawn_possessed(&mut app);

    tap(&mut app, KeyCode::KeyC);
    assert!(movement(&app, player).is_crouched);

    tap(&mut app, KeyCode::KeyC);
    assert!(!movement(&app, player).is_crouched);
}

#[test]
fn test_jump_stands_up_even_without_stamina() {
    let mut app = setup_app();
    let player = spawn_possessed(&mut app);
    app.world_mut().get_mut::<Stamina>(player).unwrap().current = 10.0;

    tap(&mut app, KeyCode::KeyC);
    tap(&mut app, KeyCode::Space);

    let movement = movement(&app, player);
    assert!(!movement.is_crouched);
    assert!(movement.grounded);
    assert!(!app.world().get::<Exertion>(player).unwrap().has_jumped);
}

#[test]
fn test_jump_with_stamina_leaves_the_ground() {
    let mut app = setup_app();
    let player = spawn_possessed(&mut app);

    tap(&mut app, KeyCode::Space);

    assert!(!movement(&app, player).grounded);
    assert!(app.world().get::<Exertion>(player).unwrap().has_jumped);
}

#[test]
fn test_sprint_toggle_and_exhaustion() {
    let mut app = setup_app();
    let player = spawn_possessed(&mut app);

    tap(&mut app, KeyCode::ShiftLeft);
    assert!(movement(&app, player).is_running);
    assert_eq!(movement(&app, player).max_walk_speed, 800.0);

    app.world_mut().get_mut::<Stamina>(player).unwrap().current = 0.0;
    tap(&mut app, KeyCode::KeyD);

    assert!(!movement(&app, player).is_running);
    assert!(!app.world().get::<Exertion>(player).unwrap().has_ran);
}

#[test]
fn test_look_turns_the_character() {
    let mut app = setup_app();
    let player = spawn_possessed(&mut app);

    app.world_mut()
        .resource_mut::<AccumulatedMouseMotion>()
        .delta = Vec2::new(-100.0, -1000.0);
    app.update();

    let rotation = app.world().get::<ControlRotation>(player).unwrap();
    assert!((rotation.yaw - 0.3).abs() < 1e-5);
    assert_eq!(rotation.pitch, ControlRotation::PITCH_LIMIT);
}

#[test]
fn test_buttons_forward_requests() {
    let mut app = setup_app();
    spawn_possessed(&mut app);

    tap(&mut app, KeyCode::KeyQ);
    tap(&mut app, KeyCode::Tab);
    tap(&mut app, KeyCode::F12);

    let requests = app.world().resource::<Requests>();
    assert_eq!(requests.blasts, 1);
    assert_eq!(requests.hud_cycles, 1);
    assert_eq!(requests.screenshots, 1);
}

#[test]
fn test_no_possessed_character_drops_input() {
    let mut app = setup_app();
    let bystander = app.world_mut().spawn(PlayerCharacter).id();

    tap(&mut app, KeyCode::KeyC);
    tap(&mut app, KeyCode::KeyQ);

    assert!(!movement(&app, bystander).is_crouched);
    assert_eq!(app.world().resource::<Requests>().blasts, 0);
}

#[test]
fn test_two_possessed_characters_is_an_error() {
    let mut app = setup_app();
    spawn_possessed(&mut app);
    spawn_possessed(&mut app);

    app.world_mut().write_message(PlayerAction::Jump);
    let result = app
        .world_mut()
        .run_system_once::<_, Result, _>(dispatch_player_actions)
        .expect("system ran");

    assert!(result.is_err());
}

#[test]
fn test_bindings_parse_from_ron() {
    let bindings: InputBindings =
        ron::from_str("(jump: KeyF, mouse_sensitivity: 0.01)").expect("valid ron");

    assert_eq!(bindings.jump, KeyCode::KeyF);
    assert_eq!(bindings.mouse_sensitivity, 0.01);
    assert_eq!(bindings.move_forward, KeyCode::KeyW);
}

#[test]
fn test_move_axis_cancels_opposites() {
    let bindings = InputBindings::default();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyA);
    keys.press(KeyCode::KeyD);
    keys.press(KeyCode::KeyS);

    assert_eq!(bindings.move_axis(&keys), Vec2::new(0.0, -1.0));
}
