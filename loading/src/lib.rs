mod resources;

#[cfg(test)]
mod tests;

use {
    bevy::prelude::*,
    character_components::{CharacterTuning, PlayerCharacter},
    hud::HudSettings,
    player_controller::InputBindings,
    states::{GameState, LoadingPhase},
};

pub use resources::{BINDINGS_PATH, ConfigHandles, HUD_SETTINGS_PATH, TUNING_PATH};

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingStatus>()
            .init_state::<LoadingPhase>()
            // Phase: Config - load the RON configuration
            .add_systems(Startup, start_loading)
            .add_systems(
                Update,
                check_config_loaded
                    .run_if(in_state(GameState::Loading).and(in_state(LoadingPhase::Config))),
            )
            // Phase: SpawnWorld - wait for the player character to appear
            .add_systems(
                Update,
                check_world_spawned.run_if(in_state(LoadingPhase::SpawnWorld)),
            )
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading)
            // Loading UI
            .add_systems(OnEnter(GameState::Loading), setup_loading_ui)
            .add_systems(
                Update,
                update_loading_ui.run_if(in_state(GameState::Loading)),
            )
            .add_systems(OnExit(GameState::Loading), cleanup_loading_ui);
    }
}

#[derive(Resource, Default)]
pub struct LoadingStatus {
    pub current_phase: String,
    pub detail: String,
}

// --- Phase: Config ---

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("started loading configuration");
    commands.insert_resource(ConfigHandles {
        tuning: asset_server.load(TUNING_PATH),
        hud: asset_server.load(HUD_SETTINGS_PATH),
        bindings: asset_server.load(BINDINGS_PATH),
    });
}

/// Resolves one config asset: `None` while still loading, the default if the file failed.
fn resolve<A: Asset + Clone + Default>(
    asset_server: &AssetServer,
    assets: &Assets<A>,
    handle: &Handle<A>,
    path: &str,
) -> Option<A> {
    if let Some(asset) = assets.get(handle) {
        return Some(asset.clone());
    }

    if asset_server
        .get_load_state(handle.id())
        .is_some_and(|state| state.is_failed())
    {
        warn!(%path, "failed to load config, falling back to defaults");
        return Some(A::default());
    }

    None
}

#[allow(clippy::too_many_arguments)]
pub fn check_config_loaded(
    mut commands: Commands,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    asset_server: Res<AssetServer>,
    handles: Res<ConfigHandles>,
    tunings: Res<Assets<CharacterTuning>>,
    hud_settings: Res<Assets<HudSettings>>,
    bindings: Res<Assets<InputBindings>>,
) {
    status.current_phase = "Loading Config".into();
    status.detail = "Reading tuning, HUD and control files...".into();

    let (Some(tuning), Some(hud), Some(bindings)) = (
        resolve(&asset_server, &tunings, &handles.tuning, TUNING_PATH),
        resolve(&asset_server, &hud_settings, &handles.hud, HUD_SETTINGS_PATH),
        resolve(&asset_server, &bindings, &handles.bindings, BINDINGS_PATH),
    ) else {
        return;
    };

    info!("configuration loaded");
    debug!(?tuning, ?hud, "config values");
    commands.insert_resource(tuning);
    commands.insert_resource(hud);
    commands.insert_resource(bindings);
    commands.remove_resource::<ConfigHandles>();

    next_phase.set(LoadingPhase::SpawnWorld);
}

// --- Phase: SpawnWorld ---

fn check_world_spawned(
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    query: Query<(), With<PlayerCharacter>>,
) {
    status.current_phase = "Spawning World".into();
    status.detail = "Placing the player...".into();

    if !query.is_empty() {
        info!("player spawned, entering Ready state");
        next_phase.set(LoadingPhase::Ready);
    }
}

// --- Phase: Ready ---

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Loading complete, transitioning to Running");
    next_state.set(GameState::Running);
}

// --- Loading UI ---

#[derive(Component)]
struct LoadingUi;

fn setup_loading_ui(mut commands: Commands) {
    info!("spawning loading ui");
    commands.spawn((
        Text::new("Loading..."),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            right: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        LoadingUi,
    ));
}

fn update_loading_ui(status: Res<LoadingStatus>, mut query: Query<&mut Text, With<LoadingUi>>) {
    if let Ok(mut text) = query.single_mut() {
        text.0 = format!("Loading...\n{}\n{}", status.current_phase, status.detail);
    }
}

fn cleanup_loading_ui(mut commands: Commands, query: Query<Entity, With<LoadingUi>>) {
    info!("cleaning up loading ui");
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
