use {
    bevy::prelude::*,
    character::CharacterPlugin,
    hud::HudPlugin,
    loading::LoadingManagerPlugin,
    player_controller::PlayerControllerPlugin,
    screenshot::ScreenshotExportPlugin,
    states::{GameState, LoadingPhase},
    system_schedule::{GameSchedule, SystemSchedulePlugin},
    widgets::WidgetsPlugin,
};

pub mod systems;

pub use systems::FollowCamera;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_plugins((
                SystemSchedulePlugin,
                LoadingManagerPlugin,
                CharacterPlugin,
                WidgetsPlugin,
                HudPlugin,
                PlayerControllerPlugin,
                ScreenshotExportPlugin,
            ))
            .add_systems(OnEnter(LoadingPhase::SpawnWorld), systems::spawn_world)
            .add_systems(
                Update,
                systems::follow_possessed
                    .in_set(GameSchedule::FrameEnd)
                    .run_if(in_state(GameState::Running)),
            );
    }
}
