use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    character_components::{
        CharacterMovement, CharacterTuning, ControlRotation, Exertion, Health, PlayerCharacter,
        Possessed, PsiPower, Stamina, StatTickTimer,
    },
    character_events::CharacterEventsPlugin,
    states::GameState,
    system_schedule::GameSchedule,
    wallet::WalletPlugin,
};

pub mod motion;
pub mod stats;


pub use motion::{add_movement_input, jump};

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<CharacterTuning>::new(&["tuning.ron"]))
            .add_plugins(CharacterStatsPlugin)
            .register_type::<PlayerCharacter>()
            .register_type::<Possessed>()
            .register_type::<CharacterMovement>()
            .register_type::<ControlRotation>()
            .add_systems(
                Update,
                motion::apply_character_motion
                    .in_set(GameSchedule::PerformAction)
                    .after(stats::tick_character_stats)
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(OnExit(GameState::Running), despawn_characters);
    }
}

/// Stat tracking on its own, without motion, asset loading or game state.
///
/// Split out so the stat rules can run in a bare `App`.
pub struct CharacterStatsPlugin;

impl Plugin for CharacterStatsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CharacterEventsPlugin, WalletPlugin))
            .register_type::<Health>()
            .register_type::<Stamina>()
            .register_type::<PsiPower>()
            .register_type::<Exertion>()
            .register_type::<StatTickTimer>()
            .add_observer(stats::on_update_health)
            .add_observer(stats::on_restore_health)
            .add_observer(stats::on_set_max_health)
            .add_observer(stats::on_set_stamina_recuperation)
            .add_observer(stats::on_psi_blast)
            .add_observer(stats::on_add_key)
            .add_observer(stats::on_remove_key)
            .add_observer(stats::on_test_key)
            .add_observer(stats::on_broadcast_current_stats)
            .add_systems(
                Update,
                stats::tick_character_stats.in_set(GameSchedule::PerformAction),
            );
    }
}

fn despawn_characters(mut commands: Commands, characters: Query<Entity, With<PlayerCharacter>>) {
    for entity in characters.iter() {
        debug!(?entity, "despawning player character");
        commands.entity(entity).despawn();
    }
}
