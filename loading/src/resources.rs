//! Handles kept alive while the configuration loads

use {
    bevy::prelude::*, character_components::CharacterTuning, hud::HudSettings,
    player_controller::InputBindings,
};

pub const TUNING_PATH: &str = "config/player.tuning.ron";
pub const HUD_SETTINGS_PATH: &str = "config/hud.settings.ron";
pub const BINDINGS_PATH: &str = "config/controls.bindings.ron";

#[derive(Debug, Resource)]
pub struct ConfigHandles {
    pub tuning: Handle<CharacterTuning>,
    pub hud: Handle<HudSettings>,
    pub bindings: Handle<InputBindings>,
}
