use {
    bevy::{ecs::query::QuerySingleError, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    character_components::PlayerCharacter,
    components::{Hud, HudLayout},
    states::GameState,
    thiserror::Error,
};

pub mod components;
pub mod layouts;
pub mod subscriptions;
pub mod view_mode;

#[cfg(test)]
mod tests;

pub use view_mode::{HudSettings, HudViewMode};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<HudSettings>::new(&["settings.ron"]))
            .register_type::<HudViewMode>()
            .add_observer(on_set_hud_view_mode)
            .add_observer(on_cycle_hud_view_mode)
            .add_observer(on_cycle_hud_view_mode_back)
            .add_systems(OnEnter(GameState::Running), setup_hud)
            .add_systems(OnExit(GameState::Running), teardown_hud);
    }
}

#[derive(Debug, Error)]
pub enum HudError {
    #[error("the HUD needs exactly one player character: {0}")]
    Character(#[from] QuerySingleError),
    #[error("HUD settings were not loaded")]
    MissingSettings,
}

/// Show `mode`, rebinding the widgets to the character.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetHudViewMode(pub HudViewMode);

/// Advance to the next view mode, wrapping around.
#[derive(Event, Debug, Clone, Copy)]
pub struct CycleHudViewMode;

#[derive(Event, Debug, Clone, Copy)]
pub struct CycleHudViewModeBack;

pub fn setup_hud(
    mut commands: Commands,
    settings: Option<Res<HudSettings>>,
    characters: Query<Entity, With<PlayerCharacter>>,
) -> Result {
    let settings = settings.ok_or(HudError::MissingSettings)?;
    let character = characters.single().map_err(HudError::from)?;

    let layouts = layouts::spawn_layouts(&mut commands);
    commands.insert_resource(Hud {
        current_view_mode: settings.initial_view_mode,
        character,
        layouts,
        subscriptions: Vec::new(),
    });
    commands.trigger(SetHudViewMode(settings.initial_view_mode));

    debug!(?character, mode = ?settings.initial_view_mode, "HUD spawned");
    Ok(())
}

pub fn teardown_hud(mut commands: Commands, hud: Option<ResMut<Hud>>) {
    let Some(mut hud) = hud else {
        return;
    };

    debug!("tearing down HUD");
    subscriptions::unsubscribe(&mut commands, &mut hud);
    for root in hud.layouts.roots() {
        commands.entity(root).try_despawn();
    }
    commands.remove_resource::<Hud>();
}

pub fn on_set_hud_view_mode(
    trigger: On<SetHudViewMode>,
    mut commands: Commands,
    hud: Option<ResMut<Hud>>,
    mut layouts: Query<(&HudLayout, &mut Node)>,
) {
    let SetHudViewMode(mode) = *trigger.event();
    let Some(mut hud) = hud else {
        debug!(?mode, "no HUD to switch");
        return;
    };

    info!(from = ?hud.current_view_mode, to = ?mode, "HUD view mode changed");
    subscriptions::apply_view_mode(&mut commands, &mut hud, mode, &mut layouts);
}

pub fn on_cycle_hud_view_mode(
    _trigger: On<CycleHudViewMode>,
    mut commands: Commands,
    hud: Option<Res<Hud>>,
) {
    if let Some(hud) = hud {
        commands.trigger(SetHudViewMode(hud.current_view_mode.next()));
    }
}

pub fn on_cycle_hud_view_mode_back(
    _trigger: On<CycleHudViewModeBack>,
    mut commands: Commands,
    hud: Option<Res<Hud>>,
) {
    if let Some(hud) = hud {
        commands.trigger(SetHudViewMode(hud.current_view_mode.previous()));
    }
}
