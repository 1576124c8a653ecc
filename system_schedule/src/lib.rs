use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameSchedule {
    /// Raw device input is turned into player actions.
    FrameStart,
    /// Player actions are routed to the character and the HUD.
    ResolveIntent,
    /// Stat ticks and character motion.
    PerformAction,
    /// Widgets pick up whatever changed this frame.
    Effect,
    /// Camera follows the possessed character.
    FrameEnd,
}

pub struct SystemSchedulePlugin;

impl Plugin for SystemSchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameSchedule::FrameStart,
                GameSchedule::ResolveIntent,
                GameSchedule::PerformAction,
                GameSchedule::Effect,
                GameSchedule::FrameEnd,
            )
                .chain(),
        );
    }
}
