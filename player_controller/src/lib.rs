use {
    bevy::{ecs::query::QuerySingleError, input::mouse::AccumulatedMouseMotion, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    character::{add_movement_input, jump},
    character_components::{CharacterMovement, ControlRotation, Exertion, Possessed, Stamina},
    character_events::PsiBlast,
    hud::CycleHudViewMode,
    screenshot::TakeScreenshot,
    states::GameState,
    system_schedule::GameSchedule,
    thiserror::Error,
};

pub mod bindings;

#[cfg(test)]
mod tests;

pub use bindings::InputBindings;

pub struct PlayerControllerPlugin;

impl Plugin for PlayerControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<InputBindings>::new(&["bindings.ron"]))
            .add_message::<PlayerAction>()
            .register_type::<PlayerAction>()
            .add_systems(
                Update,
                (
                    collect_player_input.in_set(GameSchedule::FrameStart),
                    dispatch_player_actions.in_set(GameSchedule::ResolveIntent),
                )
                    .run_if(in_state(GameState::Running)),
            );
    }
}

/// One frame's worth of player intent, decoupled from the devices producing it.
#[derive(Message, Reflect, Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// `y` forward, `x` right.
    Move(Vec2),
    /// `(yaw, pitch)` deltas in radians.
    Look(Vec2),
    Jump,
    ToggleCrouch,
    ToggleSprint,
    PsiBlast,
    CycleUiMode,
    Screenshot,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("cannot pick the possessed character: {0}")]
    Possessed(#[from] QuerySingleError),
}

pub fn collect_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<AccumulatedMouseMotion>,
    bindings: Res<InputBindings>,
    mut actions: MessageWriter<PlayerAction>,
) {
    let axis = bindings.move_axis(&keys);
    if axis != Vec2::ZERO {
        actions.write(PlayerAction::Move(axis));
    }

    if mouse.delta != Vec2::ZERO {
        actions.write(PlayerAction::Look(bindings.look_delta(mouse.delta)));
    }

    for (key, action) in [
        (bindings.jump, PlayerAction::Jump),
        (bindings.toggle_crouch, PlayerAction::ToggleCrouch),
        (bindings.toggle_sprint, PlayerAction::ToggleSprint),
        (bindings.psi_blast, PlayerAction::PsiBlast),
        (bindings.cycle_ui_mode, PlayerAction::CycleUiMode),
        (bindings.screenshot, PlayerAction::Screenshot),
    ] {
        if keys.just_pressed(key) {
            actions.write(action);
        }
    }
}

pub fn dispatch_player_actions(
    mut actions: MessageReader<PlayerAction>,
    mut commands: Commands,
    mut possessed: Query<
        (
            Entity,
            &mut CharacterMovement,
            &mut ControlRotation,
            &mut Exertion,
            &Stamina,
        ),
        With<Possessed>,
    >,
) -> Result {
    if actions.is_empty() {
        return Ok(());
    }

    let (entity, mut movement, mut rotation, mut exertion, stamina) = match possessed.single_mut()
    {
        Ok(character) => character,
        Err(QuerySingleError::NoEntities(_)) => {
            debug!(count = actions.len(), "no possessed character, dropping input");
            actions.clear();
            return Ok(());
        }
        Err(error) => {
            actions.clear();
            return Err(ControllerError::from(error).into());
        }
    };

    for action in actions.read() {
        match *action {
            PlayerAction::Move(axis) => {
                let facing = Quat::from_rotation_y(rotation.yaw);
                let (forward, right) = (facing * Vec3::NEG_Z, facing * Vec3::X);
                add_movement_input(&mut movement, stamina, &mut exertion, forward, axis.y);
                add_movement_input(&mut movement, stamina, &mut exertion, right, axis.x);
            }
            PlayerAction::Look(delta) => {
                rotation.add_yaw(delta.x);
                rotation.add_pitch(delta.y);
            }
            PlayerAction::Jump => {
                movement.uncrouch();
                jump(&mut movement, stamina, &mut exertion);
            }
            PlayerAction::ToggleCrouch => {
                if movement.is_crouched {
                    movement.uncrouch();
                } else {
                    movement.crouch();
                }
            }
            PlayerAction::ToggleSprint => movement.toggle_running(),
            PlayerAction::PsiBlast => commands.trigger(PsiBlast { entity }),
            PlayerAction::CycleUiMode => commands.trigger(CycleHudViewMode),
            PlayerAction::Screenshot => commands.trigger(TakeScreenshot),
        }
    }

    Ok(())
}
