use {
    bevy::prelude::*,
    character_components::{CharacterMovement, ControlRotation, Exertion, Stamina},
};

const GRAVITY: f32 = 980.0;
const CROUCHED_SPEED_FACTOR: f32 = 0.5;
const GROUND_HEIGHT: f32 = 0.0;

/// Queues movement along `direction` for this frame.
///
/// A sprinting character with no stamina left is dropped back to walking
/// before the input is accepted.
pub fn add_movement_input(
    movement: &mut CharacterMovement,
    stamina: &Stamina,
    exertion: &mut Exertion,
    direction: Vec3,
    scale: f32,
) {
    if movement.is_running && stamina.is_exhausted() {
        debug!("out of stamina, dropping out of sprint");
        movement.set_running(false);
    }

    movement.add_input(direction, scale);

    if movement.is_running {
        exertion.has_ran = true;
    }
}

/// Jumping needs enough stamina to pay for it. Returns whether the jump was taken.
pub fn jump(movement: &mut CharacterMovement, stamina: &Stamina, exertion: &mut Exertion) -> bool {
    if !stamina.can_jump() {
        debug!(stamina = stamina.current, "not enough stamina to jump");
        return false;
    }

    movement.uncrouch();
    movement.launch();
    exertion.has_jumped = true;
    true
}

pub fn apply_character_motion(
    time: Res<Time>,
    mut characters: Query<(&mut Transform, &mut CharacterMovement, &ControlRotation)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut movement, rotation) in characters.iter_mut() {
        transform.rotation = Quat::from_rotation_y(rotation.yaw);

        let input = movement.consume_input();
        let planar = Vec3::new(input.x, 0.0, input.z).clamp_length_max(1.0);
        let speed = if movement.is_crouched {
            movement.max_walk_speed * CROUCHED_SPEED_FACTOR
        } else {
            movement.max_walk_speed
        };
        transform.translation += planar * speed * dt;

        if movement.grounded {
            continue;
        }

        movement.vertical_velocity -= GRAVITY * dt;
        transform.translation.y += movement.vertical_velocity * dt;

        if transform.translation.y <= GROUND_HEIGHT {
            transform.translation.y = GROUND_HEIGHT;
            movement.vertical_velocity = 0.0;
            movement.grounded = true;
        }
    }
}
