use {
    bevy::prelude::*,
    character_components::{CharacterTuning, ControlRotation, Possessed},
};

const GROUND_SIZE: f32 = 20_000.0;
const CAPSULE_RADIUS: f32 = 40.0;
const CAPSULE_LENGTH: f32 = 100.0;

/// Third-person camera orbiting the possessed character.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowCamera {
    pub distance: f32,
    /// Height of the orbit focus above the character's feet.
    pub height: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            distance: 450.0,
            height: 150.0,
        }
    }
}

pub fn spawn_world(
    mut commands: Commands,
    tuning: Res<CharacterTuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("spawning world");

    commands.spawn((
        Name::new("FollowCamera"),
        Camera3d::default(),
        FollowCamera::default(),
        Transform::from_xyz(0.0, 150.0, 450.0).looking_at(Vec3::Y * 150.0, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::YXZ, 0.6, -0.9, 0.0)),
    ));

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.45, 0.3))),
        Transform::default(),
    ));

    // Character origin sits on the ground, the capsule is offset above it.
    let player = commands
        .spawn((
            Name::new("Player"),
            tuning.character_bundle(),
            Possessed,
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|player| {
            player.spawn((
                Mesh3d(meshes.add(Capsule3d::new(CAPSULE_RADIUS, CAPSULE_LENGTH))),
                MeshMaterial3d(materials.add(Color::srgb(0.8, 0.7, 0.6))),
                Transform::from_xyz(0.0, CAPSULE_RADIUS + CAPSULE_LENGTH / 2.0, 0.0),
            ));
        })
        .id();

    debug!(?player, "player character spawned");
}

pub fn follow_possessed(
    characters: Query<(&Transform, &ControlRotation), (With<Possessed>, Without<FollowCamera>)>,
    mut cameras: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok((target, rotation)) = characters.single() else {
        return;
    };

    let orbit = Quat::from_euler(EulerRot::YXZ, rotation.yaw, rotation.pitch, 0.0);
    for (mut transform, follow) in cameras.iter_mut() {
        let focus = target.translation + Vec3::Y * follow.height;
        transform.translation = focus + orbit * Vec3::new(0.0, 0.0, follow.distance);
        transform.look_at(focus, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_trails_behind_the_character() {
        let mut app = App::new();
        app.add_systems(Update, follow_possessed);

        app.world_mut().spawn((
            Possessed,
            Transform::from_xyz(100.0, 0.0, 0.0),
            ControlRotation {
                yaw: std::f32::consts::FRAC_PI_2,
                pitch: 0.0,
            },
        ));
        let camera = app
            .world_mut()
            .spawn((FollowCamera::default(), Transform::default()))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        // Facing -X after a quarter turn, so the camera sits on +X.
        assert!(
            transform
                .translation
                .abs_diff_eq(Vec3::new(550.0, 150.0, 0.0), 1e-3),
            "{}",
            transform.translation
        );
    }

    #[test]
    fn test_no_possessed_character_leaves_camera_alone() {
        let mut app = App::new();
        app.add_systems(Update, follow_possessed);
        let camera = app
            .world_mut()
            .spawn((FollowCamera::default(), Transform::from_xyz(1.0, 2.0, 3.0)))
            .id();

        app.update();

        assert_eq!(
            app.world().get::<Transform>(camera).unwrap().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }
}
