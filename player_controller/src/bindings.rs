use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// Key bindings loaded from `config/controls.bindings.ron`.
#[derive(Asset, Resource, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub move_forward: KeyCode,
    pub move_back: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub jump: KeyCode,
    pub toggle_crouch: KeyCode,
    pub toggle_sprint: KeyCode,
    pub psi_blast: KeyCode,
    pub cycle_ui_mode: KeyCode,
    pub screenshot: KeyCode,
    /// Radians per pixel of mouse travel.
    pub mouse_sensitivity: f32,
    pub invert_pitch: bool,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            move_forward: KeyCode::KeyW,
            move_back: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            jump: KeyCode::Space,
            toggle_crouch: KeyCode::KeyC,
            toggle_sprint: KeyCode::ShiftLeft,
            psi_blast: KeyCode::KeyQ,
            cycle_ui_mode: KeyCode::Tab,
            screenshot: KeyCode::F12,
            mouse_sensitivity: 0.003,
            invert_pitch: false,
        }
    }
}

impl InputBindings {
    /// Planar move axis from held keys: `y` forward, `x` right.
    pub fn move_axis(&self, keys: &ButtonInput<KeyCode>) -> Vec2 {
        let axis = |positive: KeyCode, negative: KeyCode| {
            keys.pressed(positive) as i8 as f32 - keys.pressed(negative) as i8 as f32
        };
        Vec2::new(
            axis(self.move_right, self.move_left),
            axis(self.move_forward, self.move_back),
        )
    }

    /// Mouse travel to `(yaw, pitch)` deltas. Moving the mouse up looks up.
    pub fn look_delta(&self, mouse: Vec2) -> Vec2 {
        let pitch_sign = if self.invert_pitch { 1.0 } else { -1.0 };
        Vec2::new(-mouse.x, mouse.y * pitch_sign) * self.mouse_sensitivity
    }
}
