use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::time::Duration,
    wallet::KeyWallet,
};

/// Starting value for every base stat that isn't tuned explicitly.
pub const BASE_STAT_VALUE: i32 = 100;

/// Lowest value health can be clamped to. Anything at or below zero is dead.
pub const MIN_HEALTH: i32 = -1;

/// `(old, new, max)` triple carried by every stat notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatChange<T> {
    pub old: T,
    pub new: T,
    pub max: T,
}

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
#[require(
    Health,
    Stamina,
    PsiPower,
    KeyWallet,
    Exertion,
    CharacterMovement,
    ControlRotation,
    StatTickTimer
)]
pub struct PlayerCharacter;

/// The character the local player controller is driving.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Possessed;

// ============================================================================
// Health
// ============================================================================

#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::full(BASE_STAT_VALUE)
    }
}

/// Outcome of [`Health::apply_delta`] and [`Health::set_max`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthUpdate {
    pub change: Option<StatChange<i32>>,
    /// Set only on the update that took health from above zero to zero or below.
    pub died: bool,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Dead is dead: once health is at or below zero nothing here changes it again.
    pub fn apply_delta(&mut self, delta: i32) -> HealthUpdate {
        if self.is_dead() {
            return HealthUpdate::default();
        }

        let old = self.current;
        self.current = self
            .current
            .saturating_add(delta)
            .max(MIN_HEALTH)
            .min(self.max);

        HealthUpdate {
            change: (self.current != old).then_some(StatChange {
                old,
                new: self.current,
                max: self.max,
            }),
            died: self.is_dead(),
        }
    }

    pub fn restore_full(&mut self) -> Option<StatChange<i32>> {
        if self.current >= self.max {
            return None;
        }
        let old = self.current;
        self.current = self.max;
        Some(StatChange {
            old,
            new: self.current,
            max: self.max,
        })
    }

    /// Accepts any value. Lowering the max also caps the current value, which
    /// kills the character when the new max is zero or below.
    ///
    /// The reported `old` is the previous *max*, so listeners can rescale.
    pub fn set_max(&mut self, max: i32) -> HealthUpdate {
        if max == self.max {
            return HealthUpdate::default();
        }
        let was_alive = !self.is_dead();
        let old_max = self.max;
        self.max = max;
        if self.current > self.max {
            self.current = self.max;
        }
        HealthUpdate {
            change: Some(StatChange {
                old: old_max,
                new: self.current,
                max: self.max,
            }),
            died: was_alive && self.is_dead(),
        }
    }

    pub fn snapshot(&self) -> StatChange<i32> {
        StatChange {
            old: self.current,
            new: self.current,
            max: self.max,
        }
    }
}

// ============================================================================
// Stamina
// ============================================================================

#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    /// Gained per tick when the character neither jumped, ran nor crouched.
    pub recuperation_factor: f32,
    pub jump_cost: f32,
    pub run_cost: f32,
    /// Gained per tick while crouched.
    pub rest_rebate: f32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self {
            current: 100.0,
            max: 100.0,
            recuperation_factor: 1.0,
            jump_cost: 25.0,
            run_cost: 5.0,
            rest_rebate: 4.0,
        }
    }
}

impl Stamina {
    pub fn can_afford(&self, cost: f32) -> bool {
        self.current - cost >= 0.0
    }

    pub fn can_jump(&self) -> bool {
        self.can_afford(self.jump_cost)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current <= 0.0
    }

    /// Picks exactly one rate, worst case first: jump, run, rest, default.
    pub fn rate_for(&self, exertion: Exertion, is_crouched: bool) -> f32 {
        if exertion.has_jumped {
            -self.jump_cost
        } else if exertion.has_ran {
            -self.run_cost
        } else if is_crouched {
            self.rest_rebate
        } else {
            self.recuperation_factor
        }
    }

    pub fn apply_rate(&mut self, rate: f32) -> Option<StatChange<f32>> {
        let old = self.current;
        self.current = (self.current + rate).min(self.max).max(0.0);
        (self.current != old).then_some(StatChange {
            old,
            new: self.current,
            max: self.max,
        })
    }

    pub fn snapshot(&self) -> StatChange<f32> {
        StatChange {
            old: self.current,
            new: self.current,
            max: self.max,
        }
    }
}

// ============================================================================
// Psi Power
// ============================================================================

#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct PsiPower {
    pub current: f32,
    pub max: f32,
    pub recharge_rate: f32,
    pub blast_cost: f32,
}

impl Default for PsiPower {
    fn default() -> Self {
        Self {
            current: 1000.0,
            max: 1000.0,
            recharge_rate: 1.0,
            blast_cost: 150.0,
        }
    }
}

impl PsiPower {
    pub fn recharge(&mut self) -> Option<StatChange<f32>> {
        if self.current == self.max {
            return None;
        }
        let old = self.current;
        self.current = (self.current + self.recharge_rate).min(self.max).max(0.0);
        Some(StatChange {
            old,
            new: self.current,
            max: self.max,
        })
    }

    /// Spends `cost` only if at least that much is available.
    pub fn try_spend(&mut self, cost: f32) -> Option<StatChange<f32>> {
        if self.current < cost {
            return None;
        }
        let old = self.current;
        self.current -= cost;
        Some(StatChange {
            old,
            new: self.current,
            max: self.max,
        })
    }

    pub fn blast(&mut self) -> Option<StatChange<f32>> {
        self.try_spend(self.blast_cost)
    }

    pub fn snapshot(&self) -> StatChange<f32> {
        StatChange {
            old: self.current,
            new: self.current,
            max: self.max,
        }
    }
}

// ============================================================================
// Movement
// ============================================================================

/// Physical exertion since the last stat tick.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct Exertion {
    pub has_ran: bool,
    pub has_jumped: bool,
}

impl Exertion {
    /// Returns the flags and resets them.
    pub fn take(&mut self) -> Exertion {
        std::mem::take(self)
    }
}

#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component, Default)]
pub struct CharacterMovement {
    pub normal_max_walk_speed: f32,
    pub running_max_walk_speed: f32,
    /// Speed currently in effect, switched by [`CharacterMovement::set_running`].
    pub max_walk_speed: f32,
    pub jump_velocity: f32,
    pub is_running: bool,
    pub is_crouched: bool,
    pub grounded: bool,
    pub vertical_velocity: f32,
    /// Accumulated this frame, consumed by the motion system.
    pub pending_input: Vec3,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            normal_max_walk_speed: 400.0,
            running_max_walk_speed: 800.0,
            max_walk_speed: 400.0,
            jump_velocity: 420.0,
            is_running: false,
            is_crouched: false,
            grounded: true,
            vertical_velocity: 0.0,
            pending_input: Vec3::ZERO,
        }
    }
}

impl CharacterMovement {
    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
        self.max_walk_speed = if running {
            self.running_max_walk_speed
        } else {
            self.normal_max_walk_speed
        };
    }

    pub fn toggle_running(&mut self) {
        self.set_running(!self.is_running);
    }

    /// Crouching always drops out of a sprint.
    pub fn crouch(&mut self) {
        self.set_running(false);
        self.is_crouched = true;
    }

    pub fn uncrouch(&mut self) {
        self.is_crouched = false;
    }

    pub fn add_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    pub fn consume_input(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_input)
    }

    /// Returns `false` when airborne.
    pub fn launch(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.grounded = false;
        self.vertical_velocity = self.jump_velocity;
        true
    }
}

/// Yaw and pitch the controller applies to the character and camera, in radians.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }
}

/// Drives the character's stat regeneration.
#[derive(Component, Reflect, Debug)]
#[reflect(Component)]
pub struct StatTickTimer(pub Timer);

impl Default for StatTickTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(0.5, TimerMode::Repeating))
    }
}

// ============================================================================
// Tuning
// ============================================================================

/// Character tuning loaded from `config/player.tuning.ron`.
#[derive(Asset, Resource, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub max_health: i32,
    pub max_stamina: f32,
    pub stamina_recuperation_factor: f32,
    pub jump_stamina_cost: f32,
    pub run_stamina_cost: f32,
    pub rest_stamina_rebate: f32,
    pub max_psi_power: f32,
    pub psi_recharge_rate: f32,
    pub psi_blast_cost: f32,
    pub normal_max_walk_speed: f32,
    pub running_max_walk_speed: f32,
    pub jump_velocity: f32,
    /// Seconds between stat ticks
    pub stat_tick_interval: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            max_health: BASE_STAT_VALUE,
            max_stamina: 100.0,
            stamina_recuperation_factor: 1.0,
            jump_stamina_cost: 25.0,
            run_stamina_cost: 5.0,
            rest_stamina_rebate: 4.0,
            max_psi_power: 1000.0,
            psi_recharge_rate: 1.0,
            psi_blast_cost: 150.0,
            normal_max_walk_speed: 400.0,
            running_max_walk_speed: 800.0,
            jump_velocity: 420.0,
            stat_tick_interval: 0.5,
        }
    }
}

impl CharacterTuning {
    pub fn health(&self) -> Health {
        Health::full(self.max_health)
    }

    pub fn stamina(&self) -> Stamina {
        Stamina {
            current: self.max_stamina,
            max: self.max_stamina,
            recuperation_factor: self.stamina_recuperation_factor,
            jump_cost: self.jump_stamina_cost,
            run_cost: self.run_stamina_cost,
            rest_rebate: self.rest_stamina_rebate,
        }
    }

    pub fn psi_power(&self) -> PsiPower {
        PsiPower {
            current: self.max_psi_power,
            max: self.max_psi_power,
            recharge_rate: self.psi_recharge_rate,
            blast_cost: self.psi_blast_cost,
        }
    }

    pub fn movement(&self) -> CharacterMovement {
        CharacterMovement {
            normal_max_walk_speed: self.normal_max_walk_speed,
            running_max_walk_speed: self.running_max_walk_speed,
            max_walk_speed: self.normal_max_walk_speed,
            jump_velocity: self.jump_velocity,
            ..default()
        }
    }

    pub fn tick_timer(&self) -> StatTickTimer {
        StatTickTimer(Timer::new(
            Duration::from_secs_f32(self.stat_tick_interval.max(0.01)),
            TimerMode::Repeating,
        ))
    }

    /// Everything a freshly spawned character needs, at full stats.
    pub fn character_bundle(&self) -> impl Bundle {
        (
            PlayerCharacter,
            self.health(),
            self.stamina(),
            self.psi_power(),
            self.movement(),
            self.tick_timer(),
        )
    }
}
