//! Events the player character emits and accepts.
//!
//! Notifications fire on the character entity, so a listener subscribes by
//! spawning an `Observer` that watches the character and unsubscribes by
//! despawning it. Requests target the character too and are handled by the
//! observers registered in the `character` crate.

use {bevy::prelude::*, character_components::StatChange};

pub struct CharacterEventsPlugin;

impl Plugin for CharacterEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<KeyAction>();
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(EntityEvent, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    #[event_target]
    pub entity: Entity,
    pub old: i32,
    pub new: i32,
    pub max: i32,
}

impl HealthChanged {
    pub fn new(entity: Entity, change: StatChange<i32>) -> Self {
        Self {
            entity,
            old: change.old,
            new: change.new,
            max: change.max,
        }
    }
}

#[derive(EntityEvent, Debug, Clone, Copy, PartialEq)]
pub struct StaminaChanged {
    #[event_target]
    pub entity: Entity,
    pub old: f32,
    pub new: f32,
    pub max: f32,
}

impl StaminaChanged {
    pub fn new(entity: Entity, change: StatChange<f32>) -> Self {
        Self {
            entity,
            old: change.old,
            new: change.new,
            max: change.max,
        }
    }
}

#[derive(EntityEvent, Debug, Clone, Copy, PartialEq)]
pub struct PsiPowerChanged {
    #[event_target]
    pub entity: Entity,
    pub old: f32,
    pub new: f32,
    pub max: f32,
}

impl PsiPowerChanged {
    pub fn new(entity: Entity, change: StatChange<f32>) -> Self {
        Self {
            entity,
            old: change.old,
            new: change.new,
            max: change.max,
        }
    }
}

/// What was attempted with the key wallet.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Add,
    Remove,
    Test,
    /// Full listing sent with a stat resend. `key` holds every key, comma terminated.
    CountKeys,
}

/// Fired for every wallet attempt, successful or not.
#[derive(EntityEvent, Debug, Clone, PartialEq)]
pub struct KeyWalletAction {
    #[event_target]
    pub entity: Entity,
    pub key: String,
    pub action: KeyAction,
    pub success: bool,
}

/// Fired once, when health first reaches zero or below.
#[derive(EntityEvent, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDied {
    #[event_target]
    pub entity: Entity,
}

#[derive(EntityEvent, Debug, Clone, Copy, PartialEq)]
pub struct PsiBlastUnleashed {
    #[event_target]
    pub entity: Entity,
    pub cost: f32,
}

// ============================================================================
// Requests
// ============================================================================

/// Negative values hurt, positive values heal.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct UpdateHealth {
    #[event_target]
    pub entity: Entity,
    pub delta: i32,
}

#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct RestoreHealth {
    #[event_target]
    pub entity: Entity,
}

#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct SetMaxHealth {
    #[event_target]
    pub entity: Entity,
    pub max: i32,
}

#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct SetStaminaRecuperation {
    #[event_target]
    pub entity: Entity,
    pub factor: f32,
}

#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct PsiBlast {
    #[event_target]
    pub entity: Entity,
}

#[derive(EntityEvent, Debug, Clone)]
pub struct AddKey {
    #[event_target]
    pub entity: Entity,
    pub key: String,
}

#[derive(EntityEvent, Debug, Clone)]
pub struct RemoveKey {
    #[event_target]
    pub entity: Entity,
    pub key: String,
}

#[derive(EntityEvent, Debug, Clone)]
pub struct TestKey {
    #[event_target]
    pub entity: Entity,
    pub key: String,
}

/// Re-sends every stat as an unchanged `(current, current, max)` notification.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct BroadcastCurrentStats {
    #[event_target]
    pub entity: Entity,
}
