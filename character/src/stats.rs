//! The character's stat tracker.
//!
//! Requests arrive as entity events on the character; every change that
//! actually moves a value goes back out as a notification on the same entity.

use {
    bevy::prelude::*,
    character_components::{
        CharacterMovement, Exertion, Health, PsiPower, Stamina, StatChange, StatTickTimer,
    },
    character_events::{
        AddKey, BroadcastCurrentStats, HealthChanged, KeyAction, KeyWalletAction, PlayerDied,
        PsiBlast, PsiBlastUnleashed, PsiPowerChanged, RemoveKey, RestoreHealth, SetMaxHealth,
        SetStaminaRecuperation, StaminaChanged, TestKey, UpdateHealth,
    },
    wallet::KeyWallet,
};

/// One regeneration step. Consumes the exertion flags.
///
/// Stamina moves by a single rate picked from what the character did since the
/// last step; psi power always recharges towards its max.
pub fn regenerate(
    stamina: &mut Stamina,
    psi: &mut PsiPower,
    exertion: &mut Exertion,
    is_crouched: bool,
) -> (Option<StatChange<f32>>, Option<StatChange<f32>>) {
    let rate = stamina.rate_for(exertion.take(), is_crouched);
    (stamina.apply_rate(rate), psi.recharge())
}

pub fn tick_character_stats(
    time: Res<Time>,
    mut commands: Commands,
    mut characters: Query<(
        Entity,
        &mut StatTickTimer,
        &mut Stamina,
        &mut PsiPower,
        &mut Exertion,
        &CharacterMovement,
    )>,
) {
    for (entity, mut timer, mut stamina, mut psi, mut exertion, movement) in characters.iter_mut() {
        if !timer.0.tick(time.delta()).just_finished() {
            continue;
        }

        let (stamina_change, psi_change) =
            regenerate(&mut stamina, &mut psi, &mut exertion, movement.is_crouched);

        if let Some(change) = stamina_change {
            trace!(?entity, old = change.old, new = change.new, "stamina changed");
            commands.trigger(StaminaChanged::new(entity, change));
        }
        if let Some(change) = psi_change {
            trace!(?entity, old = change.old, new = change.new, "psi power changed");
            commands.trigger(PsiPowerChanged::new(entity, change));
        }
    }
}

// ============================================================================
// Health
// ============================================================================

pub fn on_update_health(
    trigger: On<UpdateHealth>,
    mut commands: Commands,
    mut health: Query<&mut Health>,
) {
    let UpdateHealth { entity, delta } = *trigger.event();
    let Ok(mut health) = health.get_mut(entity) else {
        return;
    };

    if health.is_dead() {
        debug!(?entity, delta, "ignoring health update, character is dead");
        return;
    }

    let update = health.apply_delta(delta);
    if let Some(change) = update.change {
        debug!(?entity, old = change.old, new = change.new, "health changed");
        commands.trigger(HealthChanged::new(entity, change));
    }

    if update.died {
        info!(?entity, "player died");
        commands.trigger(PlayerDied { entity });
    }
}

pub fn on_restore_health(
    trigger: On<RestoreHealth>,
    mut commands: Commands,
    mut health: Query<&mut Health>,
) {
    let entity = trigger.event().entity;
    let Ok(mut health) = health.get_mut(entity) else {
        return;
    };

    if let Some(change) = health.restore_full() {
        debug!(?entity, old = change.old, "health restored");
        commands.trigger(HealthChanged::new(entity, change));
    }
}

pub fn on_set_max_health(
    trigger: On<SetMaxHealth>,
    mut commands: Commands,
    mut health: Query<&mut Health>,
) {
    let SetMaxHealth { entity, max } = *trigger.event();
    let Ok(mut health) = health.get_mut(entity) else {
        return;
    };

    // TODO: range-check `max` once design settles what a sane maximum is.
    let update = health.set_max(max);
    if let Some(change) = update.change {
        debug!(?entity, old_max = change.old, max, "max health changed");
        commands.trigger(HealthChanged::new(entity, change));
    }

    if update.died {
        info!(?entity, "player died");
        commands.trigger(PlayerDied { entity });
    }
}

// ============================================================================
// Stamina & Psi
// ============================================================================

pub fn on_set_stamina_recuperation(
    trigger: On<SetStaminaRecuperation>,
    mut stamina: Query<&mut Stamina>,
) {
    let SetStaminaRecuperation { entity, factor } = *trigger.event();
    if let Ok(mut stamina) = stamina.get_mut(entity) {
        stamina.recuperation_factor = factor;
    }
}

pub fn on_psi_blast(trigger: On<PsiBlast>, mut commands: Commands, mut psi: Query<&mut PsiPower>) {
    let entity = trigger.event().entity;
    let Ok(mut psi) = psi.get_mut(entity) else {
        return;
    };

    let Some(change) = psi.blast() else {
        debug!(?entity, current = psi.current, "not enough psi power to blast");
        return;
    };

    info!(?entity, remaining = change.new, "psi blast unleashed");
    commands.trigger(PsiPowerChanged::new(entity, change));
    commands.trigger(PsiBlastUnleashed {
        entity,
        cost: change.old - change.new,
    });
}

// ============================================================================
// Keys
// ============================================================================

pub fn on_add_key(trigger: On<AddKey>, mut commands: Commands, mut wallets: Query<&mut KeyWallet>) {
    let event = trigger.event();
    let Ok(mut wallet) = wallets.get_mut(event.entity) else {
        return;
    };

    let success = wallet.add(&event.key);
    debug!(key = %event.key, success, "add key");
    commands.trigger(KeyWalletAction {
        entity: event.entity,
        key: event.key.clone(),
        action: KeyAction::Add,
        success,
    });
}

pub fn on_remove_key(
    trigger: On<RemoveKey>,
    mut commands: Commands,
    mut wallets: Query<&mut KeyWallet>,
) {
    let event = trigger.event();
    let Ok(mut wallet) = wallets.get_mut(event.entity) else {
        return;
    };

    let success = wallet.remove(&event.key);
    debug!(key = %event.key, success, "remove key");
    commands.trigger(KeyWalletAction {
        entity: event.entity,
        key: event.key.clone(),
        action: KeyAction::Remove,
        success,
    });
}

pub fn on_test_key(trigger: On<TestKey>, mut commands: Commands, wallets: Query<&KeyWallet>) {
    let event = trigger.event();
    let Ok(wallet) = wallets.get(event.entity) else {
        return;
    };

    commands.trigger(KeyWalletAction {
        entity: event.entity,
        key: event.key.clone(),
        action: KeyAction::Test,
        success: wallet.contains(&event.key),
    });
}

// ============================================================================
// Resend
// ============================================================================

pub fn on_broadcast_current_stats(
    trigger: On<BroadcastCurrentStats>,
    mut commands: Commands,
    characters: Query<(&Health, &Stamina, &PsiPower, &KeyWallet)>,
) {
    let entity = trigger.event().entity;
    let Ok((health, stamina, psi, wallet)) = characters.get(entity) else {
        warn!(?entity, "cannot broadcast stats, not a player character");
        return;
    };

    commands.trigger(HealthChanged::new(entity, health.snapshot()));
    commands.trigger(StaminaChanged::new(entity, stamina.snapshot()));
    commands.trigger(PsiPowerChanged::new(entity, psi.snapshot()));
    commands.trigger(KeyWalletAction {
        entity,
        key: wallet.listing(),
        action: KeyAction::CountKeys,
        success: true,
    });
}
