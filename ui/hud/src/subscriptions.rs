//! Binding layout widgets to the character's notifications.
//!
//! Each binding is an entity observer watching the character. Switching modes
//! despawns every binding before the next layout subscribes, so a widget that
//! is off screen never receives updates.

use {
    crate::{
        components::{Hud, HudLayout, HudSubscription, LayoutWidgets},
        view_mode::HudViewMode,
    },
    bevy::prelude::*,
    character_events::{
        BroadcastCurrentStats, HealthChanged, KeyWalletAction, PsiPowerChanged, StaminaChanged,
    },
    wallet::KeyWallet,
    widgets::{StatBar, format_stat_value},
};

/// Switches `hud` to `mode`: unsubscribe, collapse, subscribe, show, resend.
pub fn apply_view_mode(
    commands: &mut Commands,
    hud: &mut Hud,
    mode: HudViewMode,
    layouts: &mut Query<(&HudLayout, &mut Node)>,
) {
    unsubscribe(commands, hud);

    for (layout, mut node) in layouts.iter_mut() {
        node.display = if layout.0 == mode {
            Display::Flex
        } else {
            Display::None
        };
    }

    if let Some(widgets) = hud.layouts.get(mode) {
        hud.subscriptions = subscribe(commands, hud.character, widgets);
    }

    hud.current_view_mode = mode;
    commands.trigger(BroadcastCurrentStats {
        entity: hud.character,
    });
}

pub fn unsubscribe(commands: &mut Commands, hud: &mut Hud) {
    for observer in hud.subscriptions.drain(..) {
        commands.entity(observer).try_despawn();
    }
}

fn subscribe(commands: &mut Commands, character: Entity, widgets: &LayoutWidgets) -> Vec<Entity> {
    let stats = widgets.stats;
    let mut observers = vec![
        health_observer(widgets.bars.health, stats.map(|s| s.health)),
        stamina_observer(widgets.bars.stamina, stats.map(|s| s.stamina)),
        psi_observer(widgets.bars.psi, stats.map(|s| s.psi)),
    ];
    if let Some(keys) = widgets.keys {
        observers.push(key_observer(keys));
    }

    observers
        .into_iter()
        .map(|observer| {
            commands
                .spawn((
                    observer.with_entity(character),
                    HudSubscription,
                    Name::new("HudSubscription"),
                ))
                .id()
        })
        .collect()
}

fn readout_text(current: f32, max: f32) -> String {
    format!("{} / {}", format_stat_value(current), format_stat_value(max))
}

fn update_widgets(
    bars: &mut Query<&mut StatBar>,
    texts: &mut Query<&mut Text>,
    bar: Entity,
    readout: Option<Entity>,
    (old, new, max): (f32, f32, f32),
) {
    if let Ok(mut bar) = bars.get_mut(bar) {
        bar.on_float_stat_updated(old, new, max);
    }
    if let Some(Ok(mut text)) = readout.map(|readout| texts.get_mut(readout)) {
        text.0 = readout_text(new, max);
    }
}

fn health_observer(bar: Entity, readout: Option<Entity>) -> Observer {
    Observer::new(
        move |trigger: On<HealthChanged>,
              mut bars: Query<&mut StatBar>,
              mut texts: Query<&mut Text>| {
            let event = trigger.event();
            if let Ok(mut stat_bar) = bars.get_mut(bar) {
                stat_bar.on_int_stat_updated(event.old, event.new, event.max);
            }
            if let Some(Ok(mut text)) = readout.map(|readout| texts.get_mut(readout)) {
                text.0 = readout_text(event.new as f32, event.max as f32);
            }
        },
    )
}

fn stamina_observer(bar: Entity, readout: Option<Entity>) -> Observer {
    Observer::new(
        move |trigger: On<StaminaChanged>,
              mut bars: Query<&mut StatBar>,
              mut texts: Query<&mut Text>| {
            let event = trigger.event();
            update_widgets(
                &mut bars,
                &mut texts,
                bar,
                readout,
                (event.old, event.new, event.max),
            );
        },
    )
}

fn psi_observer(bar: Entity, readout: Option<Entity>) -> Observer {
    Observer::new(
        move |trigger: On<PsiPowerChanged>,
              mut bars: Query<&mut StatBar>,
              mut texts: Query<&mut Text>| {
            let event = trigger.event();
            update_widgets(
                &mut bars,
                &mut texts,
                bar,
                readout,
                (event.old, event.new, event.max),
            );
        },
    )
}

/// Shows the wallet contents after every wallet notification.
fn key_observer(text_entity: Entity) -> Observer {
    Observer::new(
        move |trigger: On<KeyWalletAction>,
              wallets: Query<&KeyWallet>,
              mut texts: Query<&mut Text>| {
            let Ok(wallet) = wallets.get(trigger.event().entity) else {
                return;
            };
            if let Ok(mut text) = texts.get_mut(text_entity) {
                text.0 = key_listing_text(&wallet.listing());
            }
        },
    )
}

/// `"blue,red,"` becomes `"blue, red"`; an empty wallet shows a dash.
pub fn key_listing_text(listing: &str) -> String {
    let keys: Vec<&str> = listing.split(',').filter(|key| !key.is_empty()).collect();
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join(", ")
    }
}
