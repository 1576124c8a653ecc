use {
    crate::{
        components::{HudLayout, HudLayouts, LayoutWidgets, StatReadout},
        view_mode::HudViewMode,
    },
    bevy::prelude::*,
    widgets::{
        HspBar, spawn_anchored, spawn_crosshair, spawn_hsp_bar, spawn_overlay_root, spawn_panel,
        spawn_readout,
    },
};

const EDGE: Val = Val::Px(24.0);

/// Spawns every layout collapsed.
pub fn spawn_layouts(commands: &mut Commands) -> HudLayouts {
    HudLayouts {
        minimal: spawn_minimal(commands),
        moderate: spawn_moderate(commands),
        sensory_overload: spawn_sensory_overload(commands),
    }
}

fn placeholder_bars() -> HspBar {
    HspBar {
        health: Entity::PLACEHOLDER,
        stamina: Entity::PLACEHOLDER,
        psi: Entity::PLACEHOLDER,
    }
}

/// Compact bars in the corner and a crosshair.
fn spawn_minimal(commands: &mut Commands) -> LayoutWidgets {
    let mut bars = placeholder_bars();

    let root = spawn_overlay_root(
        commands,
        "HudMinimal",
        HudLayout(HudViewMode::Minimal),
        |layout| {
            spawn_anchored(layout, Some(EDGE), Some(EDGE), None, None, |corner| {
                bars = spawn_hsp_bar(corner, false);
            });
            spawn_crosshair(layout);
        },
    );

    LayoutWidgets {
        root,
        bars,
        keys: None,
        stats: None,
    }
}

/// Full bars plus the key wallet.
fn spawn_moderate(commands: &mut Commands) -> LayoutWidgets {
    let mut bars = placeholder_bars();
    let mut keys = Entity::PLACEHOLDER;

    let root = spawn_overlay_root(
        commands,
        "HudModerate",
        HudLayout(HudViewMode::Moderate),
        |layout| {
            spawn_anchored(layout, Some(EDGE), Some(EDGE), None, None, |corner| {
                bars = spawn_hsp_bar(corner, true);
            });
            spawn_anchored(layout, None, None, Some(EDGE), Some(EDGE), |corner| {
                spawn_panel(corner, UiRect::all(Val::Px(8.0)), |panel| {
                    keys = spawn_readout(panel, "Keys", "-");
                });
            });
            spawn_crosshair(layout);
        },
    );

    LayoutWidgets {
        root,
        bars,
        keys: Some(keys),
        stats: None,
    }
}

/// Everything: full bars, key wallet and the raw numbers.
fn spawn_sensory_overload(commands: &mut Commands) -> LayoutWidgets {
    let mut bars = placeholder_bars();
    let mut keys = Entity::PLACEHOLDER;
    let mut stats = StatReadout {
        health: Entity::PLACEHOLDER,
        stamina: Entity::PLACEHOLDER,
        psi: Entity::PLACEHOLDER,
    };

    let root = spawn_overlay_root(
        commands,
        "HudSensoryOverload",
        HudLayout(HudViewMode::SensoryOverload),
        |layout| {
            spawn_anchored(layout, Some(EDGE), Some(EDGE), None, None, |corner| {
                bars = spawn_hsp_bar(corner, true);
            });
            spawn_anchored(layout, None, None, Some(EDGE), Some(EDGE), |corner| {
                spawn_panel(corner, UiRect::all(Val::Px(8.0)), |panel| {
                    stats.health = spawn_readout(panel, "Health", "-");
                    stats.stamina = spawn_readout(panel, "Stamina", "-");
                    stats.psi = spawn_readout(panel, "Psi", "-");
                    keys = spawn_readout(panel, "Keys", "-");
                });
            });
            spawn_crosshair(layout);
        },
    );

    LayoutWidgets {
        root,
        bars,
        keys: Some(keys),
        stats: Some(stats),
    }
}
