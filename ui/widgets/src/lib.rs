use {bevy::prelude::*, system_schedule::GameSchedule};

pub mod stat_bar;

pub use stat_bar::{
    StatBar, StatBarParts, StatBarStyle, format_stat_value, render_stat_bars, spawn_stat_bar,
};

pub const PANEL_BACKGROUND: Color = Color::srgba(0.11, 0.14, 0.2, 0.7);
pub const HEALTH_COLOR: Color = Color::srgba(0.85, 0.1, 0.1, 0.85);
pub const STAMINA_COLOR: Color = Color::srgba(0.1, 0.75, 0.2, 0.85);
pub const PSI_COLOR: Color = Color::srgba(0.45, 0.25, 0.95, 0.85);

pub struct WidgetsPlugin;

impl Plugin for WidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StatBar>()
            .add_systems(Update, render_stat_bars.in_set(GameSchedule::Effect));
    }
}

/// The three bars every HUD layout binds to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HspBar {
    pub health: Entity,
    pub stamina: Entity,
    pub psi: Entity,
}

/// Spawns a full-screen container for one HUD layout.
///
/// Layouts start collapsed; the HUD decides which one is on display.
pub fn spawn_overlay_root<M: Component>(
    commands: &mut Commands,
    name: &str,
    marker: M,
    children: impl FnOnce(&mut ChildSpawnerCommands),
) -> Entity {
    commands
        .spawn((
            marker,
            Name::new(name.to_string()),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::None,
                ..default()
            },
        ))
        .with_children(children)
        .id()
}

/// Spawns an absolutely positioned group anchored to a screen corner.
pub fn spawn_anchored(
    parent: &mut ChildSpawnerCommands,
    left: Option<Val>,
    bottom: Option<Val>,
    right: Option<Val>,
    top: Option<Val>,
    children: impl FnOnce(&mut ChildSpawnerCommands),
) {
    parent
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: left.unwrap_or(Val::Auto),
            bottom: bottom.unwrap_or(Val::Auto),
            right: right.unwrap_or(Val::Auto),
            top: top.unwrap_or(Val::Auto),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(children);
}

/// Spawns a panel with the standard style, providing a container for content.
pub fn spawn_panel(
    parent: &mut ChildSpawnerCommands,
    padding: UiRect,
    children: impl FnOnce(&mut ChildSpawnerCommands),
) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                padding,
                row_gap: Val::Px(4.0),
                border: UiRect::all(Val::Px(1.0)),
                border_radius: BorderRadius::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.05)),
        ))
        .with_children(children);
}

/// Spawns health, stamina and psi bars side by side.
pub fn spawn_hsp_bar(parent: &mut ChildSpawnerCommands, is_full_size: bool) -> HspBar {
    let mut bars = HspBar {
        health: Entity::PLACEHOLDER,
        stamina: Entity::PLACEHOLDER,
        psi: Entity::PLACEHOLDER,
    };

    parent
        .spawn((
            Name::new("HspBar"),
            Node {
                flex_direction: if is_full_size {
                    FlexDirection::Row
                } else {
                    FlexDirection::Column
                },
                column_gap: Val::Px(12.0),
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|row| {
            for (slot, color) in [
                (&mut bars.health, HEALTH_COLOR),
                (&mut bars.stamina, STAMINA_COLOR),
                (&mut bars.psi, PSI_COLOR),
            ] {
                *slot = spawn_stat_bar(
                    row,
                    StatBarStyle {
                        background: color.with_alpha(0.3),
                        foreground: color,
                        icon_color: color.with_alpha(1.0),
                        is_full_size,
                    },
                );
            }
        });

    bars
}

/// Spawns a small cross at the center of its parent.
pub fn spawn_crosshair(parent: &mut ChildSpawnerCommands) {
    const ARM: f32 = 12.0;
    const THICKNESS: f32 = 2.0;
    let color = Color::srgba(1.0, 1.0, 1.0, 0.8);

    parent
        .spawn((
            Name::new("Crosshair"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Percent(50.0),
                width: Val::Px(ARM * 2.0),
                height: Val::Px(ARM * 2.0),
                margin: UiRect::new(
                    Val::Px(-ARM),
                    Val::ZERO,
                    Val::Px(-ARM),
                    Val::ZERO,
                ),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|cross| {
            cross.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(ARM * 2.0),
                    height: Val::Px(THICKNESS),
                    ..default()
                },
                BackgroundColor(color),
            ));
            cross.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(THICKNESS),
                    height: Val::Px(ARM * 2.0),
                    ..default()
                },
                BackgroundColor(color),
            ));
        });
}

/// Spawns a labelled line of text and returns the value text entity.
pub fn spawn_readout(parent: &mut ChildSpawnerCommands, label: &str, value: &str) -> Entity {
    let mut value_entity = Entity::PLACEHOLDER;

    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|line| {
            line.spawn((
                Text::new(label),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb_u8(156, 163, 175)),
            ));

            value_entity = line
                .spawn((
                    Text::new(value),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ))
                .id();
        });

    value_entity
}
