//! Percentage bar for a single character stat.
//!
//! A bar is a row of an icon, a vertical percentage track split into an empty
//! and a filled segment, and the value text. Notification observers feed
//! [`StatBar`] and [`render_stat_bars`] pushes the state into the UI nodes.

use bevy::prelude::*;

/// Stand-in for a zero max so the percentage never divides by zero.
pub const MIN_STAT_MAX: f32 = 1e-4;

pub const DEFAULT_BAR_BACKGROUND: Color = Color::srgba(0.3, 0.0, 0.0, 0.3);
pub const DEFAULT_BAR_FOREGROUND: Color = Color::srgba(1.0, 0.0, 0.0, 0.75);

const BAR_TRACK_WIDTH: f32 = 14.0;
const BAR_TRACK_HEIGHT: f32 = 48.0;
const ICON_SIZE: f32 = 20.0;

#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct StatBar {
    /// Filled fraction, always in `[0, 1]`.
    pub percentage: f32,
    pub value: f32,
    pub value_text: String,
    pub background: Color,
    pub foreground: Color,
    pub icon_color: Color,
    /// Compact bars show only the icon and the value text.
    pub is_full_size: bool,
}

impl Default for StatBar {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            value: 100.0,
            value_text: format_stat_value(100.0),
            background: DEFAULT_BAR_BACKGROUND,
            foreground: DEFAULT_BAR_FOREGROUND,
            icon_color: Color::WHITE,
            is_full_size: true,
        }
    }
}

impl StatBar {
    pub fn on_int_stat_updated(&mut self, old: i32, new: i32, max: i32) {
        self.on_float_stat_updated(old as f32, new as f32, max as f32);
    }

    /// `old` is accepted for symmetry with the notifications; only `new` and `max` matter.
    pub fn on_float_stat_updated(&mut self, _old: f32, new: f32, max: f32) {
        let max = if max == 0.0 { MIN_STAT_MAX } else { max };
        self.percentage = (new / max).clamp(0.0, 1.0);
        self.value = new;
        self.value_text = format_stat_value(new);
    }
}

/// Float text with six decimals and trailing zeros trimmed, keeping one decimal digit.
fn sanitize_float(value: f32) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

fn left(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

/// Magnitude suffixes, each a thousand times the previous.
const MAGNITUDES: [&str; 3] = ["k", "M", "B"];

/// Short, fixed-width-ish text for a stat value.
///
/// Below 100 the text is four characters (`5.00`, `50.0`), below 1000 it is
/// three (`986`), and anything larger is scaled by thousands with a suffix
/// (`1.2k`, `12k`, `123k`, `2.5M`).
pub fn format_stat_value(value: f32) -> String {
    if value < 1000.0 {
        let text = sanitize_float(value);
        return if value < 100.0 {
            format!("{:0<4}", left(&text, 4))
        } else {
            left(&text, 3)
        };
    }

    let mut scaled = value / 1000.0;
    let mut tier = 0;
    while scaled >= 1000.0 && tier + 1 < MAGNITUDES.len() {
        scaled /= 1000.0;
        tier += 1;
    }

    let suffix = MAGNITUDES[tier];
    if scaled >= 1000.0 {
        // Past the largest suffix, show the whole number rather than cut digits.
        return format!("{scaled:.0}{suffix}");
    }
    let text = sanitize_float(scaled);
    let digits = if (10.0..100.0).contains(&scaled) { 2 } else { 3 };
    format!("{}{suffix}", left(&text, digits))
}

/// Look of a bar at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct StatBarStyle {
    pub background: Color,
    pub foreground: Color,
    pub icon_color: Color,
    pub is_full_size: bool,
}

impl Default for StatBarStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BAR_BACKGROUND,
            foreground: DEFAULT_BAR_FOREGROUND,
            icon_color: Color::WHITE,
            is_full_size: true,
        }
    }
}

/// Entities making up one bar, filled in by [`spawn_stat_bar`].
#[derive(Component, Debug, Clone, Copy)]
pub struct StatBarParts {
    pub track: Entity,
    pub filled: Entity,
    pub empty: Entity,
    pub icon: Entity,
    pub text: Entity,
}

pub fn spawn_stat_bar(parent: &mut ChildSpawnerCommands, style: StatBarStyle) -> Entity {
    let bar = StatBar {
        background: style.background,
        foreground: style.foreground,
        icon_color: style.icon_color,
        is_full_size: style.is_full_size,
        ..default()
    };

    let mut icon = Entity::PLACEHOLDER;
    let mut track = Entity::PLACEHOLDER;
    let mut filled = Entity::PLACEHOLDER;
    let mut empty = Entity::PLACEHOLDER;
    let mut text = Entity::PLACEHOLDER;

    let mut root = parent.spawn((
        Name::new("StatBar"),
        Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(6.0),
            ..default()
        },
    ));

    root.with_children(|row| {
        icon = row
            .spawn((
                Node {
                    width: Val::Px(ICON_SIZE),
                    height: Val::Px(ICON_SIZE),
                    border_radius: BorderRadius::all(Val::Percent(50.0)),
                    ..default()
                },
                BackgroundColor(bar.icon_color),
            ))
            .id();

        let mut track_commands = row.spawn((
            Node {
                flex_direction: FlexDirection::Column,
                width: Val::Px(BAR_TRACK_WIDTH),
                height: Val::Px(BAR_TRACK_HEIGHT),
                border: UiRect::all(Val::Px(1.0)),
                display: if bar.is_full_size {
                    Display::Flex
                } else {
                    Display::None
                },
                border_radius: BorderRadius::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(bar.background),
            BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.05)),
        ));
        track_commands.with_children(|column| {
            empty = column
                .spawn(Node {
                    width: Val::Percent(100.0),
                    flex_grow: 1.0 - bar.percentage,
                    ..default()
                })
                .id();
            filled = column
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_grow: bar.percentage,
                        ..default()
                    },
                    BackgroundColor(bar.foreground),
                ))
                .id();
        });
        track = track_commands.id();

        text = row
            .spawn((
                Text::new(bar.value_text.clone()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ))
            .id();
    });

    root.insert((
        bar,
        StatBarParts {
            track,
            filled,
            empty,
            icon,
            text,
        },
    ));
    root.id()
}

pub fn render_stat_bars(
    bars: Query<(&StatBar, &StatBarParts), Changed<StatBar>>,
    mut nodes: Query<&mut Node>,
    mut colors: Query<&mut BackgroundColor>,
    mut texts: Query<&mut Text>,
) {
    for (bar, parts) in bars.iter() {
        if let Ok(mut node) = nodes.get_mut(parts.filled) {
            node.flex_grow = bar.percentage;
        }
        if let Ok(mut node) = nodes.get_mut(parts.empty) {
            node.flex_grow = 1.0 - bar.percentage;
        }
        if let Ok(mut node) = nodes.get_mut(parts.track) {
            node.display = if bar.is_full_size {
                Display::Flex
            } else {
                Display::None
            };
        }

        if let Ok(mut color) = colors.get_mut(parts.track) {
            color.0 = bar.background;
        }
        if let Ok(mut color) = colors.get_mut(parts.filled) {
            color.0 = bar.foreground;
        }
        if let Ok(mut color) = colors.get_mut(parts.icon) {
            color.0 = bar.icon_color;
        }

        if let Ok(mut text) = texts.get_mut(parts.text) {
            if text.0 != bar.value_text {
                text.0.clone_from(&bar.value_text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stat_value() {
        for (value, expected) in [
            (5.0, "5.00"),
            (50.0, "50.0"),
            (0.01, "0.01"),
            (0.0, "0.00"),
            (99.99, "99.9"),
            (100.0, "100"),
            (986.5, "986"),
            (1234.0, "1.2k"),
            (12345.0, "12k"),
            (123456.0, "123k"),
            (999_999.0, "999k"),
            (1_000_000.0, "1.0M"),
            (2_500_000.0, "2.5M"),
            (10_000_000.0, "10M"),
            (2_000_000_000.0, "2.0B"),
            (5_000_000_000_000.0, "5000B"),
            (-1.0, "-1.0"),
        ] {
            assert_eq!(format_stat_value(value), expected, "value {value}");
        }
    }

    #[test]
    fn test_float_update_clamps_percentage() {
        let mut bar = StatBar::default();

        bar.on_float_stat_updated(0.0, 150.0, 100.0);
        assert_eq!(bar.percentage, 1.0);
        assert_eq!(bar.value, 150.0);

        bar.on_float_stat_updated(0.0, -1.0, 100.0);
        assert_eq!(bar.percentage, 0.0);
        assert_eq!(bar.value_text, "-1.0");
    }

    #[test]
    fn test_zero_max_does_not_divide_by_zero() {
        let mut bar = StatBar::default();
        bar.on_float_stat_updated(0.0, 0.0, 0.0);
        assert_eq!(bar.percentage, 0.0);

        bar.on_float_stat_updated(0.0, 5.0, 0.0);
        assert_eq!(bar.percentage, 1.0);
    }

    #[test]
    fn test_int_update_forwards_to_float() {
        let mut bar = StatBar::default();
        bar.on_int_stat_updated(100, 25, 100);
        assert_eq!(bar.percentage, 0.25);
        assert_eq!(bar.value_text, "25.0");
    }

    #[test]
    fn test_render_pushes_state_into_nodes() {
        let mut app = App::new();
        app.add_systems(Update, render_stat_bars);

        let mut bar_entity = Entity::PLACEHOLDER;
        app.world_mut()
            .commands()
            .spawn(Node::default())
            .with_children(|parent| {
                bar_entity = spawn_stat_bar(
                    parent,
                    StatBarStyle {
                        is_full_size: false,
                        ..default()
                    },
                );
            });
        app.world_mut().flush();

        app.world_mut()
            .get_mut::<StatBar>(bar_entity)
            .unwrap()
            .on_float_stat_updated(0.0, 30.0, 120.0);
        app.update();

        let parts = *app.world().get::<StatBarParts>(bar_entity).unwrap();
        let world = app.world();
        assert_eq!(world.get::<Node>(parts.filled).unwrap().flex_grow, 0.25);
        assert_eq!(world.get::<Node>(parts.empty).unwrap().flex_grow, 0.75);
        assert_eq!(world.get::<Node>(parts.track).unwrap().display, Display::None);
        assert_eq!(world.get::<Text>(parts.text).unwrap().0, "30.0");
    }
}
