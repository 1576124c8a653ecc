use {
    crate::view_mode::HudViewMode,
    bevy::prelude::*,
    widgets::HspBar,
};

/// Root node of one HUD layout.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLayout(pub HudViewMode);

/// Marks the observers the HUD spawned on the character.
#[derive(Component, Debug, Default)]
pub struct HudSubscription;

/// Numeric `current/max` lines shown next to the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatReadout {
    pub health: Entity,
    pub stamina: Entity,
    pub psi: Entity,
}

/// Widget entities inside one layout that receive character notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutWidgets {
    pub root: Entity,
    pub bars: HspBar,
    pub keys: Option<Entity>,
    pub stats: Option<StatReadout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLayouts {
    pub minimal: LayoutWidgets,
    pub moderate: LayoutWidgets,
    pub sensory_overload: LayoutWidgets,
}

impl HudLayouts {
    /// `None` for the mode that shows nothing.
    pub fn get(&self, mode: HudViewMode) -> Option<&LayoutWidgets> {
        match mode {
            HudViewMode::CleanAndPristine => None,
            HudViewMode::Minimal => Some(&self.minimal),
            HudViewMode::Moderate => Some(&self.moderate),
            HudViewMode::SensoryOverload => Some(&self.sensory_overload),
        }
    }

    pub fn roots(&self) -> [Entity; 3] {
        [
            self.minimal.root,
            self.moderate.root,
            self.sensory_overload.root,
        ]
    }
}

/// The live HUD. Exists only while the game is running.
#[derive(Resource, Debug)]
pub struct Hud {
    pub current_view_mode: HudViewMode,
    /// Character whose notifications drive the widgets.
    pub character: Entity,
    pub layouts: HudLayouts,
    /// Observer entities currently watching the character.
    pub subscriptions: Vec<Entity>,
}
