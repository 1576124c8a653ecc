use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// How much of the HUD is on screen.
#[derive(
    Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum HudViewMode {
    /// Nothing at all.
    CleanAndPristine,
    #[default]
    Minimal,
    Moderate,
    SensoryOverload,
}

impl HudViewMode {
    pub const ALL: [HudViewMode; 4] = [
        HudViewMode::CleanAndPristine,
        HudViewMode::Minimal,
        HudViewMode::Moderate,
        HudViewMode::SensoryOverload,
    ];

    pub fn next(self) -> Self {
        match self {
            HudViewMode::CleanAndPristine => HudViewMode::Minimal,
            HudViewMode::Minimal => HudViewMode::Moderate,
            HudViewMode::Moderate => HudViewMode::SensoryOverload,
            HudViewMode::SensoryOverload => HudViewMode::CleanAndPristine,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            HudViewMode::CleanAndPristine => HudViewMode::SensoryOverload,
            HudViewMode::Minimal => HudViewMode::CleanAndPristine,
            HudViewMode::Moderate => HudViewMode::Minimal,
            HudViewMode::SensoryOverload => HudViewMode::Moderate,
        }
    }
}

/// HUD settings loaded from `config/hud.settings.ron`.
#[derive(Asset, Resource, TypePath, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudSettings {
    pub initial_view_mode: HudViewMode,
}
