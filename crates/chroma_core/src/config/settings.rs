//! Settings file model.

use serde::{Deserialize, Serialize};

/// How technicolour picks colors for one element group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicolourStyle {
    #[default]
    Off,
    WarmCold,
    AnyPalette,
    PureRandom,
    Gradient,
}

/// Which content the menu side panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePanel {
    /// Leave the host's release notes in place.
    #[default]
    ReleaseNotes,
    Chroma,
}

/// User settings. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaSettings {
    /// Enables the debug snapshot trigger.
    pub debug_mode: bool,
    /// Adds the lightshow modifiers tab to gameplay setup.
    pub lightshow_menu: bool,
    pub technicolour_enabled: bool,
    pub technicolour_lights_style: TechnicolourStyle,
    pub technicolour_walls_style: TechnicolourStyle,
    pub technicolour_blocks_style: TechnicolourStyle,
    pub technicolour_sabers_style: TechnicolourStyle,
    pub side_panel: SidePanel,
}
