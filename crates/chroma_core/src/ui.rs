//! Settings UI collaborator contract.

use crate::config::SidePanel;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tab and menu names shown in the host UI.
pub const SETTINGS_TAB: &str = "Chroma";
pub const LIGHTSHOW_TAB: &str = "Lightshow Modifiers";

/// View resources the UI collaborator renders.
pub const MODIFIERS_VIEW: &str = "chroma.settings.modifiers.bsml";
pub const LIGHTSHOW_VIEW: &str = "chroma.settings.lightshow.bsml";
pub const SETTINGS_MENU_VIEW: &str = "chroma.settings.settings.bsml";

/// Host UI panel framework.
pub trait UiPanels {
    /// Adds a gameplay-setup tab.
    fn add_tab(&mut self, name: &str, view_resource: &str) -> Result<(), UiError>;

    /// Attaches the settings menu to a freshly loaded menu view.
    fn attach_settings_menu(&mut self, name: &str, view_resource: &str) -> Result<(), UiError>;

    /// Takes over the menu side panel.
    fn register_side_panel(&mut self) -> Result<(), UiError>;

    /// Switches the side panel content.
    fn set_side_panel(&mut self, panel: SidePanel);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The host UI framework is not ready for this call.
    NotReady(String),
    ResourceMissing(String),
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady(what) => write!(f, "ui not ready: {what}"),
            Self::ResourceMissing(resource) => write!(f, "ui resource missing: {resource}"),
        }
    }
}

impl Error for UiError {}
