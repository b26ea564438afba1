//! Scene transition state machine.
//!
//! # Responsibility
//! - Classify host scene changes into gameplay entry and exit edges.
//! - Recognize the menu-view scene that requires UI re-attachment.
//!
//! # Invariants
//! - Scenes are identified by name only.
//! - A gameplay scene reloading into itself is not a transition.
//! - Initial state is `Other` until the host reports otherwise.

mod session;

pub use session::{ActiveSession, SessionController, SessionFactory, SessionId};

use log::debug;

/// Name of the host scene that hosts an interactive session.
pub const GAMEPLAY_SCENE: &str = "GameCore";
/// Name of the menu-view scene that carries the settings UI.
pub const MENU_VIEW_SCENE: &str = "MenuViewControllers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneState {
    #[default]
    Other,
    GameplayScene,
}

impl SceneState {
    fn classify(scene_name: &str) -> Self {
        if scene_name == GAMEPLAY_SCENE {
            Self::GameplayScene
        } else {
            Self::Other
        }
    }
}

/// Edge produced by one scene change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    /// `Other -> GameplayScene`.
    EnteredGameplay,
    /// `GameplayScene -> Other`.
    ExitedGameplay,
}

/// How the host loaded a scene. Carried for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSceneMode {
    Single,
    Additive,
}

#[derive(Debug, Default)]
pub struct SceneMachine {
    current: SceneState,
    previous: SceneState,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SceneState {
        self.current
    }

    pub fn previous(&self) -> SceneState {
        self.previous
    }

    /// Applies one host active-scene change.
    ///
    /// Edges are derived from the scene names of the change itself; the
    /// stored state follows the destination scene.
    pub fn on_active_scene_changed(
        &mut self,
        previous_scene: &str,
        next_scene: &str,
    ) -> Option<SceneTransition> {
        let from = SceneState::classify(previous_scene);
        let to = SceneState::classify(next_scene);

        let transition = match (from, to) {
            (SceneState::GameplayScene, SceneState::Other) => Some(SceneTransition::ExitedGameplay),
            (SceneState::Other, SceneState::GameplayScene) => Some(SceneTransition::EnteredGameplay),
            _ => None,
        };

        if transition.is_some() {
            self.previous = self.current;
            self.current = to;
        }
        debug!(
            "event=scene_changed module=scene from={} to={} transition={:?} state={:?}",
            previous_scene, next_scene, transition, self.current
        );
        transition
    }

    /// Returns true when `scene_name` is the menu view requiring UI attach.
    pub fn is_menu_view(scene_name: &str) -> bool {
        scene_name == MENU_VIEW_SCENE
    }
}
