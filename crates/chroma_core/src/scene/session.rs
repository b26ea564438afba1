//! Per-gameplay-session controllers.

use uuid::Uuid;

/// Identifier assigned to each gameplay session.
pub type SessionId = Uuid;

/// Behavior object living for one gameplay session.
pub trait SessionController {
    /// Called once when the host leaves the gameplay scene.
    fn finish(&mut self) {}
}

/// Builds a fresh controller on every gameplay entry.
pub trait SessionFactory {
    fn create_session(&self) -> Box<dyn SessionController>;
}

/// The controller of the session currently in progress.
pub struct ActiveSession {
    id: SessionId,
    controller: Box<dyn SessionController>,
}

impl ActiveSession {
    pub fn start(factory: &dyn SessionFactory) -> Self {
        Self {
            id: Uuid::new_v4(),
            controller: factory.create_session(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Ends the session, consuming it.
    pub fn finish(mut self) {
        self.controller.finish();
    }
}
