//! Bootstrap and lifecycle core of the Chroma extension host.
//! This crate owns extension discovery, the patch ledger, and the scene
//! transition state machine; host UI, audio and input stay behind traits.

pub mod config;
pub mod events;
pub mod extension;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod orchestrator;
pub mod patch;
pub mod scene;
pub mod ui;

pub use config::{
    ChromaSettings, ConfigError, FileSettingsStore, LoadSettingsMode, SettingsStore,
    UserDataPaths,
};
pub use events::{EventBus, EventChannel};
pub use extension::{
    discover_extensions, ChromaExtension, ExtensionError, ExtensionHandle, ExtensionId,
    HostError, HostModule, OrchestratorView, PluginHost,
};
pub use host::{CapabilityAdvertiser, InputTrigger, TimeControl};
pub use lifecycle::{DispatchError, DispatchReport, LifecycleDispatcher, LifecyclePhase};
pub use logging::{default_log_level, init_logging, logging_status};
pub use orchestrator::{
    Collaborators, DegradedReason, InitStatus, Orchestrator, NORMAL_TIME_SCALE,
};
pub use patch::{
    CorePatcher, PatchError, PatchLedger, PatchProvider, PatchProviderRecord, PatchSetHandle,
    CORE_PATCH_SET_ID,
};
pub use scene::{
    LoadSceneMode, SceneMachine, SceneState, SceneTransition, SessionController, SessionFactory,
    SessionId, GAMEPLAY_SCENE, MENU_VIEW_SCENE,
};
pub use ui::{UiError, UiPanels};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
