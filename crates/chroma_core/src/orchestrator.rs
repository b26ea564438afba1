//! Composition root for the extension host.
//!
//! # Responsibility
//! - Run the bootstrap sequence once: discovery, lifecycle dispatch,
//!   configuration, UI wiring.
//! - React to host scene and input callbacks afterwards.
//!
//! # Invariants
//! - All state is owned here and mutated from the host's main thread.
//! - No failure in this module propagates to the host; every failure is
//!   logged and the affected feature is disabled.
//! - Core patch failure aborts the rest of bootstrap.

use crate::config::{ChromaSettings, LoadSettingsMode, SettingsStore, UserDataPaths};
use crate::events::{EventBus, EventChannel};
use crate::extension::{discover_extensions, ExtensionHandle, ExtensionId, OrchestratorView, PluginHost};
use crate::host::{CapabilityAdvertiser, InputTrigger, TimeControl, ADVERTISED_CAPABILITIES};
use crate::lifecycle::{DispatchError, DispatchReport, LifecycleDispatcher};
use crate::patch::{CorePatcher, PatchLedger, PatchProviderRecord};
use crate::scene::{
    ActiveSession, LoadSceneMode, SceneMachine, SceneState, SceneTransition, SessionFactory,
    SessionId,
};
use crate::ui::{
    UiPanels, LIGHTSHOW_TAB, LIGHTSHOW_VIEW, MODIFIERS_VIEW, SETTINGS_MENU_VIEW, SETTINGS_TAB,
};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};

/// Time scale restored when a gameplay session ends.
pub const NORMAL_TIME_SCALE: f32 = 1.0;

/// Everything the orchestrator talks to outside the core.
pub struct Collaborators {
    pub paths: UserDataPaths,
    pub plugin_host: Box<dyn PluginHost>,
    pub core_patcher: Box<dyn CorePatcher>,
    pub settings: Box<dyn SettingsStore>,
    pub ui: Box<dyn UiPanels>,
    pub time: Box<dyn TimeControl>,
    pub sessions: Box<dyn SessionFactory>,
    pub capabilities: Box<dyn CapabilityAdvertiser>,
}

/// Which features survived bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitStatus {
    pub core_patched: bool,
    pub config_loaded: bool,
    /// Set when a fatal-to-feature failure happened.
    pub degraded_reason: Option<DegradedReason>,
}

/// Failure that left the orchestrator running with features disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// Core patches did not install; the rest of bootstrap was skipped.
    CorePatchFailed(String),
    /// Settings could not be loaded; configured UI was not wired. Cleared by
    /// a successful manual reload.
    ConfigUnavailable(String),
}

impl Display for DegradedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorePatchFailed(error) => write!(f, "core patch installation failed: {error}"),
            Self::ConfigUnavailable(error) => write!(f, "configuration unavailable: {error}"),
        }
    }
}

impl InitStatus {
    pub fn is_degraded(&self) -> bool {
        self.degraded_reason.is_some()
    }
}

pub struct Orchestrator {
    /// Started extensions. Held for the process lifetime; extensions are
    /// never unloaded.
    extensions: Vec<ExtensionHandle>,
    extension_ids: Vec<ExtensionId>,
    ledger: PatchLedger,
    report: DispatchReport,
    status: InitStatus,
    scene: SceneMachine,
    session: Option<ActiveSession>,
    bus: EventBus,
    settings: Box<dyn SettingsStore>,
    ui: Box<dyn UiPanels>,
    time: Box<dyn TimeControl>,
    sessions: Box<dyn SessionFactory>,
}

impl Orchestrator {
    /// Builds the orchestrator and runs the bootstrap sequence.
    ///
    /// Never fails: degraded outcomes are reported through `init_status`.
    pub fn bootstrap(collaborators: Collaborators) -> Self {
        let Collaborators {
            paths,
            plugin_host,
            core_patcher,
            settings,
            ui,
            time,
            sessions,
            mut capabilities,
        } = collaborators;

        if let Err(err) = paths.ensure_chroma_dir() {
            warn!(
                "event=user_data_dir module=orchestrator status=error path={} error={}",
                paths.chroma_dir().display(),
                err
            );
        }

        info!("************************************");
        info!("Initializing Chroma [{}]", crate::core_version());
        info!("************************************");

        let discovered = discover_extensions(plugin_host.as_ref());
        let mut ledger = PatchLedger::new();
        let dispatch = LifecycleDispatcher::new(&discovered, core_patcher.as_ref()).run(&mut ledger);

        let mut status = InitStatus::default();
        let report = match dispatch {
            Ok(report) => {
                status.core_patched = true;
                report
            }
            Err(DispatchError::CorePatchFailed { error, report }) => {
                error!(
                    "event=bootstrap module=orchestrator status=error reason=core_patch_failed error={}",
                    error
                );
                status.degraded_reason = Some(DegradedReason::CorePatchFailed(error.to_string()));
                report
            }
        };

        let extensions = discovered
            .into_iter()
            .filter(|handle| report.started.contains(handle.id()))
            .collect::<Vec<_>>();

        let mut orchestrator = Self {
            extension_ids: report.started.clone(),
            extensions,
            ledger,
            report,
            status,
            scene: SceneMachine::new(),
            session: None,
            bus: EventBus::new(),
            settings,
            ui,
            time,
            sessions,
        };

        if !orchestrator.status.core_patched {
            warn!("event=bootstrap module=orchestrator status=degraded running_unpatched=true");
            return orchestrator;
        }

        if orchestrator.load_configuration() {
            orchestrator.wire_configured_ui();
        }

        info!(
            "event=bootstrap module=orchestrator status=ok extensions={} patch_providers={}",
            orchestrator.extensions.len(),
            orchestrator.ledger.len()
        );
        for capability in ADVERTISED_CAPABILITIES {
            capabilities.advertise(capability);
        }
        orchestrator
    }

    fn load_configuration(&mut self) -> bool {
        let loaded = self
            .settings
            .init()
            .and_then(|()| self.settings.load_settings(LoadSettingsMode::Initial));
        if let Err(err) = loaded {
            error!(
                "event=settings_load module=orchestrator status=error mode=initial error={}",
                err
            );
            self.status.degraded_reason = Some(DegradedReason::ConfigUnavailable(err.to_string()));
            return false;
        }
        self.status.config_loaded = true;
        true
    }

    /// Adds the gameplay tabs and registers the side panel. UI failures are
    /// advisory.
    fn wire_configured_ui(&mut self) {
        let mut tabs = vec![(SETTINGS_TAB, MODIFIERS_VIEW)];
        if self.settings.settings().lightshow_menu {
            tabs.push((LIGHTSHOW_TAB, LIGHTSHOW_VIEW));
        }
        for (name, view) in tabs {
            if let Err(err) = self.ui.add_tab(name, view) {
                error!(
                    "event=ui_tab module=orchestrator status=error tab={} error={}",
                    name, err
                );
            }
        }

        if let Err(err) = self.ui.register_side_panel() {
            error!(
                "event=side_panel module=orchestrator status=error error={}",
                err
            );
        }
    }

    /// Host callback: the active scene changed.
    pub fn on_active_scene_changed(
        &mut self,
        previous_scene: &str,
        next_scene: &str,
    ) -> Option<SceneTransition> {
        let transition = self.scene.on_active_scene_changed(previous_scene, next_scene)?;
        match transition {
            SceneTransition::ExitedGameplay => {
                self.time.set_time_scale(NORMAL_TIME_SCALE);
                if let Some(session) = self.session.take() {
                    session.finish();
                }
                self.bus.publish(EventChannel::MainMenuEntered);
            }
            SceneTransition::EnteredGameplay => {
                if let Some(stale) = self.session.take() {
                    stale.finish();
                }
                let session = ActiveSession::start(self.sessions.as_ref());
                info!(
                    "event=session_start module=orchestrator session_id={}",
                    session.id()
                );
                self.session = Some(session);
                self.bus.publish(EventChannel::GameplaySessionEntered);
            }
        }
        Some(transition)
    }

    /// Host callback: a scene finished loading.
    ///
    /// Returns true when the settings menu attach sequence ran. Runs on
    /// every menu-view load, not only the first.
    pub fn on_scene_loaded(&mut self, scene_name: &str, mode: LoadSceneMode) -> bool {
        if !SceneMachine::is_menu_view(scene_name) {
            return false;
        }

        info!(
            "event=menu_attach module=orchestrator scene={} mode={:?}",
            scene_name, mode
        );
        if let Err(err) = self.ui.attach_settings_menu(SETTINGS_TAB, SETTINGS_MENU_VIEW) {
            error!(
                "event=menu_attach module=orchestrator status=error error={}",
                err
            );
        }
        true
    }

    /// Host callback: the menu side panel became visible.
    pub fn on_side_panel_enabled(&mut self) {
        let panel = self.settings.settings().side_panel;
        self.ui.set_side_panel(panel);
    }

    /// Reacts to one logical input trigger.
    pub fn on_update(&mut self, trigger: InputTrigger) {
        match trigger {
            InputTrigger::ReloadSettings => self.reload_settings(),
            InputTrigger::EmitDebugSnapshot => self.emit_debug_snapshot(),
        }
    }

    fn reload_settings(&mut self) {
        if let Err(err) = self.settings.load_settings(LoadSettingsMode::Manual) {
            error!(
                "event=settings_load module=orchestrator status=error mode=manual error={}",
                err
            );
            return;
        }

        let recovered = !self.status.config_loaded;
        self.status.config_loaded = true;
        // Without core patches the rest of bootstrap never ran; nothing to wire.
        if !recovered || !self.status.core_patched {
            return;
        }
        if matches!(
            self.status.degraded_reason,
            Some(DegradedReason::ConfigUnavailable(_))
        ) {
            self.status.degraded_reason = None;
        }
        info!("event=settings_load module=orchestrator status=ok mode=manual recovered=true");
        self.wire_configured_ui();
    }

    fn emit_debug_snapshot(&mut self) {
        let settings = self.settings.settings();
        if !settings.debug_mode {
            return;
        }

        info!(" [[ Debug Info ]]");
        if settings.technicolour_enabled {
            info!(
                "TechnicolourStyles (Lights | Walls | Notes | Sabers) : {:?} | {:?} | {:?} | {:?}",
                settings.technicolour_lights_style,
                settings.technicolour_walls_style,
                settings.technicolour_blocks_style,
                settings.technicolour_sabers_style
            );
        }
        info!(
            "event=debug_snapshot module=orchestrator scene={:?} session_id={:?} patch_providers={}",
            self.scene.current(),
            self.session.as_ref().map(ActiveSession::id),
            self.ledger.len()
        );
        self.bus.publish(EventChannel::DebugRequested);
    }

    /// Registers a lifecycle event subscriber.
    pub fn subscribe(&mut self, channel: EventChannel, callback: impl FnMut() + 'static) {
        self.bus.subscribe(channel, callback);
    }

    /// Read-only view for extensions querying core state.
    pub fn view(&self) -> OrchestratorView<'_> {
        OrchestratorView::new(&self.ledger, &self.extension_ids)
    }

    pub fn patch_providers(&self) -> Vec<PatchProviderRecord> {
        self.ledger.snapshot()
    }

    /// Extensions that completed startup, in discovery order.
    pub fn extension_ids(&self) -> &[ExtensionId] {
        &self.extension_ids
    }

    pub fn dispatch_report(&self) -> &DispatchReport {
        &self.report
    }

    pub fn init_status(&self) -> &InitStatus {
        &self.status
    }

    pub fn scene_state(&self) -> SceneState {
        self.scene.current()
    }

    pub fn active_session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(ActiveSession::id)
    }

    pub fn settings(&self) -> &ChromaSettings {
        self.settings.settings()
    }
}
