//! CLI smoke entry point.
//!
//! # Responsibility
//! - Bootstrap the core against an in-process simulated host.
//! - Drive one menu -> gameplay -> menu round trip and print the outcome.

use chroma_core::config::SidePanel;
use chroma_core::{
    CapabilityAdvertiser, ChromaExtension, Collaborators, CorePatcher, EventChannel,
    ExtensionError, FileSettingsStore, HostError, HostModule, InputTrigger, LoadSceneMode,
    Orchestrator, OrchestratorView, PatchError, PatchSetHandle, PluginHost, SessionController,
    SessionFactory, TimeControl, UiError, UiPanels, UserDataPaths, CORE_PATCH_SET_ID,
};
use log::info;
use std::sync::Arc;

struct SampleExtension;

impl ChromaExtension for SampleExtension {
    fn startup(&self, host: &OrchestratorView<'_>) -> Result<(), ExtensionError> {
        info!(
            "sample extension started; {} extension(s) discovered",
            host.extension_ids().len()
        );
        Ok(())
    }

    fn install_patches(&self) -> Result<Option<PatchSetHandle>, ExtensionError> {
        Ok(Some(PatchSetHandle::new("chroma.sample-extension.patches")))
    }
}

struct SimModule {
    id: &'static str,
    extension: bool,
}

impl HostModule for SimModule {
    fn module_id(&self) -> &str {
        self.id
    }

    fn as_extension(&self) -> Option<Arc<dyn ChromaExtension>> {
        self.extension
            .then(|| Arc::new(SampleExtension) as Arc<dyn ChromaExtension>)
    }
}

struct SimHost;

impl PluginHost for SimHost {
    fn loaded_modules(&self) -> Result<Vec<Arc<dyn HostModule>>, HostError> {
        Ok(vec![
            Arc::new(SimModule {
                id: "bsml",
                extension: false,
            }) as Arc<dyn HostModule>,
            Arc::new(SimModule {
                id: "chroma.sample-extension",
                extension: true,
            }) as Arc<dyn HostModule>,
        ])
    }
}

struct SimPatcher;

impl CorePatcher for SimPatcher {
    fn install_core_patches(&self) -> Result<PatchSetHandle, PatchError> {
        Ok(PatchSetHandle::new(CORE_PATCH_SET_ID))
    }
}

struct SimUi;

impl UiPanels for SimUi {
    fn add_tab(&mut self, name: &str, view_resource: &str) -> Result<(), UiError> {
        println!("ui: tab `{name}` ({view_resource})");
        Ok(())
    }

    fn attach_settings_menu(&mut self, name: &str, view_resource: &str) -> Result<(), UiError> {
        println!("ui: settings menu `{name}` ({view_resource})");
        Ok(())
    }

    fn register_side_panel(&mut self) -> Result<(), UiError> {
        Ok(())
    }

    fn set_side_panel(&mut self, panel: SidePanel) {
        println!("ui: side panel {panel:?}");
    }
}

struct SimTime;

impl TimeControl for SimTime {
    fn set_time_scale(&mut self, scale: f32) {
        println!("host: time scale {scale}");
    }
}

struct SimSession;

impl SessionController for SimSession {}

struct SimSessions;

impl SessionFactory for SimSessions {
    fn create_session(&self) -> Box<dyn SessionController> {
        Box::new(SimSession)
    }
}

struct SimCapabilities;

impl CapabilityAdvertiser for SimCapabilities {
    fn advertise(&mut self, capability: &str) {
        println!("host: capability `{capability}`");
    }
}

fn main() {
    let root = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
    let paths = UserDataPaths::new(root);
    let log_dir = paths.log_dir();
    if let Err(err) = chroma_core::init_logging(
        chroma_core::default_log_level(),
        &log_dir.to_string_lossy(),
    ) {
        eprintln!("logging disabled: {err}");
    }

    let settings = FileSettingsStore::new(&paths);
    let mut orchestrator = Orchestrator::bootstrap(Collaborators {
        paths,
        plugin_host: Box::new(SimHost),
        core_patcher: Box::new(SimPatcher),
        settings: Box::new(settings),
        ui: Box::new(SimUi),
        time: Box::new(SimTime),
        sessions: Box::new(SimSessions),
        capabilities: Box::new(SimCapabilities),
    });

    orchestrator.subscribe(EventChannel::MainMenuEntered, || println!("event: main menu"));
    orchestrator.subscribe(EventChannel::GameplaySessionEntered, || {
        println!("event: gameplay session")
    });
    orchestrator.subscribe(EventChannel::DebugRequested, || println!("event: debug"));

    orchestrator.on_scene_loaded("MenuViewControllers", LoadSceneMode::Single);
    orchestrator.on_side_panel_enabled();
    orchestrator.on_active_scene_changed("MenuScene", "GameCore");
    orchestrator.on_active_scene_changed("GameCore", "GameCore");
    orchestrator.on_active_scene_changed("GameCore", "MenuScene");
    orchestrator.on_update(InputTrigger::ReloadSettings);
    orchestrator.on_update(InputTrigger::EmitDebugSnapshot);

    println!("chroma_core version={}", chroma_core::core_version());
    println!("init status={:?}", orchestrator.init_status());
    match serde_json::to_string_pretty(&orchestrator.patch_providers()) {
        Ok(ledger) => println!("patch providers={ledger}"),
        Err(err) => eprintln!("failed to render ledger: {err}"),
    }
}
