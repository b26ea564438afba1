#![allow(dead_code)]

use chroma_core::config::SidePanel;
use chroma_core::{
    CapabilityAdvertiser, ChromaExtension, Collaborators, CorePatcher, ExtensionError,
    FileSettingsStore, HostError, HostModule, OrchestratorView, PatchError, PatchSetHandle,
    PluginHost, SessionController, SessionFactory, TimeControl, UiError, UiPanels,
    UserDataPaths, CORE_PATCH_SET_ID,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug, Default)]
pub struct Recorder {
    pub time_scales: Vec<f32>,
    pub tabs: Vec<String>,
    pub menu_attaches: u32,
    pub side_panel_registrations: u32,
    pub side_panels: Vec<SidePanel>,
    pub capabilities: Vec<String>,
    pub sessions_created: u32,
    pub sessions_finished: u32,
}

pub type Shared = Rc<RefCell<Recorder>>;

pub struct TestExtension {
    pub fail_startup: bool,
    pub panic_startup: bool,
    pub panic_patch: bool,
    pub patch: Option<&'static str>,
}

impl TestExtension {
    pub fn patching(patch: &'static str) -> Self {
        Self {
            fail_startup: false,
            panic_startup: false,
            panic_patch: false,
            patch: Some(patch),
        }
    }

    pub fn failing_startup(patch: &'static str) -> Self {
        Self {
            fail_startup: true,
            ..Self::patching(patch)
        }
    }

    pub fn panicking_startup(patch: &'static str) -> Self {
        Self {
            panic_startup: true,
            ..Self::patching(patch)
        }
    }

    pub fn panicking_patch(patch: &'static str) -> Self {
        Self {
            panic_patch: true,
            ..Self::patching(patch)
        }
    }
}

impl ChromaExtension for TestExtension {
    fn startup(&self, _host: &OrchestratorView<'_>) -> Result<(), ExtensionError> {
        if self.panic_startup {
            panic!("extension blew up during startup");
        }
        if self.fail_startup {
            return Err(ExtensionError::failed("startup refused"));
        }
        Ok(())
    }

    fn install_patches(&self) -> Result<Option<PatchSetHandle>, ExtensionError> {
        if self.panic_patch {
            panic!("patch target vanished");
        }
        Ok(self.patch.map(PatchSetHandle::new))
    }
}

pub struct Module {
    id: &'static str,
    extension: Option<Arc<dyn ChromaExtension>>,
}

impl Module {
    pub fn extension(id: &'static str, extension: TestExtension) -> Self {
        Self {
            id,
            extension: Some(Arc::new(extension) as Arc<dyn ChromaExtension>),
        }
    }

    pub fn plain(id: &'static str) -> Self {
        Self {
            id,
            extension: None,
        }
    }
}

impl HostModule for Module {
    fn module_id(&self) -> &str {
        self.id
    }

    fn as_extension(&self) -> Option<Arc<dyn ChromaExtension>> {
        self.extension.clone()
    }
}

struct Host(Vec<Arc<dyn HostModule>>);

impl PluginHost for Host {
    fn loaded_modules(&self) -> Result<Vec<Arc<dyn HostModule>>, HostError> {
        Ok(self.0.clone())
    }
}

struct Core(bool);

impl CorePatcher for Core {
    fn install_core_patches(&self) -> Result<PatchSetHandle, PatchError> {
        if self.0 {
            Ok(PatchSetHandle::new(CORE_PATCH_SET_ID))
        } else {
            Err(PatchError::TargetNotFound("LightSwitchEventEffect".to_string()))
        }
    }
}

/// UI calls that should fail. Attempts are still recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFailures {
    pub add_tab: bool,
    pub attach_settings_menu: bool,
    pub register_side_panel: bool,
}

impl UiFailures {
    pub fn all() -> Self {
        Self {
            add_tab: true,
            attach_settings_menu: true,
            register_side_panel: true,
        }
    }
}

struct Ui {
    recorder: Shared,
    failures: UiFailures,
}

impl UiPanels for Ui {
    fn add_tab(&mut self, name: &str, _view_resource: &str) -> Result<(), UiError> {
        self.recorder.borrow_mut().tabs.push(name.to_string());
        if self.failures.add_tab {
            return Err(UiError::ResourceMissing(name.to_string()));
        }
        Ok(())
    }

    fn attach_settings_menu(&mut self, _name: &str, view_resource: &str) -> Result<(), UiError> {
        self.recorder.borrow_mut().menu_attaches += 1;
        if self.failures.attach_settings_menu {
            return Err(UiError::ResourceMissing(view_resource.to_string()));
        }
        Ok(())
    }

    fn register_side_panel(&mut self) -> Result<(), UiError> {
        self.recorder.borrow_mut().side_panel_registrations += 1;
        if self.failures.register_side_panel {
            return Err(UiError::NotReady("side panel".to_string()));
        }
        Ok(())
    }

    fn set_side_panel(&mut self, panel: SidePanel) {
        self.recorder.borrow_mut().side_panels.push(panel);
    }
}

struct Time(Shared);

impl TimeControl for Time {
    fn set_time_scale(&mut self, scale: f32) {
        self.0.borrow_mut().time_scales.push(scale);
    }
}

struct Capabilities(Shared);

impl CapabilityAdvertiser for Capabilities {
    fn advertise(&mut self, capability: &str) {
        self.0.borrow_mut().capabilities.push(capability.to_string());
    }
}

struct Controller(Shared);

impl SessionController for Controller {
    fn finish(&mut self) {
        self.0.borrow_mut().sessions_finished += 1;
    }
}

struct Sessions(Shared);

impl SessionFactory for Sessions {
    fn create_session(&self) -> Box<dyn SessionController> {
        self.0.borrow_mut().sessions_created += 1;
        Box::new(Controller(Rc::clone(&self.0)))
    }
}

/// Temp UserData root plus a shared record of collaborator calls.
pub struct Harness {
    pub root: TempDir,
    pub recorder: Shared,
    pub ui_failures: UiFailures,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("temp dir"),
            recorder: Shared::default(),
            ui_failures: UiFailures::default(),
        }
    }

    /// Puts a regular file where the UserData directory belongs, so every
    /// directory creation under it fails.
    pub fn block_user_data(&self) {
        std::fs::write(self.root.path().join("UserData"), "not a directory")
            .expect("write blocking file");
    }

    pub fn paths(&self) -> UserDataPaths {
        UserDataPaths::new(self.root.path())
    }

    /// Seeds the settings file before bootstrap.
    pub fn write_settings(&self, json: &str) {
        let paths = self.paths();
        paths.ensure_chroma_dir().expect("create chroma dir");
        std::fs::write(paths.settings_file(), json).expect("write settings");
    }

    pub fn collaborators(&self, modules: Vec<Module>, core_ok: bool) -> Collaborators {
        let modules = modules
            .into_iter()
            .map(|module| Arc::new(module) as Arc<dyn HostModule>)
            .collect();
        Collaborators {
            paths: self.paths(),
            plugin_host: Box::new(Host(modules)),
            core_patcher: Box::new(Core(core_ok)),
            settings: Box::new(FileSettingsStore::new(&self.paths())),
            ui: Box::new(Ui {
                recorder: Rc::clone(&self.recorder),
                failures: self.ui_failures,
            }),
            time: Box::new(Time(Rc::clone(&self.recorder))),
            sessions: Box::new(Sessions(Rc::clone(&self.recorder))),
            capabilities: Box::new(Capabilities(Rc::clone(&self.recorder))),
        }
    }
}
