//! Capability registry: finds extensions among loaded host modules.

use crate::extension::capability::{ChromaExtension, ExtensionId};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// One module loaded by the host application.
pub trait HostModule {
    /// Host-assigned module identity.
    fn module_id(&self) -> &str;

    /// Returns the extension capability when this module implements it.
    fn as_extension(&self) -> Option<Arc<dyn ChromaExtension>> {
        None
    }
}

/// Host plugin enumeration surface.
pub trait PluginHost {
    /// Lists every currently loaded module in host enumeration order.
    fn loaded_modules(&self) -> Result<Vec<Arc<dyn HostModule>>, HostError>;
}

/// Host-side failures surfaced to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    ModuleListUnavailable(String),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModuleListUnavailable(reason) => {
                write!(f, "host module list unavailable: {reason}")
            }
        }
    }
}

impl Error for HostError {}

/// A discovered extension. Immutable after discovery.
#[derive(Clone)]
pub struct ExtensionHandle {
    id: ExtensionId,
    extension: Arc<dyn ChromaExtension>,
}

impl ExtensionHandle {
    pub fn new(id: ExtensionId, extension: Arc<dyn ChromaExtension>) -> Self {
        Self { id, extension }
    }

    pub fn id(&self) -> &ExtensionId {
        &self.id
    }

    pub fn extension(&self) -> &dyn ChromaExtension {
        self.extension.as_ref()
    }
}

impl Debug for ExtensionHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Discovers extension modules in host enumeration order.
///
/// # Contract
/// - Modules without the extension capability are skipped silently.
/// - Host ids are taken verbatim. Modules with a blank or already-seen id
///   are skipped with a warning, so each provider appears at most once
///   downstream.
/// - An unavailable module list yields an empty set and a warning.
pub fn discover_extensions(host: &dyn PluginHost) -> Vec<ExtensionHandle> {
    let modules = match host.loaded_modules() {
        Ok(modules) => modules,
        Err(err) => {
            warn!(
                "event=extension_discovery module=registry status=error error={}",
                err
            );
            return Vec::new();
        }
    };

    let mut seen = BTreeSet::<ExtensionId>::new();
    let mut handles = Vec::new();
    for module in &modules {
        let Some(extension) = module.as_extension() else {
            continue;
        };

        let id = match ExtensionId::parse(module.module_id()) {
            Ok(id) => id,
            Err(err) => {
                warn!(
                    "event=extension_discovery module=registry status=skip reason=blank_id error={}",
                    err
                );
                continue;
            }
        };
        if !seen.insert(id.clone()) {
            warn!(
                "event=extension_discovery module=registry status=skip reason=duplicate_id extension={}",
                id
            );
            continue;
        }

        debug!(
            "event=extension_discovery module=registry status=ok extension={}",
            id
        );
        handles.push(ExtensionHandle::new(id, extension));
    }

    info!(
        "event=extension_discovery module=registry status=ok scanned={} found={}",
        modules.len(),
        handles.len()
    );
    handles
}
