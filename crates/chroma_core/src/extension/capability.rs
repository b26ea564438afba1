//! Extension capability interface and identity rules.

use crate::patch::{PatchLedger, PatchProviderRecord, PatchSetHandle};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle contract every extension module implements.
///
/// Calls arrive on the host's main thread in two phases: every extension is
/// started before any extension installs patches. Implementations that need
/// to keep state across calls use interior mutability.
pub trait ChromaExtension {
    /// Called once after discovery, before any patch is installed.
    fn startup(&self, host: &OrchestratorView<'_>) -> Result<(), ExtensionError>;

    /// Installs this extension's patch-set.
    ///
    /// `Ok(None)` means the extension has nothing to patch.
    fn install_patches(&self) -> Result<Option<PatchSetHandle>, ExtensionError>;
}

/// Read-only view of orchestrator state handed to extensions.
///
/// Extensions may query who installed patches and which extensions were
/// registered; they never own or mutate core state.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorView<'a> {
    ledger: &'a PatchLedger,
    extension_ids: &'a [ExtensionId],
}

impl<'a> OrchestratorView<'a> {
    pub fn new(ledger: &'a PatchLedger, extension_ids: &'a [ExtensionId]) -> Self {
        Self {
            ledger,
            extension_ids,
        }
    }

    /// Returns a copy of the patch ledger.
    pub fn patch_providers(&self) -> Vec<PatchProviderRecord> {
        self.ledger.snapshot()
    }

    /// Returns ids of every discovered extension, in discovery order.
    pub fn extension_ids(&self) -> &'a [ExtensionId] {
        self.extension_ids
    }

    pub fn core_patched(&self) -> bool {
        self.ledger.core_record().is_some()
    }
}

/// Stable extension identity derived from the host module id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Takes a host module id as the extension id.
    ///
    /// The id is kept verbatim, including case, spaces and surrounding
    /// whitespace; only blank ids are rejected.
    pub fn parse(value: &str) -> Result<Self, ExtensionIdError> {
        if value.trim().is_empty() {
            return Err(ExtensionIdError::Empty);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExtensionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionIdError {
    Empty,
}

impl Display for ExtensionIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "extension id must not be empty"),
        }
    }
}

impl Error for ExtensionIdError {}

/// Failure reported by one extension lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// The extension refused to start or patch.
    Failed(String),
    /// The extension panicked; carries a sanitized payload summary.
    Panicked(String),
}

impl ExtensionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl Display for ExtensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "extension failed: {message}"),
            Self::Panicked(payload) => write!(f, "extension panicked: {payload}"),
        }
    }
}

impl Error for ExtensionError {}

#[cfg(test)]
mod tests {
    use super::{ExtensionError, ExtensionId, ExtensionIdError, OrchestratorView};
    use crate::patch::{PatchLedger, PatchProvider, PatchSetHandle};

    #[test]
    fn keeps_host_ids_verbatim() {
        for value in ["chroma.lighting-events", "ChromaToggle", "Chroma Lighting Events"] {
            let id = ExtensionId::parse(value).expect("non-empty id");
            assert_eq!(id.as_str(), value);
            assert_eq!(id.to_string(), value);
        }
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_id() {
        let padded = ExtensionId::parse("chroma.x ").expect("non-empty id");
        let plain = ExtensionId::parse("chroma.x").expect("non-empty id");
        assert_eq!(padded.as_str(), "chroma.x ");
        assert_ne!(padded, plain);
    }

    #[test]
    fn rejects_blank_ids() {
        assert_eq!(ExtensionId::parse(""), Err(ExtensionIdError::Empty));
        assert_eq!(ExtensionId::parse("   "), Err(ExtensionIdError::Empty));
    }

    #[test]
    fn view_exposes_ledger_and_extension_ids() {
        let mut ledger = PatchLedger::new();
        let ids = vec![ExtensionId::parse("chroma.toggle").expect("valid id")];
        {
            let view = OrchestratorView::new(&ledger, &ids);
            assert!(!view.core_patched());
            assert!(view.patch_providers().is_empty());
        }

        ledger
            .record(PatchProvider::Core, PatchSetHandle::new("net.binaryelement.chroma"))
            .expect("core record");
        let view = OrchestratorView::new(&ledger, &ids);
        assert!(view.core_patched());
        assert_eq!(view.patch_providers().len(), 1);
        assert_eq!(view.extension_ids(), ids.as_slice());
    }

    #[test]
    fn error_display_names_failure_kind() {
        assert!(ExtensionError::failed("no config")
            .to_string()
            .contains("failed: no config"));
        assert!(ExtensionError::Panicked("boom".to_string())
            .to_string()
            .contains("panicked: boom"));
    }
}
