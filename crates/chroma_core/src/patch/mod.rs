//! Patch-set providers and the ledger of installed patch-sets.
//!
//! # Responsibility
//! - Model who installed a patch-set, never what it contains.
//! - Keep the core's baseline patch-set ahead of every extension's.
//!
//! # Invariants
//! - At most one ledger record per provider.
//! - The core record, when present, is the first record.

mod ledger;

pub use ledger::{LedgerError, PatchLedger, PatchProviderRecord};

use crate::extension::ExtensionId;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Patch-set id the core installs its baseline overrides under.
pub const CORE_PATCH_SET_ID: &str = "net.binaryelement.chroma";

/// Opaque handle for one installed bundle of behavior overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PatchSetHandle(String);

impl PatchSetHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Component that installed a patch-set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PatchProvider {
    Core,
    Extension(ExtensionId),
}

impl PatchProvider {
    pub fn is_core(&self) -> bool {
        matches!(self, Self::Core)
    }
}

impl Display for PatchProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => f.write_str("core"),
            Self::Extension(id) => write!(f, "extension:{id}"),
        }
    }
}

/// Applies the core's own baseline patch-set.
pub trait CorePatcher {
    fn install_core_patches(&self) -> Result<PatchSetHandle, PatchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A target method could not be patched.
    TargetNotFound(String),
    Apply(String),
}

impl Display for PatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetNotFound(target) => write!(f, "patch target not found: {target}"),
            Self::Apply(reason) => write!(f, "failed to apply patch-set: {reason}"),
        }
    }
}

impl Error for PatchError {}
