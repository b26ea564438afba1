//! Extension discovery and capability contracts.
//!
//! Extensions are sibling host modules that opt into lifecycle callbacks by
//! implementing [`ChromaExtension`]. Discovery is a typed filter over the
//! host's loaded modules; there is no runtime reflection.

pub mod capability;
pub mod registry;

pub use capability::{ChromaExtension, ExtensionError, ExtensionId, ExtensionIdError, OrchestratorView};
pub use registry::{discover_extensions, ExtensionHandle, HostError, HostModule, PluginHost};
