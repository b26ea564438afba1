//! Host application surfaces the orchestrator drives.

/// Global simulation time control.
pub trait TimeControl {
    fn set_time_scale(&mut self, scale: f32);
}

/// Capability names other host modules can query.
pub trait CapabilityAdvertiser {
    fn advertise(&mut self, capability: &str);
}

/// Capabilities advertised after a successful bootstrap.
pub const ADVERTISED_CAPABILITIES: &[&str] = &["Chroma", "ChromaLite"];

/// Logical input triggers polled by the host input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTrigger {
    ReloadSettings,
    EmitDebugSnapshot,
}
