//! Lifecycle dispatcher for discovered extensions.
//!
//! # Responsibility
//! - Run `startup` on every extension, then install patch-sets.
//! - Record installed patch-sets in the ledger, core first.
//!
//! # Invariants
//! - One failing or panicking extension never stops the others.
//! - An extension that failed `startup` is not asked to install patches.
//! - Core patch failure is fatal: no extension patch-set is installed.

use crate::extension::{ExtensionError, ExtensionHandle, ExtensionId, OrchestratorView};
use crate::logging::panic_payload_summary;
use crate::patch::{CorePatcher, PatchError, PatchLedger, PatchProvider};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Lifecycle phase an extension call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Startup,
    InstallPatches,
}

impl LifecyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::InstallPatches => "install_patches",
        }
    }
}

/// One isolated extension failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFailure {
    pub extension: ExtensionId,
    pub phase: LifecyclePhase,
    pub error: ExtensionError,
}

/// Outcome of a completed dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Extensions whose `startup` succeeded, in discovery order.
    pub started: Vec<ExtensionId>,
    pub failures: Vec<ExtensionFailure>,
}

impl DispatchReport {
    pub fn failed(&self, extension: &ExtensionId) -> bool {
        self.failures
            .iter()
            .any(|failure| &failure.extension == extension)
    }
}

/// Fatal dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The core baseline patch-set could not be installed. Carries the
    /// startup report gathered before the failure.
    CorePatchFailed {
        error: PatchError,
        report: DispatchReport,
    },
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorePatchFailed { error, .. } => {
                write!(f, "core patch installation failed: {error}")
            }
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CorePatchFailed { error, .. } => Some(error),
        }
    }
}

/// Drives extension lifecycle phases against one ledger.
pub struct LifecycleDispatcher<'a> {
    extensions: &'a [ExtensionHandle],
    core: &'a dyn CorePatcher,
}

impl<'a> LifecycleDispatcher<'a> {
    pub fn new(extensions: &'a [ExtensionHandle], core: &'a dyn CorePatcher) -> Self {
        Self { extensions, core }
    }

    /// Runs startup then patch installation.
    ///
    /// # Errors
    /// Returns `CorePatchFailed` when the core patch-set fails; the ledger
    /// is left without any record in that case.
    pub fn run(&self, ledger: &mut PatchLedger) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::default();
        let ids = self
            .extensions
            .iter()
            .map(|handle| handle.id().clone())
            .collect::<Vec<_>>();

        let mut started = Vec::with_capacity(self.extensions.len());
        {
            let view = OrchestratorView::new(ledger, &ids);
            for handle in self.extensions {
                match isolate(|| handle.extension().startup(&view)) {
                    Ok(()) => {
                        info!(
                            "event=extension_startup module=lifecycle status=ok extension={}",
                            handle.id()
                        );
                        report.started.push(handle.id().clone());
                        started.push(handle);
                    }
                    Err(err) => {
                        report_failure(&mut report, handle, LifecyclePhase::Startup, err);
                    }
                }
            }
        }

        let core_patch_set = match self.core.install_core_patches() {
            Ok(patch_set) => patch_set,
            Err(err) => {
                error!(
                    "event=core_patch module=lifecycle status=error error={}",
                    err
                );
                return Err(DispatchError::CorePatchFailed { error: err, report });
            }
        };
        info!(
            "event=core_patch module=lifecycle status=ok patch_set={}",
            core_patch_set.id()
        );
        if let Err(err) = ledger.record(PatchProvider::Core, core_patch_set) {
            // Only reachable when a ledger is reused across dispatches.
            error!(
                "event=core_patch module=lifecycle status=error error={}",
                err
            );
        }

        for handle in started {
            match isolate(|| handle.extension().install_patches()) {
                Ok(Some(patch_set)) => {
                    let provider = PatchProvider::Extension(handle.id().clone());
                    match ledger.record(provider, patch_set) {
                        Ok(()) => info!(
                            "event=extension_patch module=lifecycle status=ok extension={}",
                            handle.id()
                        ),
                        Err(err) => error!(
                            "event=extension_patch module=lifecycle status=error extension={} error={}",
                            handle.id(),
                            err
                        ),
                    }
                }
                Ok(None) => info!(
                    "event=extension_patch module=lifecycle status=skip extension={} reason=no_patch_set",
                    handle.id()
                ),
                Err(err) => {
                    report_failure(&mut report, handle, LifecyclePhase::InstallPatches, err);
                }
            }
        }

        Ok(report)
    }
}

fn report_failure(
    report: &mut DispatchReport,
    handle: &ExtensionHandle,
    phase: LifecyclePhase,
    error: ExtensionError,
) {
    error!(
        "event=extension_{} module=lifecycle status=error extension={} error={}",
        phase.as_str(),
        handle.id(),
        error
    );
    report.failures.push(ExtensionFailure {
        extension: handle.id().clone(),
        phase,
        error,
    });
}

/// Runs one extension call, turning a panic into `ExtensionError::Panicked`.
fn isolate<T>(call: impl FnOnce() -> Result<T, ExtensionError>) -> Result<T, ExtensionError> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(ExtensionError::Panicked(panic_payload_summary(
            payload.as_ref(),
        ))),
    }
}
