//! Append-only record of installed patch-sets.

use super::{PatchProvider, PatchSetHandle};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One provider and the patch-set it installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchProviderRecord {
    pub provider: PatchProvider,
    pub patch_set: PatchSetHandle,
}

/// Append-only patch ledger.
///
/// Records are never mutated or removed once appended.
#[derive(Debug, Default)]
pub struct PatchLedger {
    records: Vec<PatchProviderRecord>,
}

impl PatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one provider record.
    ///
    /// # Errors
    /// - `DuplicateProvider` when the provider already has a record.
    /// - `CoreRecordMissing` when an extension records before the core.
    pub fn record(
        &mut self,
        provider: PatchProvider,
        patch_set: PatchSetHandle,
    ) -> Result<(), LedgerError> {
        if self.contains(&provider) {
            return Err(LedgerError::DuplicateProvider(provider));
        }
        if !provider.is_core() && self.core_record().is_none() {
            return Err(LedgerError::CoreRecordMissing(provider));
        }

        self.records.push(PatchProviderRecord {
            provider,
            patch_set,
        });
        Ok(())
    }

    /// Returns a copy of every record in insertion order.
    pub fn snapshot(&self) -> Vec<PatchProviderRecord> {
        self.records.clone()
    }

    pub fn contains(&self, provider: &PatchProvider) -> bool {
        self.records.iter().any(|record| &record.provider == provider)
    }

    pub fn core_record(&self) -> Option<&PatchProviderRecord> {
        self.records.first().filter(|record| record.provider.is_core())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    DuplicateProvider(PatchProvider),
    CoreRecordMissing(PatchProvider),
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateProvider(provider) => {
                write!(f, "patch provider already recorded: {provider}")
            }
            Self::CoreRecordMissing(provider) => write!(
                f,
                "core patch-set must be recorded before {provider}"
            ),
        }
    }
}

impl Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::{LedgerError, PatchLedger};
    use crate::extension::ExtensionId;
    use crate::patch::{PatchProvider, PatchSetHandle, CORE_PATCH_SET_ID};

    fn extension(id: &str) -> PatchProvider {
        PatchProvider::Extension(ExtensionId::parse(id).expect("valid extension id"))
    }

    #[test]
    fn records_core_then_extensions_in_order() {
        let mut ledger = PatchLedger::new();
        assert!(ledger.is_empty());
        ledger
            .record(PatchProvider::Core, PatchSetHandle::new(CORE_PATCH_SET_ID))
            .expect("core record");
        ledger
            .record(extension("chroma.toggle"), PatchSetHandle::new("chroma.toggle.patches"))
            .expect("extension record");

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[0].provider.is_core());
        assert_eq!(snapshot[0].patch_set.id(), CORE_PATCH_SET_ID);
        assert_eq!(snapshot[1].provider, extension("chroma.toggle"));
    }

    #[test]
    fn rejects_extension_before_core() {
        let mut ledger = PatchLedger::new();
        let err = ledger
            .record(extension("chroma.toggle"), PatchSetHandle::new("x"))
            .expect_err("extension before core must fail");
        assert!(matches!(err, LedgerError::CoreRecordMissing(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn rejects_duplicate_provider() {
        let mut ledger = PatchLedger::new();
        ledger
            .record(PatchProvider::Core, PatchSetHandle::new(CORE_PATCH_SET_ID))
            .expect("core record");
        let err = ledger
            .record(PatchProvider::Core, PatchSetHandle::new("again"))
            .expect_err("second core record must fail");
        assert_eq!(err, LedgerError::DuplicateProvider(PatchProvider::Core));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_ledger() {
        let mut ledger = PatchLedger::new();
        ledger
            .record(PatchProvider::Core, PatchSetHandle::new(CORE_PATCH_SET_ID))
            .expect("core record");

        let mut snapshot = ledger.snapshot();
        snapshot.clear();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn records_serialize_with_tagged_provider() {
        let mut ledger = PatchLedger::new();
        ledger
            .record(PatchProvider::Core, PatchSetHandle::new(CORE_PATCH_SET_ID))
            .expect("core record");
        ledger
            .record(extension("chroma.toggle"), PatchSetHandle::new("chroma.toggle.patches"))
            .expect("extension record");

        let json = serde_json::to_value(ledger.snapshot()).expect("serialize ledger");
        assert_eq!(json[0]["provider"]["kind"], "core");
        assert_eq!(json[0]["patch_set"], CORE_PATCH_SET_ID);
        assert_eq!(json[1]["provider"]["kind"], "extension");
        assert_eq!(json[1]["provider"]["id"], "chroma.toggle");
    }
}
