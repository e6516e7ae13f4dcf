use std::sync::Arc;

use thiserror::Error;

use almox_core::{ExpectedVersion, IssuanceId, MaterialId};
use almox_stock::{Issuance, Material};

/// A material record together with its store-assigned version.
///
/// Versions are an in-process optimistic-concurrency token, not part of the
/// persisted document: every committed write bumps the version, and writers
/// must present the version they read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedMaterial {
    pub version: u64,
    pub material: Material,
}

/// Store operation error.
///
/// Infrastructure failures only (concurrency, io, serialization). Domain
/// failures (validation, availability) are decided before the store is
/// asked to write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    #[error("storage io failed: {0}")]
    Io(String),

    #[error("document serialization failed: {0}")]
    Serialization(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store holding the two stock collections.
///
/// Implementations must:
/// - keep insertion order within each collection (callers rely on it for
///   stable tie-breaking),
/// - enforce the `ExpectedVersion` check on every material write, so two
///   interleaved read-modify-write sequences against one material cannot
///   both commit,
/// - make the two-collection commits atomic: on failure neither collection
///   changes.
pub trait StockStore: Send + Sync {
    /// All materials, in insertion order.
    fn materials(&self) -> StoreResult<Vec<VersionedMaterial>>;

    /// One material by id.
    fn material(&self, id: MaterialId) -> StoreResult<Option<VersionedMaterial>>;

    /// Insert a freshly created material.
    fn insert_material(&self, material: Material) -> StoreResult<VersionedMaterial>;

    /// Replace a material's state. A missing record or a stale `expected`
    /// version fails with `StoreError::Concurrency`.
    fn update_material(
        &self,
        expected: ExpectedVersion,
        material: Material,
    ) -> StoreResult<VersionedMaterial>;

    /// Remove a material. Returns whether a record was removed.
    fn delete_material(&self, id: MaterialId) -> StoreResult<bool>;

    /// All issuances, in insertion order.
    fn issuances(&self) -> StoreResult<Vec<Issuance>>;

    /// One issuance by id.
    fn issuance(&self, id: IssuanceId) -> StoreResult<Option<Issuance>>;

    /// Commit an issue: replace the material (version-checked) and append
    /// the issuance as one atomic write.
    fn commit_issue(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance: Issuance,
    ) -> StoreResult<VersionedMaterial>;

    /// Commit a reversal: replace the material (version-checked) and remove
    /// the issuance as one atomic write. An already-removed issuance fails
    /// with `StoreError::Concurrency` (double reversal race).
    fn commit_reverse(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance_id: IssuanceId,
    ) -> StoreResult<VersionedMaterial>;
}

impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    fn materials(&self) -> StoreResult<Vec<VersionedMaterial>> {
        (**self).materials()
    }

    fn material(&self, id: MaterialId) -> StoreResult<Option<VersionedMaterial>> {
        (**self).material(id)
    }

    fn insert_material(&self, material: Material) -> StoreResult<VersionedMaterial> {
        (**self).insert_material(material)
    }

    fn update_material(
        &self,
        expected: ExpectedVersion,
        material: Material,
    ) -> StoreResult<VersionedMaterial> {
        (**self).update_material(expected, material)
    }

    fn delete_material(&self, id: MaterialId) -> StoreResult<bool> {
        (**self).delete_material(id)
    }

    fn issuances(&self) -> StoreResult<Vec<Issuance>> {
        (**self).issuances()
    }

    fn issuance(&self, id: IssuanceId) -> StoreResult<Option<Issuance>> {
        (**self).issuance(id)
    }

    fn commit_issue(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance: Issuance,
    ) -> StoreResult<VersionedMaterial> {
        (**self).commit_issue(expected, material, issuance)
    }

    fn commit_reverse(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance_id: IssuanceId,
    ) -> StoreResult<VersionedMaterial> {
        (**self).commit_reverse(expected, material, issuance_id)
    }
}
