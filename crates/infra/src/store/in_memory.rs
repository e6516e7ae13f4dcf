use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use almox_core::{ExpectedVersion, IssuanceId, MaterialId};
use almox_stock::{Issuance, Material};

use super::r#trait::{StockStore, StoreError, StoreResult, VersionedMaterial};
use super::state::StoreState;

/// In-memory record store.
///
/// Intended for tests/dev. State is lost on shutdown.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl StockStore for InMemoryStore {
    fn materials(&self) -> StoreResult<Vec<VersionedMaterial>> {
        Ok(self.read()?.materials.clone())
    }

    fn material(&self, id: MaterialId) -> StoreResult<Option<VersionedMaterial>> {
        Ok(self
            .read()?
            .materials
            .iter()
            .find(|r| r.material.id == id)
            .cloned())
    }

    fn insert_material(&self, material: Material) -> StoreResult<VersionedMaterial> {
        Ok(self.write()?.insert_material(material))
    }

    fn update_material(
        &self,
        expected: ExpectedVersion,
        material: Material,
    ) -> StoreResult<VersionedMaterial> {
        self.write()?.update_material(expected, material)
    }

    fn delete_material(&self, id: MaterialId) -> StoreResult<bool> {
        Ok(self.write()?.delete_material(id))
    }

    fn issuances(&self) -> StoreResult<Vec<Issuance>> {
        Ok(self.read()?.issuances.clone())
    }

    fn issuance(&self, id: IssuanceId) -> StoreResult<Option<Issuance>> {
        Ok(self.read()?.issuances.iter().find(|s| s.id == id).cloned())
    }

    fn commit_issue(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance: Issuance,
    ) -> StoreResult<VersionedMaterial> {
        self.write()?.commit_issue(expected, material, issuance)
    }

    fn commit_reverse(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance_id: IssuanceId,
    ) -> StoreResult<VersionedMaterial> {
        self.write()?.commit_reverse(expected, material, issuance_id)
    }
}
