use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use serde::{Deserialize, Serialize};

use almox_core::{ExpectedVersion, IssuanceId, MaterialId};
use almox_stock::{Issuance, Material};

use super::r#trait::{StockStore, StoreError, StoreResult, VersionedMaterial};
use super::state::StoreState;

/// The persisted document: two top-level collections, rewritten wholesale on
/// every mutation.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StockDocument {
    materiais: Vec<Material>,
    saidas: Vec<Issuance>,
}

/// Flat-file JSON store.
///
/// The whole document lives in memory behind a lock. Every mutation is
/// applied to a copy, written to a sibling temp file, renamed over the
/// document, and only then swapped into memory, so a failed write leaves
/// both the file and the in-memory state untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Open the document at `path`, creating an empty one when missing.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            let doc: StockDocument =
                serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string()))?;
            StoreState::from_collections(doc.materiais, doc.saidas)
        } else {
            let state = StoreState::default();
            persist(&path, &state)?;
            state
        };

        tracing::info!(path = %path.display(), "opened stock document");
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    /// Apply `op` to a copy of the state, persist the copy, then commit it.
    fn mutate<T>(&self, op: impl FnOnce(&mut StoreState) -> StoreResult<T>) -> StoreResult<T> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = state.clone();
        let out = op(&mut next)?;
        persist(&self.path, &next)?;
        *state = next;
        Ok(out)
    }
}

fn persist(path: &Path, state: &StoreState) -> StoreResult<()> {
    let doc = StockDocument {
        materiais: state.materials.iter().map(|r| r.material.clone()).collect(),
        saidas: state.issuances.clone(),
    };
    let json =
        serde_json::to_string_pretty(&doc).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::Io(e.to_string()))?;
    Ok(())
}

impl StockStore for JsonFileStore {
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
        self.mutate(|state| Ok(state.insert_material(material)))
    }

    fn update_material(
        &self,
        expected: ExpectedVersion,
        material: Material,
    ) -> StoreResult<VersionedMaterial> {
        self.mutate(|state| state.update_material(expected, material))
    }

    fn delete_material(&self, id: MaterialId) -> StoreResult<bool> {
        self.mutate(|state| Ok(state.delete_material(id)))
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
        self.mutate(|state| state.commit_issue(expected, material, issuance))
    }

    fn commit_reverse(
        &self,
        expected: ExpectedVersion,
        material: Material,
        issuance_id: IssuanceId,
    ) -> StoreResult<VersionedMaterial> {
        self.mutate(|state| state.commit_reverse(expected, material, issuance_id))
    }
}
