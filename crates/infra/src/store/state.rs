use almox_core::{ExpectedVersion, IssuanceId, MaterialId};
use almox_stock::{Issuance, Material};

use super::r#trait::{StoreError, StoreResult, VersionedMaterial};

/// The two collections, shared by both store implementations.
///
/// Plain vectors keep insertion order; the scale is a stockroom, so linear
/// scans are fine.
#[derive(Debug, Clone, Default)]
pub(crate) struct StoreState {
    pub materials: Vec<VersionedMaterial>,
    pub issuances: Vec<Issuance>,
}

impl StoreState {
    /// Rebuild from persisted collections. Versions restart at 1; they only
    /// arbitrate writers within one process lifetime.
    pub fn from_collections(materials: Vec<Material>, issuances: Vec<Issuance>) -> Self {
        Self {
            materials: materials
                .into_iter()
                .map(|material| VersionedMaterial {
                    version: 1,
                    material,
                })
                .collect(),
            issuances,
        }
    }

    fn find(&self, id: MaterialId) -> Option<usize> {
        self.materials.iter().position(|r| r.material.id == id)
    }

    fn checked(&self, id: MaterialId, expected: ExpectedVersion) -> StoreResult<usize> {
        let Some(idx) = self.find(id) else {
            return Err(StoreError::Concurrency(
                "material no longer exists".to_string(),
            ));
        };
        let current = self.materials[idx].version;
        if !expected.matches(current) {
            return Err(StoreError::Concurrency(format!(
                "expected {expected:?}, found {current}"
            )));
        }
        Ok(idx)
    }

    pub fn insert_material(&mut self, material: Material) -> VersionedMaterial {
        let record = VersionedMaterial {
            version: 1,
            material,
        };
        self.materials.push(record.clone());
        record
    }

    pub fn update_material(
        &mut self,
        expected: ExpectedVersion,
        material: Material,
    ) -> StoreResult<VersionedMaterial> {
        let idx = self.checked(material.id, expected)?;
        let record = VersionedMaterial {
            version: self.materials[idx].version + 1,
            material,
        };
        self.materials[idx] = record.clone();
        Ok(record)
    }

    pub fn delete_material(&mut self, id: MaterialId) -> bool {
        match self.find(id) {
            Some(idx) => {
                self.materials.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn commit_issue(
        &mut self,
        expected: ExpectedVersion,
        material: Material,
        issuance: Issuance,
    ) -> StoreResult<VersionedMaterial> {
        let record = self.update_material(expected, material)?;
        self.issuances.push(issuance);
        Ok(record)
    }

    pub fn commit_reverse(
        &mut self,
        expected: ExpectedVersion,
        material: Material,
        issuance_id: IssuanceId,
    ) -> StoreResult<VersionedMaterial> {
        // Check the issuance before touching the material: a double reversal
        // must fail without bumping anything.
        let Some(pos) = self.issuances.iter().position(|s| s.id == issuance_id) else {
            return Err(StoreError::Concurrency(
                "issuance already removed".to_string(),
            ));
        };
        let record = self.update_material(expected, material)?;
        self.issuances.remove(pos);
        Ok(record)
    }
}
