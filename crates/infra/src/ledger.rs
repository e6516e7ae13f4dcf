use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

use almox_core::{DomainError, ExpectedVersion, MaterialId};
use almox_stock::{Category, Material, MaterialPatch, NewMaterial};

use crate::error::ServiceResult;
use crate::store::{StockStore, StoreError};

/// How long a creation key shields against duplicate submissions.
const IDEMPOTENCY_WINDOW: Duration = Duration::from_secs(600);

struct IdempotencyEntry {
    material_id: MaterialId,
    seen_at: Instant,
}

/// Aggregate counters across the whole ledger.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStats {
    pub total_materials: usize,
    pub total_available: u64,
    pub total_issuances: usize,
}

/// Catalog-side service: material lifecycle, category listing, stats.
pub struct StockLedger<S: StockStore> {
    store: S,
    categories: Vec<Category>,
    idempotency: Mutex<HashMap<String, IdempotencyEntry>>,
}

impl<S: StockStore> StockLedger<S> {
    pub fn new(store: S, categories: Vec<Category>) -> Self {
        Self {
            store,
            categories,
            idempotency: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new material. A repeated `idempotency_key` within the
    /// window replays the original material instead of creating a duplicate.
    pub fn create(
        &self,
        input: NewMaterial,
        idempotency_key: Option<String>,
    ) -> ServiceResult<Material> {
        // The lock is held across the store write so a concurrent retry with
        // the same key cannot slip past the check.
        let mut keys = self
            .idempotency
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        keys.retain(|_, entry| entry.seen_at.elapsed() < IDEMPOTENCY_WINDOW);

        if let Some(key) = &idempotency_key {
            if let Some(entry) = keys.get(key) {
                if let Some(record) = self.store.material(entry.material_id)? {
                    tracing::debug!(material_id = %record.material.id, "replayed material creation");
                    return Ok(record.material);
                }
            }
        }

        let material = Material::create(input)?;
        let record = self.store.insert_material(material)?;
        if let Some(key) = idempotency_key {
            keys.insert(
                key,
                IdempotencyEntry {
                    material_id: record.material.id,
                    seen_at: Instant::now(),
                },
            );
        }
        tracing::debug!(material_id = %record.material.id, "registered material");
        Ok(record.material)
    }

    /// All materials, ordered by case-insensitive name. Equal names keep a
    /// stable order, ties broken by the raw name.
    pub fn get_all(&self) -> ServiceResult<Vec<Material>> {
        let mut materials: Vec<Material> = self
            .store
            .materials()?
            .into_iter()
            .map(|r| r.material)
            .collect();
        materials.sort_by_cached_key(|m| (m.name.to_lowercase(), m.name.clone()));
        Ok(materials)
    }

    pub fn get(&self, id: MaterialId) -> ServiceResult<Option<Material>> {
        Ok(self.store.material(id)?.map(|r| r.material))
    }

    /// Apply a partial update. Changing the total recomputes availability
    /// from the quantities still out on active issuances.
    pub fn update(&self, id: MaterialId, patch: MaterialPatch) -> ServiceResult<Material> {
        let record = self
            .store
            .material(id)?
            .ok_or_else(|| DomainError::not_found("material not found"))?;

        let active_issued: u64 = self
            .store
            .issuances()?
            .iter()
            .filter(|s| s.material_id == id)
            .map(|s| u64::from(s.quantity))
            .sum();

        let mut material = record.material;
        material.apply_patch(patch, active_issued)?;
        let updated = self
            .store
            .update_material(ExpectedVersion::Exact(record.version), material)?;
        Ok(updated.material)
    }

    /// Remove a material. Refused while any issuance still references it.
    pub fn remove(&self, id: MaterialId) -> ServiceResult<()> {
        if self.store.material(id)?.is_none() {
            return Err(DomainError::not_found("material not found").into());
        }
        let referenced = self
            .store
            .issuances()?
            .iter()
            .any(|s| s.material_id == id);
        if referenced {
            return Err(DomainError::conflict("material has active issuances").into());
        }
        if !self.store.delete_material(id)? {
            return Err(DomainError::not_found("material not found").into());
        }
        tracing::debug!(material_id = %id, "removed material");
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn stats(&self) -> ServiceResult<StockStats> {
        let materials = self.store.materials()?;
        let total_available = materials
            .iter()
            .map(|r| u64::from(r.material.available_quantity))
            .sum();
        Ok(StockStats {
            total_materials: materials.len(),
            total_available,
            total_issuances: self.store.issuances()?.len(),
        })
    }
}
