use almox_core::{DomainError, ExpectedVersion, IssuanceId, MaterialId};
use almox_stock::{Issuance, NewIssuance};

use crate::error::ServiceResult;
use crate::store::StockStore;

/// Movement-side service: issue stock, reverse an issuance, browse history.
pub struct IssuanceLog<S: StockStore> {
    store: S,
}

impl<S: StockStore> IssuanceLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Issue stock against a material. The debit and the issuance record are
    /// committed as one store operation, so a lost race against a concurrent
    /// writer leaves no partial effect.
    pub fn issue(&self, input: NewIssuance) -> ServiceResult<Issuance> {
        let record = self
            .store
            .material(input.material_id)?
            .ok_or_else(|| DomainError::not_found("material not found"))?;

        let mut material = record.material;
        let issuance = Issuance::issue(&mut material, input)?;
        self.store.commit_issue(
            ExpectedVersion::Exact(record.version),
            material,
            issuance.clone(),
        )?;
        tracing::debug!(
            issuance_id = %issuance.id,
            material_id = %issuance.material_id,
            quantity = issuance.quantity,
            "issued stock"
        );
        Ok(issuance)
    }

    /// Reverse an issuance: restore the issued quantity (clamped to the
    /// total) and remove the record.
    pub fn reverse(&self, id: IssuanceId) -> ServiceResult<()> {
        let issuance = self
            .store
            .issuance(id)?
            .ok_or_else(|| DomainError::not_found("issuance not found"))?;
        let record = self
            .store
            .material(issuance.material_id)?
            .ok_or_else(|| DomainError::not_found("material not found"))?;

        let mut material = record.material;
        material.restock(issuance.quantity);
        self.store
            .commit_reverse(ExpectedVersion::Exact(record.version), material, id)?;
        tracing::debug!(
            issuance_id = %id,
            material_id = %issuance.material_id,
            quantity = issuance.quantity,
            "reversed issuance"
        );
        Ok(())
    }

    /// Issuance history, most recent first. Same-day entries keep newest
    /// insertion first.
    pub fn history(&self, material_id: Option<MaterialId>) -> ServiceResult<Vec<Issuance>> {
        let mut entries: Vec<(usize, Issuance)> = self
            .store
            .issuances()?
            .into_iter()
            .enumerate()
            .filter(|(_, s)| material_id.map_or(true, |id| s.material_id == id))
            .collect();
        entries.sort_by(|(ia, a), (ib, b)| {
            b.issue_date.cmp(&a.issue_date).then(ib.cmp(ia))
        });
        Ok(entries.into_iter().map(|(_, s)| s).collect())
    }
}
