use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use almox_core::{DomainError, DomainResult, MaterialId};

/// A tracked stock item.
///
/// `available_quantity` is derived state: it equals `total_quantity` minus
/// the summed quantity of the active issuances referencing this material,
/// and always stays within `0..=total_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub category: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    pub entry_date: NaiveDate,
}

/// Input for recording a new material intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    pub name: String,
    pub category: String,
    pub total_quantity: u32,
    pub entry_date: NaiveDate,
}

/// Partial update to a material; absent fields keep their current value.
///
/// There is deliberately no `available_quantity` field: availability is
/// always recomputed from the active issuances, never taken from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub total_quantity: Option<u32>,
    pub entry_date: Option<NaiveDate>,
}

impl Material {
    /// Record a new intake. Everything received starts out available.
    pub fn create(input: NewMaterial) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if input.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if input.total_quantity == 0 {
            return Err(DomainError::validation("total quantity must be positive"));
        }

        Ok(Self {
            id: MaterialId::new(),
            name: input.name,
            category: input.category,
            total_quantity: input.total_quantity,
            available_quantity: input.total_quantity,
            entry_date: input.entry_date,
        })
    }

    /// Apply a partial update.
    ///
    /// `active_issued` is the summed quantity of this material's active
    /// issuances. When `total_quantity` changes, availability is recomputed
    /// as `total - active_issued`, clamped to `0..=total`, so a stale caller
    /// can never desynchronize it from the issuance log.
    pub fn apply_patch(&mut self, patch: MaterialPatch, active_issued: u64) -> DomainResult<()> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            self.name = name;
        }
        if let Some(category) = patch.category {
            if category.trim().is_empty() {
                return Err(DomainError::validation("category cannot be empty"));
            }
            self.category = category;
        }
        if let Some(entry_date) = patch.entry_date {
            self.entry_date = entry_date;
        }
        if let Some(total) = patch.total_quantity {
            self.total_quantity = total;
            // Result is <= total, so the narrowing cast is lossless.
            self.available_quantity = u64::from(total).saturating_sub(active_issued) as u32;
        }
        Ok(())
    }

    /// Remove `quantity` units from availability.
    pub fn issue_quantity(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity > self.available_quantity {
            return Err(DomainError::insufficient_stock(
                quantity,
                self.available_quantity,
            ));
        }
        self.available_quantity -= quantity;
        Ok(())
    }

    /// Return `quantity` units to availability.
    ///
    /// Clamped at `total_quantity`: a reversal raced with a shrunken total
    /// must never push availability above it.
    pub fn restock(&mut self, quantity: u32) {
        self.available_quantity = self
            .total_quantity
            .min(self.available_quantity.saturating_add(quantity));
    }
}
