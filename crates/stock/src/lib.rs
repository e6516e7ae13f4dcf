//! Stock domain module.
//!
//! This crate contains the business rules for materials and issuances,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod category;
pub mod issuance;
pub mod material;

pub use category::{Category, default_catalog};
pub use issuance::{Issuance, NewIssuance};
pub use material::{Material, MaterialPatch, NewMaterial};
