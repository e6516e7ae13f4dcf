//! Infrastructure layer: record stores and the services that orchestrate
//! domain decisions against them.

pub mod error;
pub mod issuance_log;
pub mod ledger;
pub mod store;


pub use error::{ServiceError, ServiceResult};
pub use issuance_log::IssuanceLog;
pub use ledger::{StockLedger, StockStats};
pub use store::{
    InMemoryStore, JsonFileStore, StockStore, StoreError, StoreResult, VersionedMaterial,
};
