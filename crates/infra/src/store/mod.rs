//! Record-store boundary for the stock document.
//!
//! One interface, two implementations: an in-memory store for tests/dev and
//! a flat-file JSON store that rewrites the whole document on every
//! mutation. The implementation is chosen once at startup and injected.

pub mod in_memory;
pub mod json_file;
mod state;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use r#trait::{StockStore, StoreError, StoreResult, VersionedMaterial};
