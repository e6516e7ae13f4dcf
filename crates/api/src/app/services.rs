use std::sync::Arc;

use almox_infra::{InMemoryStore, IssuanceLog, JsonFileStore, StockLedger, StockStore};
use almox_stock::default_catalog;

/// Shared application services handed to every handler.
pub struct AppServices {
    pub ledger: StockLedger<Arc<dyn StockStore>>,
    pub issuance_log: IssuanceLog<Arc<dyn StockStore>>,
}

/// Wire the services against the backend selected at startup.
///
/// `USE_FILE_STORE=true` selects the flat-file document store; anything else
/// (including unset) selects the in-memory store. The document path comes
/// from `STOCK_DB_PATH` and defaults to `estoque.json`.
pub fn build_services() -> anyhow::Result<AppServices> {
    let use_file_store = std::env::var("USE_FILE_STORE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let store: Arc<dyn StockStore> = if use_file_store {
        let path =
            std::env::var("STOCK_DB_PATH").unwrap_or_else(|_| "estoque.json".to_string());
        Arc::new(JsonFileStore::open(path)?)
    } else {
        tracing::info!("using in-memory stock store");
        Arc::new(InMemoryStore::new())
    };

    Ok(AppServices {
        ledger: StockLedger::new(store.clone(), default_catalog()),
        issuance_log: IssuanceLog::new(store),
    })
}
