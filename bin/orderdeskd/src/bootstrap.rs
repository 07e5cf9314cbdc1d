//! Bootstrap — config checks and sheet backend initialization.
//!
//! A backend that cannot be reached at startup is not fatal: the
//! server comes up degraded (empty reads, 503 writes) and `/_health`
//! reports `sheets_initialized: false`.

use std::sync::Arc;

use tracing::{error, info};

use orderdesk_orders::service::OrdersService;
use orderdesk_sheet::{GoogleSheetStore, NoAuth, SheetStore, StaticToken, TokenSource};

use crate::config::ServerConfig;

/// Verify server configuration is usable before binding anything.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.sheets.spreadsheet_id.is_empty() {
        anyhow::bail!("sheets.spreadsheet_id is empty in configuration.");
    }
    if config.listen.is_empty() {
        anyhow::bail!("listen address is empty in configuration.");
    }
    Ok(())
}

/// Build the sheet store and orders service.
///
/// Returns None when the backend cannot be prepared — the caller
/// serves in degraded mode rather than exiting.
pub async fn init_service(config: &ServerConfig) -> Option<OrdersService> {
    let token_source: Arc<dyn TokenSource> = if config.sheets.token.is_empty() {
        Arc::new(NoAuth)
    } else {
        Arc::new(StaticToken::new(config.sheets.token.clone()))
    };
    let store: Arc<dyn SheetStore> = Arc::new(GoogleSheetStore::new(
        &config.sheets.base_url,
        &config.sheets.spreadsheet_id,
        token_source,
    ));

    let service = OrdersService::new(store, config.sheets.worksheets.names());
    match service.ensure_dispatch_worksheet().await {
        Ok(()) => {
            info!("Sheet backend initialized");
            Some(service)
        }
        Err(e) => {
            error!(error = %e, "sheet backend init failed, serving degraded");
            None
        }
    }
}
